//! Hand-written generated-code equivalent for the `CalculatorService` test
//! schema used by `thtp`'s own tests (`spec.md` §8):
//!
//! ```thrift
//! service CalculatorService {
//!   i32 do_operation(1: Operation op, 2: i32 operand_one, 3: i32 operand_two) throws (1: DivideByZero dvz_exception),
//!   RetVal set_variables(1: string reason, 2: Vars req) throws (1: OhNo oh_no),
//!   void test_internal_error(),
//! }
//! ```
//!
//! This crate plays the role a Thrift schema compiler would: every struct
//! below writes and reads itself directly through a `thrift` protocol
//! object, and [`CalculatorServiceDispatch`] wires a user-supplied
//! [`CalculatorServiceHandler`] into `thtp`'s [`ServiceDispatch`].

use std::io;

use thiserror::Error;
use thrift::protocol::{TFieldIdentifier, TInputProtocol, TOutputProtocol, TStructIdentifier, TType};
use thtp::{
    ResultEnvelope, ResultOutcome, Reply, ServerError, ServiceDispatch, ThriftEnvelope,
    envelope::{deserialize_args, serialize_exception, serialize_success},
    protocol::Protocol,
};

/// The four arithmetic operations `do_operation` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition.
    Add = 1,
    /// Subtraction.
    Subtract = 2,
    /// Multiplication.
    Multiply = 3,
    /// Division.
    Divide = 4,
}

impl Operation {
    fn from_i32(value: i32) -> thrift::Result<Self> {
        match value {
            1 => Ok(Self::Add),
            2 => Ok(Self::Subtract),
            3 => Ok(Self::Multiply),
            4 => Ok(Self::Divide),
            other => Err(thrift::Error::Protocol(thrift::ProtocolError::new(
                thrift::ProtocolErrorKind::InvalidData,
                format!("unrecognised Operation value {other}"),
            ))),
        }
    }
}

/// `do_operation_args`.
#[derive(Debug, Clone)]
pub struct DoOperationArgs {
    /// The operation to perform.
    pub op: Operation,
    /// First operand.
    pub operand_one: i32,
    /// Second operand.
    pub operand_two: i32,
}

impl ThriftEnvelope for DoOperationArgs {
    fn write_envelope(&self, o: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o.write_struct_begin(&TStructIdentifier::new("do_operation_args"))?;
        o.write_field_begin(&TFieldIdentifier::new("op", TType::I32, 1))?;
        o.write_i32(self.op as i32)?;
        o.write_field_end()?;
        o.write_field_begin(&TFieldIdentifier::new("operand_one", TType::I32, 2))?;
        o.write_i32(self.operand_one)?;
        o.write_field_end()?;
        o.write_field_begin(&TFieldIdentifier::new("operand_two", TType::I32, 3))?;
        o.write_i32(self.operand_two)?;
        o.write_field_end()?;
        o.write_field_stop()?;
        o.write_struct_end()
    }

    fn read_envelope(i: &mut dyn TInputProtocol) -> thrift::Result<Self> {
        i.read_struct_begin()?;
        let mut op = None;
        let mut operand_one = None;
        let mut operand_two = None;
        loop {
            let field = i.read_field_begin()?;
            if field.field_type == TType::Stop {
                break;
            }
            match field.id {
                Some(1) => op = Some(Operation::from_i32(i.read_i32()?)?),
                Some(2) => operand_one = Some(i.read_i32()?),
                Some(3) => operand_two = Some(i.read_i32()?),
                _ => i.skip(field.field_type)?,
            }
            i.read_field_end()?;
        }
        i.read_struct_end()?;
        Ok(Self {
            op: op.ok_or_else(|| missing_field("op"))?,
            operand_one: operand_one.ok_or_else(|| missing_field("operand_one"))?,
            operand_two: operand_two.ok_or_else(|| missing_field("operand_two"))?,
        })
    }
}

/// `DivideByZero` exception.
#[derive(Debug, Clone, Error)]
#[error("{error_string}")]
pub struct DivideByZero {
    /// Human-readable description.
    pub error_string: String,
    /// The zero divisor (always 0, carried for parity with the schema).
    pub zero: i32,
}

impl ThriftEnvelope for DivideByZero {
    fn write_envelope(&self, o: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o.write_struct_begin(&TStructIdentifier::new("DivideByZero"))?;
        o.write_field_begin(&TFieldIdentifier::new("error_string", TType::String, 1))?;
        o.write_string(&self.error_string)?;
        o.write_field_end()?;
        o.write_field_begin(&TFieldIdentifier::new("zero", TType::I32, 2))?;
        o.write_i32(self.zero)?;
        o.write_field_end()?;
        o.write_field_stop()?;
        o.write_struct_end()
    }

    fn read_envelope(i: &mut dyn TInputProtocol) -> thrift::Result<Self> {
        i.read_struct_begin()?;
        let mut error_string = None;
        let mut zero = None;
        loop {
            let field = i.read_field_begin()?;
            if field.field_type == TType::Stop {
                break;
            }
            match field.id {
                Some(1) => error_string = Some(i.read_string()?),
                Some(2) => zero = Some(i.read_i32()?),
                _ => i.skip(field.field_type)?,
            }
            i.read_field_end()?;
        }
        i.read_struct_end()?;
        Ok(Self {
            error_string: error_string.ok_or_else(|| missing_field("error_string"))?,
            zero: zero.unwrap_or_default(),
        })
    }
}

/// `do_operation_result`.
pub struct DoOperationResult {
    outcome: ResultOutcome<i32, DivideByZero>,
}

impl ThriftEnvelope for DoOperationResult {
    fn write_envelope(&self, o: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o.write_struct_begin(&TStructIdentifier::new("do_operation_result"))?;
        match &self.outcome {
            ResultOutcome::Success(value) => {
                o.write_field_begin(&TFieldIdentifier::new("success", TType::I32, 0))?;
                o.write_i32(*value)?;
                o.write_field_end()?;
            }
            ResultOutcome::Exception(exc) => {
                o.write_field_begin(&TFieldIdentifier::new("dvz_exception", TType::Struct, 1))?;
                exc.write_envelope(o)?;
                o.write_field_end()?;
            }
            ResultOutcome::Void => {}
        }
        o.write_field_stop()?;
        o.write_struct_end()
    }

    fn read_envelope(i: &mut dyn TInputProtocol) -> thrift::Result<Self> {
        i.read_struct_begin()?;
        let mut outcome = ResultOutcome::Void;
        loop {
            let field = i.read_field_begin()?;
            if field.field_type == TType::Stop {
                break;
            }
            match field.id {
                Some(0) => outcome = ResultOutcome::Success(i.read_i32()?),
                Some(1) => outcome = ResultOutcome::Exception(DivideByZero::read_envelope(i)?),
                _ => i.skip(field.field_type)?,
            }
            i.read_field_end()?;
        }
        i.read_struct_end()?;
        Ok(Self { outcome })
    }
}

impl ResultEnvelope for DoOperationResult {
    type Success = i32;
    type Exception = DivideByZero;

    fn from_success(value: Self::Success) -> Self {
        Self { outcome: ResultOutcome::Success(value) }
    }

    fn from_exception(exc: Self::Exception) -> Self {
        Self { outcome: ResultOutcome::Exception(exc) }
    }

    fn into_outcome(self) -> ResultOutcome<Self::Success, Self::Exception> {
        self.outcome
    }
}

/// `Vars`: the free-form request payload for `set_variables`.
#[derive(Debug, Clone, Default)]
pub struct Vars {
    /// Opaque value carried by the request.
    pub value: i32,
}

impl ThriftEnvelope for Vars {
    fn write_envelope(&self, o: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o.write_struct_begin(&TStructIdentifier::new("Vars"))?;
        o.write_field_begin(&TFieldIdentifier::new("value", TType::I32, 1))?;
        o.write_i32(self.value)?;
        o.write_field_end()?;
        o.write_field_stop()?;
        o.write_struct_end()
    }

    fn read_envelope(i: &mut dyn TInputProtocol) -> thrift::Result<Self> {
        i.read_struct_begin()?;
        let mut value = 0;
        loop {
            let field = i.read_field_begin()?;
            if field.field_type == TType::Stop {
                break;
            }
            if field.id == Some(1) {
                value = i.read_i32()?;
            } else {
                i.skip(field.field_type)?;
            }
            i.read_field_end()?;
        }
        i.read_struct_end()?;
        Ok(Self { value })
    }
}

/// `set_variables_args`.
#[derive(Debug, Clone)]
pub struct SetVariablesArgs {
    /// Human-readable reason for the update.
    pub reason: String,
    /// The new variables payload.
    pub req: Vars,
}

impl ThriftEnvelope for SetVariablesArgs {
    fn write_envelope(&self, o: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o.write_struct_begin(&TStructIdentifier::new("set_variables_args"))?;
        o.write_field_begin(&TFieldIdentifier::new("reason", TType::String, 1))?;
        o.write_string(&self.reason)?;
        o.write_field_end()?;
        o.write_field_begin(&TFieldIdentifier::new("req", TType::Struct, 2))?;
        self.req.write_envelope(o)?;
        o.write_field_end()?;
        o.write_field_stop()?;
        o.write_struct_end()
    }

    fn read_envelope(i: &mut dyn TInputProtocol) -> thrift::Result<Self> {
        i.read_struct_begin()?;
        let mut reason = None;
        let mut req = None;
        loop {
            let field = i.read_field_begin()?;
            if field.field_type == TType::Stop {
                break;
            }
            match field.id {
                Some(1) => reason = Some(i.read_string()?),
                Some(2) => req = Some(Vars::read_envelope(i)?),
                _ => i.skip(field.field_type)?,
            }
            i.read_field_end()?;
        }
        i.read_struct_end()?;
        Ok(Self {
            reason: reason.ok_or_else(|| missing_field("reason"))?,
            req: req.unwrap_or_default(),
        })
    }
}

/// `RetVal`: `set_variables`'s success type.
#[derive(Debug, Clone, Default)]
pub struct RetVal {
    /// Resulting value.
    pub val: i32,
}

impl ThriftEnvelope for RetVal {
    fn write_envelope(&self, o: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o.write_struct_begin(&TStructIdentifier::new("RetVal"))?;
        o.write_field_begin(&TFieldIdentifier::new("val", TType::I32, 1))?;
        o.write_i32(self.val)?;
        o.write_field_end()?;
        o.write_field_stop()?;
        o.write_struct_end()
    }

    fn read_envelope(i: &mut dyn TInputProtocol) -> thrift::Result<Self> {
        i.read_struct_begin()?;
        let mut val = 0;
        loop {
            let field = i.read_field_begin()?;
            if field.field_type == TType::Stop {
                break;
            }
            if field.id == Some(1) {
                val = i.read_i32()?;
            } else {
                i.skip(field.field_type)?;
            }
            i.read_field_end()?;
        }
        i.read_struct_end()?;
        Ok(Self { val })
    }
}

/// `OhNo` exception.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct OhNo {
    /// Human-readable description.
    pub message: String,
}

impl ThriftEnvelope for OhNo {
    fn write_envelope(&self, o: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o.write_struct_begin(&TStructIdentifier::new("OhNo"))?;
        o.write_field_begin(&TFieldIdentifier::new("message", TType::String, 1))?;
        o.write_string(&self.message)?;
        o.write_field_end()?;
        o.write_field_stop()?;
        o.write_struct_end()
    }

    fn read_envelope(i: &mut dyn TInputProtocol) -> thrift::Result<Self> {
        i.read_struct_begin()?;
        let mut message = None;
        loop {
            let field = i.read_field_begin()?;
            if field.field_type == TType::Stop {
                break;
            }
            if field.id == Some(1) {
                message = Some(i.read_string()?);
            } else {
                i.skip(field.field_type)?;
            }
            i.read_field_end()?;
        }
        i.read_struct_end()?;
        Ok(Self { message: message.ok_or_else(|| missing_field("message"))? })
    }
}

/// `set_variables_result`.
pub struct SetVariablesResult {
    outcome: ResultOutcome<RetVal, OhNo>,
}

impl ThriftEnvelope for SetVariablesResult {
    fn write_envelope(&self, o: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o.write_struct_begin(&TStructIdentifier::new("set_variables_result"))?;
        match &self.outcome {
            ResultOutcome::Success(value) => {
                o.write_field_begin(&TFieldIdentifier::new("success", TType::Struct, 0))?;
                value.write_envelope(o)?;
                o.write_field_end()?;
            }
            ResultOutcome::Exception(exc) => {
                o.write_field_begin(&TFieldIdentifier::new("oh_no", TType::Struct, 1))?;
                exc.write_envelope(o)?;
                o.write_field_end()?;
            }
            ResultOutcome::Void => {}
        }
        o.write_field_stop()?;
        o.write_struct_end()
    }

    fn read_envelope(i: &mut dyn TInputProtocol) -> thrift::Result<Self> {
        i.read_struct_begin()?;
        let mut outcome = ResultOutcome::Void;
        loop {
            let field = i.read_field_begin()?;
            if field.field_type == TType::Stop {
                break;
            }
            match field.id {
                Some(0) => outcome = ResultOutcome::Success(RetVal::read_envelope(i)?),
                Some(1) => outcome = ResultOutcome::Exception(OhNo::read_envelope(i)?),
                _ => i.skip(field.field_type)?,
            }
            i.read_field_end()?;
        }
        i.read_struct_end()?;
        Ok(Self { outcome })
    }
}

impl ResultEnvelope for SetVariablesResult {
    type Success = RetVal;
    type Exception = OhNo;

    fn from_success(value: Self::Success) -> Self {
        Self { outcome: ResultOutcome::Success(value) }
    }

    fn from_exception(exc: Self::Exception) -> Self {
        Self { outcome: ResultOutcome::Exception(exc) }
    }

    fn into_outcome(self) -> ResultOutcome<Self::Success, Self::Exception> {
        self.outcome
    }
}

/// `test_internal_error_args`: no fields.
#[derive(Debug, Clone, Default)]
pub struct TestInternalErrorArgs;

impl ThriftEnvelope for TestInternalErrorArgs {
    fn write_envelope(&self, o: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o.write_struct_begin(&TStructIdentifier::new("test_internal_error_args"))?;
        o.write_field_stop()?;
        o.write_struct_end()
    }

    fn read_envelope(i: &mut dyn TInputProtocol) -> thrift::Result<Self> {
        i.read_struct_begin()?;
        loop {
            let field = i.read_field_begin()?;
            if field.field_type == TType::Stop {
                break;
            }
            i.skip(field.field_type)?;
            i.read_field_end()?;
        }
        i.read_struct_end()?;
        Ok(Self)
    }
}

/// `test_internal_error_result`: a void RPC, so no declared fields and no
/// `success` field at all.
pub struct TestInternalErrorResult {
    outcome: ResultOutcome<(), std::convert::Infallible>,
}

impl ThriftEnvelope for TestInternalErrorResult {
    fn write_envelope(&self, o: &mut dyn TOutputProtocol) -> thrift::Result<()> {
        o.write_struct_begin(&TStructIdentifier::new("test_internal_error_result"))?;
        o.write_field_stop()?;
        o.write_struct_end()
    }

    fn read_envelope(i: &mut dyn TInputProtocol) -> thrift::Result<Self> {
        i.read_struct_begin()?;
        loop {
            let field = i.read_field_begin()?;
            if field.field_type == TType::Stop {
                break;
            }
            i.skip(field.field_type)?;
            i.read_field_end()?;
        }
        i.read_struct_end()?;
        Ok(Self { outcome: ResultOutcome::Void })
    }
}

impl ResultEnvelope for TestInternalErrorResult {
    type Success = ();
    type Exception = std::convert::Infallible;

    fn from_success((): Self::Success) -> Self {
        Self { outcome: ResultOutcome::Void }
    }

    fn from_exception(exc: Self::Exception) -> Self {
        match exc {}
    }

    fn into_outcome(self) -> ResultOutcome<Self::Success, Self::Exception> {
        self.outcome
    }

    fn declares_success() -> bool {
        false
    }
}

fn missing_field(name: &'static str) -> thrift::Error {
    thrift::Error::Protocol(thrift::ProtocolError::new(
        thrift::ProtocolErrorKind::InvalidData,
        format!("missing required field '{name}'"),
    ))
}

/// A handler-raised failure that is not a schema-declared exception — the
/// originating error's type name and message are carried through to become
/// `ServerError::Internal` (`spec.md` §8 scenario 5).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct InternalFailure {
    /// The originating error's type name, e.g. `"RuntimeError"`.
    pub class: &'static str,
    /// The originating error's display message.
    pub message: String,
}

impl InternalFailure {
    /// Build an internal failure from any error that has a class name.
    pub fn new(class: &'static str, message: impl Into<String>) -> Self {
        Self { class, message: message.into() }
    }
}

impl From<io::Error> for InternalFailure {
    fn from(err: io::Error) -> Self {
        Self::new("IoError", err.to_string())
    }
}

/// `do_operation`'s failure modes: the declared `DivideByZero` exception, or
/// any other unhandled error.
#[derive(Debug, Error)]
pub enum DoOperationFailure {
    /// The declared `DivideByZero` exception.
    #[error(transparent)]
    DivideByZero(#[from] DivideByZero),
    /// Any other unhandled error.
    #[error(transparent)]
    Internal(#[from] InternalFailure),
}

/// `set_variables`'s failure modes: the declared `OhNo` exception, or any
/// other unhandled error.
#[derive(Debug, Error)]
pub enum SetVariablesFailure {
    /// The declared `OhNo` exception.
    #[error(transparent)]
    OhNo(#[from] OhNo),
    /// Any other unhandled error.
    #[error(transparent)]
    Internal(#[from] InternalFailure),
}

/// Business logic for `CalculatorService`, supplied by the embedding
/// application. Mirrors what generated service-trait code would declare.
#[async_trait::async_trait]
pub trait CalculatorServiceHandler: Send + Sync {
    /// `do_operation(op, operand_one, operand_two) -> i32 throws (DivideByZero)`.
    async fn do_operation(&self, op: Operation, operand_one: i32, operand_two: i32) -> Result<i32, DoOperationFailure>;

    /// `set_variables(reason, req) -> RetVal throws (OhNo)`.
    async fn set_variables(&self, reason: String, req: Vars) -> Result<RetVal, SetVariablesFailure>;

    /// `test_internal_error() -> void`.
    async fn test_internal_error(&self) -> Result<(), InternalFailure>;
}

/// Wires a [`CalculatorServiceHandler`] into `thtp`'s [`ServiceDispatch`].
pub struct CalculatorServiceDispatch<H> {
    handler: H,
}

impl<H: CalculatorServiceHandler> CalculatorServiceDispatch<H> {
    /// Wrap `handler` as a dispatchable service.
    #[must_use]
    pub const fn new(handler: H) -> Self {
        Self { handler }
    }
}

const RPC_NAMES: &[&str] = &["do_operation", "set_variables", "test_internal_error"];

#[async_trait::async_trait]
impl<H: CalculatorServiceHandler> ServiceDispatch for CalculatorServiceDispatch<H> {
    fn rpc_names(&self) -> &[&str] {
        RPC_NAMES
    }

    async fn dispatch(&self, rpc_name: &str, args: &[u8], protocol: Protocol) -> Result<Reply, ServerError> {
        match rpc_name {
            "do_operation" => {
                let args: DoOperationArgs = deserialize_args(args, protocol).map_err(ServerError::Deserialization)?;
                match self.handler.do_operation(args.op, args.operand_one, args.operand_two).await {
                    Ok(value) => {
                        let body = serialize_success::<DoOperationResult>(value, protocol)
                            .map_err(ServerError::Serialization)?;
                        Ok(Reply { body, exception_message: None })
                    }
                    Err(DoOperationFailure::DivideByZero(exc)) => {
                        let message = exc.to_string();
                        let body = serialize_exception::<DoOperationResult>(exc, protocol)
                            .map_err(ServerError::Serialization)?;
                        Ok(Reply { body, exception_message: Some(message) })
                    }
                    Err(DoOperationFailure::Internal(failure)) => {
                        Err(ServerError::Internal { class: failure.class, message: failure.message })
                    }
                }
            }
            "set_variables" => {
                let args: SetVariablesArgs = deserialize_args(args, protocol).map_err(ServerError::Deserialization)?;
                match self.handler.set_variables(args.reason, args.req).await {
                    Ok(value) => {
                        let body = serialize_success::<SetVariablesResult>(value, protocol)
                            .map_err(ServerError::Serialization)?;
                        Ok(Reply { body, exception_message: None })
                    }
                    Err(SetVariablesFailure::OhNo(exc)) => {
                        let message = exc.to_string();
                        let body = serialize_exception::<SetVariablesResult>(exc, protocol)
                            .map_err(ServerError::Serialization)?;
                        Ok(Reply { body, exception_message: Some(message) })
                    }
                    Err(SetVariablesFailure::Internal(failure)) => {
                        Err(ServerError::Internal { class: failure.class, message: failure.message })
                    }
                }
            }
            "test_internal_error" => {
                let _args: TestInternalErrorArgs =
                    deserialize_args(args, protocol).map_err(ServerError::Deserialization)?;
                match self.handler.test_internal_error().await {
                    Ok(()) => {
                        let body = serialize_success::<TestInternalErrorResult>((), protocol)
                            .map_err(ServerError::Serialization)?;
                        Ok(Reply { body, exception_message: None })
                    }
                    Err(failure) => Err(ServerError::Internal { class: failure.class, message: failure.message }),
                }
            }
            other => Err(ServerError::UnknownRpc(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use thtp::envelope::serialize_args;

    use super::*;

    struct Calculator;

    #[async_trait::async_trait]
    impl CalculatorServiceHandler for Calculator {
        async fn do_operation(
            &self,
            op: Operation,
            operand_one: i32,
            operand_two: i32,
        ) -> Result<i32, DoOperationFailure> {
            match op {
                Operation::Add => Ok(operand_one + operand_two),
                Operation::Subtract => Ok(operand_one - operand_two),
                Operation::Multiply => Ok(operand_one * operand_two),
                Operation::Divide => {
                    if operand_two == 0 {
                        Err(DivideByZero { error_string: "nope".to_owned(), zero: 0 }.into())
                    } else {
                        Ok(operand_one / operand_two)
                    }
                }
            }
        }

        async fn set_variables(&self, _reason: String, req: Vars) -> Result<RetVal, SetVariablesFailure> {
            Ok(RetVal { val: req.value })
        }

        async fn test_internal_error(&self) -> Result<(), InternalFailure> {
            Err(InternalFailure::new("RuntimeError", "boom"))
        }
    }

    #[tokio::test]
    async fn do_operation_success() {
        let dispatch = CalculatorServiceDispatch::new(Calculator);
        let args = DoOperationArgs { op: Operation::Add, operand_one: 2, operand_two: 3 };
        let encoded = serialize_args(&args, Protocol::Compact).expect("encode");
        let reply = dispatch.dispatch("do_operation", &encoded, Protocol::Compact).await.expect("dispatch");
        assert!(reply.exception_message.is_none());
    }

    #[tokio::test]
    async fn do_operation_divide_by_zero_is_schema_exception() {
        let dispatch = CalculatorServiceDispatch::new(Calculator);
        let args = DoOperationArgs { op: Operation::Divide, operand_one: 1, operand_two: 0 };
        let encoded = serialize_args(&args, Protocol::Compact).expect("encode");
        let reply = dispatch.dispatch("do_operation", &encoded, Protocol::Compact).await.expect("dispatch");
        assert_eq!(reply.exception_message.as_deref(), Some("nope"));
    }

    #[tokio::test]
    async fn test_internal_error_is_server_error() {
        let dispatch = CalculatorServiceDispatch::new(Calculator);
        let args = TestInternalErrorArgs;
        let encoded = serialize_args(&args, Protocol::Compact).expect("encode");
        let err = dispatch
            .dispatch("test_internal_error", &encoded, Protocol::Compact)
            .await
            .expect_err("handler fails");
        assert_eq!(err.to_string(), "internal error (RuntimeError): boom");
    }
}
