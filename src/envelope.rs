//! Envelope codec: bridges `<RPC>_args` / `<RPC>_result` wrapper structs to
//! native argument lists and return values (`spec.md` §4.2).
//!
//! The Thrift schema compiler is out of scope (`spec.md` §1), so the traits
//! below stand in for what generated code would implement: each
//! `<RPC>_args`/`<RPC>_result` type writes and reads itself directly through
//! a `thrift` protocol object, matching the inherent-method shape real
//! generated code uses (`write_to_out_protocol`/`read_from_in_protocol`).
//! There is no outer `TMessageIdentifier` envelope here — HTTP framing
//! (status code + `Content-Type`) already carries what the classic Thrift
//! message envelope would, so the struct is serialised directly as the HTTP
//! body.

use std::io::Cursor;

use thrift::protocol::{
    TBinaryInputProtocol, TBinaryOutputProtocol, TCompactInputProtocol, TCompactOutputProtocol,
    TInputProtocol, TJsonInputProtocol, TJsonOutputProtocol, TOutputProtocol,
};

use crate::protocol::Protocol;

/// A wire-serialisable Thrift struct: an `<RPC>_args` or `<RPC>_result`
/// wrapper as generated code would produce it.
pub trait ThriftEnvelope: Sized {
    /// Write this struct's fields to `proto`.
    ///
    /// # Errors
    /// Returns any protocol error the underlying writer reports.
    fn write_envelope(&self, proto: &mut dyn TOutputProtocol) -> thrift::Result<()>;

    /// Read a struct of this type from `proto`.
    ///
    /// # Errors
    /// Returns a protocol error on a malformed struct or premature EOF.
    fn read_envelope(proto: &mut dyn TInputProtocol) -> thrift::Result<Self>;
}

/// The three legal shapes of a decoded `<RPC>_result` struct (`spec.md` §3).
pub enum ResultOutcome<S, E> {
    /// The `success` field was set.
    Success(S),
    /// A schema-declared exception field was set.
    Exception(E),
    /// No field was set: a void return.
    Void,
}

/// A `<RPC>_result` wrapper struct, generalised over its `success` type and
/// the (enum of) schema-declared exceptions it can carry.
///
/// Implementations precompute the `runtime_type -> field` mapping that the
/// original reflection-based source resolves at call time (`spec.md` §9):
/// [`from_success`](ResultEnvelope::from_success) and
/// [`from_exception`](ResultEnvelope::from_exception) are that mapping,
/// expressed as ordinary Rust constructors instead of a lookup table.
pub trait ResultEnvelope: ThriftEnvelope {
    /// The RPC's return type, or `()` for a void RPC.
    type Success;
    /// The schema-declared exceptions this RPC can raise, or
    /// [`std::convert::Infallible`] if it declares none.
    type Exception;

    /// Build a result struct with the `success` field set. Void RPCs use
    /// `Success = ()` and ignore the value, producing an empty struct.
    fn from_success(value: Self::Success) -> Self;

    /// Attempt to build a result struct from a schema-declared exception.
    fn from_exception(exc: Self::Exception) -> Self;

    /// Decompose a decoded result struct into its one set field, if any.
    fn into_outcome(self) -> ResultOutcome<Self::Success, Self::Exception>;

    /// Whether this RPC declares a `success` field at all. Void RPCs (whose
    /// `Success` type is `()`) override this to `false`; it governs whether
    /// an empty decoded result is legal (`spec.md` §4.2).
    fn declares_success() -> bool {
        true
    }
}

/// Construct a protocol pair (input unused) purely for its output half, over
/// an in-memory byte sink. Returns the finished bytes.
fn with_output_protocol<F>(protocol: Protocol, write: F) -> thrift::Result<Vec<u8>>
where
    F: FnOnce(&mut dyn TOutputProtocol) -> thrift::Result<()>,
{
    let mut sink: Vec<u8> = Vec::new();
    {
        let mut out: Box<dyn TOutputProtocol> = match protocol {
            Protocol::Binary => Box::new(TBinaryOutputProtocol::new(&mut sink, true)),
            Protocol::Compact => Box::new(TCompactOutputProtocol::new(&mut sink)),
            Protocol::Json => Box::new(TJsonOutputProtocol::new(&mut sink)),
        };
        write(out.as_mut())?;
    }
    Ok(sink)
}

/// Construct an input protocol over `bytes` and hand it to `read`.
fn with_input_protocol<F, T>(protocol: Protocol, bytes: &[u8], read: F) -> thrift::Result<T>
where
    F: FnOnce(&mut dyn TInputProtocol) -> thrift::Result<T>,
{
    let mut cursor = Cursor::new(bytes);
    let mut input: Box<dyn TInputProtocol> = match protocol {
        Protocol::Binary => Box::new(TBinaryInputProtocol::new(&mut cursor, true)),
        Protocol::Compact => Box::new(TCompactInputProtocol::new(&mut cursor)),
        Protocol::Json => Box::new(TJsonInputProtocol::new(&mut cursor)),
    };
    read(input.as_mut())
}

/// Serialise an `<RPC>_args` struct to bytes under the given protocol
/// (client path; `spec.md` §4.2 "Serialise-args").
///
/// The caller is responsible for having already assigned positional
/// arguments to the struct's fields in declared field-id order — generated
/// code does this as ordinary struct construction, with no runtime
/// reflection involved (`spec.md` §9).
///
/// # Errors
/// Returns an error if the protocol encoder fails.
pub fn serialize_args<A: ThriftEnvelope>(args: &A, protocol: Protocol) -> thrift::Result<Vec<u8>> {
    with_output_protocol(protocol, |out| args.write_envelope(out))
}

/// Deserialise an `<RPC>_args` struct from bytes under the given protocol
/// (server path; `spec.md` §4.2 "Deserialise-args").
///
/// # Errors
/// Returns an error on a protocol exception or premature end-of-stream.
pub fn deserialize_args<A: ThriftEnvelope>(bytes: &[u8], protocol: Protocol) -> thrift::Result<A> {
    with_input_protocol(protocol, bytes, A::read_envelope)
}

/// Serialise an `<RPC>_result` struct representing a successful (possibly
/// void) reply (server path; `spec.md` §4.2 "Serialise-reply").
///
/// # Errors
/// Returns an error if the protocol encoder fails.
pub fn serialize_success<R: ResultEnvelope>(
    value: R::Success,
    protocol: Protocol,
) -> thrift::Result<Vec<u8>> {
    let result = R::from_success(value);
    with_output_protocol(protocol, |out| result.write_envelope(out))
}

/// Serialise an `<RPC>_result` struct carrying a schema-declared exception
/// (server path, the `dvz_exception`-style branch of `spec.md` §4.2).
///
/// # Errors
/// Returns an error if the protocol encoder fails.
pub fn serialize_exception<R: ResultEnvelope>(
    exc: R::Exception,
    protocol: Protocol,
) -> thrift::Result<Vec<u8>> {
    let result = R::from_exception(exc);
    with_output_protocol(protocol, |out| result.write_envelope(out))
}

/// Deserialise an `<RPC>_result` struct and resolve it to the caller's
/// outcome (client path; `spec.md` §4.2 "Deserialise-reply").
///
/// # Errors
/// Returns an error if decoding the struct itself fails. A struct decoded
/// with no field set is returned as [`ResultOutcome::Void`]; whether that is
/// legal for this RPC is for the caller to check against
/// [`ResultEnvelope::declares_success`] (`BadResponseError` in `spec.md` §7).
pub fn deserialize_reply<R: ResultEnvelope>(
    bytes: &[u8],
    protocol: Protocol,
) -> thrift::Result<ResultOutcome<R::Success, R::Exception>> {
    let result = with_input_protocol(protocol, bytes, R::read_envelope)?;
    Ok(result.into_outcome())
}
