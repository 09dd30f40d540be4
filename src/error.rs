//! Error taxonomy: server and client error kinds and their wire mapping.
//!
//! Every server-side kind carries a Thrift `ApplicationException` type code
//! (`thrift::ApplicationErrorKind`) so a status-500 reply can always be
//! encoded; client-side kinds do not cross the wire at all (see `spec.md`
//! §7).

use thiserror::Error;
use thrift::{ApplicationError, ApplicationErrorKind};

/// Errors raised while handling a request on the server side.
///
/// A handler raising a schema-declared Thrift exception is not represented
/// here: that path is encoded straight back into the result envelope at
/// status `200` (see [`crate::envelope`]) and never becomes a `ServerError`.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Method was not POST, or the path does not match the service route.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Path matched the service prefix but the RPC name is not declared.
    #[error("unknown RPC '{0}'")]
    UnknownRpc(String),
    /// Reply value had no matching result-struct field, or (client-side use
    /// of the same kind) no field was set on decode.
    #[error("no matching result field: {0}")]
    BadResponse(String),
    /// Encoding the reply or error body failed.
    #[error("serialization failed: {0}")]
    Serialization(#[source] thrift::Error),
    /// Decoding the request args failed (protocol exception or early EOF).
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] thrift::Error),
    /// Schema `validate()` failed on inbound args or outbound result.
    #[error("validation failed: {0}")]
    Validation(String),
    /// Any otherwise-unhandled exception raised by a handler.
    #[error("internal error ({class}): {message}")]
    Internal {
        /// Type name of the originating error, for the wire message (see
        /// `spec.md` §8 scenario 5).
        class: &'static str,
        /// Display text of the originating error.
        message: String,
    },
}

impl ServerError {
    /// The Thrift application-exception type code this error maps to.
    #[must_use]
    pub const fn kind(&self) -> ApplicationErrorKind {
        match self {
            Self::BadRequest(_) => ApplicationErrorKind::UnknownMethod,
            Self::UnknownRpc(_) => ApplicationErrorKind::WrongMethodName,
            Self::BadResponse(_) => ApplicationErrorKind::MissingResult,
            Self::Serialization(_) | Self::Deserialization(_) => ApplicationErrorKind::ProtocolError,
            Self::Validation(_) => ApplicationErrorKind::Unknown,
            Self::Internal { .. } => ApplicationErrorKind::InternalError,
        }
    }

    /// Build the wire-level `ApplicationException` for this error.
    #[must_use]
    pub fn to_application_error(&self) -> ApplicationError {
        ApplicationError::new(self.kind(), self.to_string())
    }
}

/// Errors produced by a [`crate::middleware::Dispatch`] chain.
///
/// This is the shared C4 error channel for both sides: on the client it
/// describes why a call could not be completed or interpreted locally (none
/// of those variants cross the wire); on the server it is what
/// [`crate::server::ThtpService`] uses internally to carry a handler failure
/// back out through the middleware stack before translating it to a
/// [`ServerError`] for the HTTP response (`spec.md` §4.4's "shared by both
/// client and server").
#[derive(Debug, Error)]
pub enum ClientError {
    /// Response status was neither 200 nor 500.
    #[error("unexpected response status {0}")]
    UnknownMessageType(u16),
    /// Connection refused or the connect timeout elapsed.
    #[error("server unreachable: {0}")]
    ServerUnreachable(String),
    /// The per-call receive timeout elapsed; the connection is discarded
    /// rather than returned to the pool.
    #[error("RPC '{0}' timed out")]
    RpcTimeout(String),
    /// Schema `validate()` failed before the request was sent.
    #[error("validation failed: {0}")]
    Validation(String),
    /// No field was set on decode and the result struct declares a
    /// `success` field (so `None` cannot mean void).
    #[error("no matching result field: {0}")]
    BadResponse(String),
    /// Decoding the reply failed (protocol exception or early EOF).
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] thrift::Error),
    /// Encoding the request args failed.
    #[error("serialization failed: {0}")]
    Serialization(#[source] thrift::Error),
    /// The server's status-500 body decoded to an `ApplicationException`.
    #[error("application exception: {0}")]
    Application(#[source] thrift::Error),
    /// Checking out a connection from the pool timed out.
    #[error("pool checkout timed out")]
    PoolTimeout,
    /// Server-side only: method was not POST, or the path does not match
    /// the service route.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Server-side only: path matched the service prefix but the RPC name
    /// is not declared.
    #[error("unknown RPC '{0}'")]
    UnknownRpc(String),
    /// Server-side only: a handler raised an error that is not a
    /// schema-declared exception.
    #[error("internal error ({class}): {message}")]
    Internal {
        /// Type name of the originating error.
        class: &'static str,
        /// Display text of the originating error.
        message: String,
    },
}

impl From<ServerError> for ClientError {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::BadRequest(message) => Self::BadRequest(message),
            ServerError::UnknownRpc(rpc_name) => Self::UnknownRpc(rpc_name),
            ServerError::BadResponse(message) => Self::BadResponse(message),
            ServerError::Serialization(source) => Self::Serialization(source),
            ServerError::Deserialization(source) => Self::Deserialization(source),
            ServerError::Validation(message) => Self::Validation(message),
            ServerError::Internal { class, message } => Self::Internal { class, message },
        }
    }
}

impl From<ClientError> for ServerError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::BadRequest(message) => Self::BadRequest(message),
            ClientError::UnknownRpc(rpc_name) => Self::UnknownRpc(rpc_name),
            ClientError::BadResponse(message) => Self::BadResponse(message),
            ClientError::Serialization(source) => Self::Serialization(source),
            ClientError::Deserialization(source) => Self::Deserialization(source),
            ClientError::Validation(message) => Self::Validation(message),
            ClientError::Internal { class, message } => Self::Internal { class, message },
            // A middleware is free to produce a client-only kind even on the
            // server's terminal dispatch path; fold it into a generic
            // internal error rather than discarding the detail.
            ClientError::UnknownMessageType(status) => {
                Self::Internal { class: "UnknownMessageType", message: format!("unexpected status {status}") }
            }
            ClientError::ServerUnreachable(message) => Self::Internal { class: "ServerUnreachable", message },
            ClientError::RpcTimeout(rpc_name) => {
                Self::Internal { class: "RpcTimeout", message: format!("RPC '{rpc_name}' timed out") }
            }
            ClientError::Application(source) => Self::Internal { class: "Application", message: source.to_string() },
            ClientError::PoolTimeout => {
                Self::Internal { class: "PoolTimeout", message: "pool checkout timed out".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_kinds_match_spec_table() {
        assert_eq!(
            ServerError::BadRequest(String::new()).kind(),
            ApplicationErrorKind::UnknownMethod
        );
        assert_eq!(
            ServerError::UnknownRpc(String::new()).kind(),
            ApplicationErrorKind::WrongMethodName
        );
        assert_eq!(
            ServerError::BadResponse(String::new()).kind(),
            ApplicationErrorKind::MissingResult
        );
        assert_eq!(
            ServerError::Internal {
                class: "Foo",
                message: String::new()
            }
            .kind(),
            ApplicationErrorKind::InternalError
        );
    }

    #[test]
    fn internal_error_message_matches_scenario_5() {
        let err = ServerError::Internal {
            class: "RuntimeError",
            message: "boom".to_owned(),
        };
        assert_eq!(err.to_string(), "internal error (RuntimeError): boom");
    }

    #[test]
    fn server_error_round_trips_through_client_error() {
        let err = ServerError::Internal { class: "RuntimeError", message: "boom".to_owned() };
        let round_tripped = ServerError::from(ClientError::from(err));
        assert_eq!(round_tripped.to_string(), "internal error (RuntimeError): boom");
    }
}
