//! Server handler (C5): HTTP request -> route match -> args decode ->
//! handler call -> reply/exception encode, publishing exactly one lifecycle
//! event per request (`spec.md` §4.5).

pub mod route;

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http::{Method, Request, Response, StatusCode};
use thrift::Error as ThriftError;
use tokio::time::Instant;
use tracing::{error, warn};

use crate::{
    config::ServerConfig,
    error::{ClientError, ServerError},
    middleware::{Dispatch, MiddlewareStack, Opts},
    protocol::Protocol,
    pubsub::{Bus, Event},
};

/// The encoded reply body for a single RPC call, already shaped as the
/// `<RPC>_result` struct (success or schema exception field set, or empty
/// for void).
pub struct Reply {
    /// Serialised `<RPC>_result` bytes.
    pub body: Vec<u8>,
    /// `Some(message)` when a schema-declared exception field was set,
    /// distinguishing `rpc_exception` from `rpc_success` for the published
    /// event; `None` for ordinary (including void) returns.
    pub exception_message: Option<String>,
}

/// A registered RPC service: the generated-code equivalent of a Thrift
/// service descriptor plus its handler (`spec.md` §3, §9).
///
/// Implementations own the per-RPC args-decode / handler-call /
/// result-encode logic; the server handler only needs to know which RPC
/// names this service answers for and how to reach `dispatch`.
#[async_trait::async_trait]
pub trait ServiceDispatch: Send + Sync {
    /// The RPC names this service declares, in schema order.
    fn rpc_names(&self) -> &[&str];

    /// Decode args, call the handler, and encode the reply for `rpc_name`.
    ///
    /// # Errors
    /// Returns [`ServerError`] for deserialisation, validation, or
    /// unhandled-exception failures. A handler raising a schema-declared
    /// exception is not an `Err` here — it is encoded into `Reply` directly.
    async fn dispatch(&self, rpc_name: &str, args: &[u8], protocol: Protocol) -> Result<Reply, ServerError>;
}

/// The server handler core: a terminal-mode THTP endpoint (`spec.md` §6).
/// A request whose path does not match the configured service prefix is
/// answered with a `BadRequestError`, not forwarded elsewhere — mounting a
/// THTP service alongside other routes is the embedding HTTP runtime's job,
/// not this core's.
pub struct ThtpService {
    service_path: String,
    handlers: Arc<[Arc<dyn ServiceDispatch>]>,
    bus: Arc<Bus>,
    middleware: Arc<MiddlewareStack>,
}

impl ThtpService {
    /// Build a server handler for `service_path` with the given handler
    /// objects, tried in order for each RPC (`spec.md` §4.5 step 4), and
    /// `middleware` composed around every handler call — the same C4 chain
    /// shape the client dispatcher uses (`spec.md` §4.4).
    #[must_use]
    pub fn new(
        service_path: impl Into<String>,
        handlers: Vec<Arc<dyn ServiceDispatch>>,
        bus: Arc<Bus>,
        middleware: Arc<MiddlewareStack>,
    ) -> Self {
        Self { service_path: service_path.into(), handlers: handlers.into(), bus, middleware }
    }

    /// Build a server handler from a [`ServerConfig`] descriptor.
    #[must_use]
    pub fn from_config(config: ServerConfig, bus: Arc<Bus>) -> Self {
        Self::new(config.service_path, config.handlers, bus, config.middleware)
    }

    /// Handle one HTTP request end to end. Never panics and never returns an
    /// `Err`: every failure is mapped to a status-500 `ApplicationException`
    /// body (`spec.md` §4.5 step 6, "the server never propagates exceptions
    /// to the host HTTP runtime").
    pub async fn handle(&self, req: Request<Bytes>) -> Response<Bytes> {
        if req.method() == Method::GET && strip_trailing_slash(req.uri().path()) == "/health" {
            return health_response();
        }

        let start = Instant::now();
        let content_type = req
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        let protocol = Protocol::resolve(content_type);

        let path = req.uri().path().to_owned();
        let method = req.method().clone();
        let body = req.into_body();

        let outcome = self.process(&method, &path, &body, protocol).await;
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match outcome {
            Ok((rpc_name, reply)) => {
                if let Some(message) = reply.exception_message {
                    self.bus.publish(&Event::Exception { rpc: rpc_name, message, elapsed_ms });
                } else {
                    self.bus.publish(&Event::Success { rpc: rpc_name, elapsed_ms });
                }
                reply_response(protocol, reply.body)
            }
            Err((rpc_name, err)) => {
                if matches!(err, ServerError::Internal { .. }) {
                    self.bus.publish(&Event::InternalError { rpc: rpc_name, message: err.to_string(), elapsed_ms });
                    error!(error = %err, "internal error handling request");
                } else {
                    self.bus.publish(&Event::Error { rpc: rpc_name, message: err.to_string(), elapsed_ms });
                    warn!(error = %err, "request failed");
                }
                error_response(protocol, &err)
            }
        }
    }

    async fn process(
        &self,
        method: &Method,
        path: &str,
        body: &[u8],
        protocol: Protocol,
    ) -> Result<(String, Reply), (Option<String>, ServerError)> {
        if *method != Method::POST {
            return Err((None, ServerError::BadRequest(format!("method {method} not allowed"))));
        }

        let rpc_name = match route::match_route(path, &self.service_path) {
            route::RouteMatch::Rpc(name) => name.to_owned(),
            route::RouteMatch::MalformedRpcName => {
                return Err((None, ServerError::BadRequest(format!("malformed RPC name in path {path}"))));
            }
            route::RouteMatch::NoMatch => {
                return Err((None, ServerError::BadRequest(format!("path {path} does not match service"))));
            }
        };

        let exception_slot = Arc::new(Mutex::new(None));
        let terminal: Box<dyn Dispatch> = Box::new(HandlerTerminal {
            handlers: Arc::clone(&self.handlers),
            protocol,
            exception_slot: Arc::clone(&exception_slot),
        });
        let chain = self.middleware.compose(terminal);

        match chain.dispatch(&rpc_name, body.to_vec(), &Opts::new()).await {
            Ok(reply_body) => {
                let exception_message = exception_slot.lock().expect("lock poisoned").take();
                Ok((rpc_name, Reply { body: reply_body, exception_message }))
            }
            Err(err) => Err((Some(rpc_name), ServerError::from(err))),
        }
    }
}

/// The terminal [`Dispatch`] the server's middleware chain wraps: looks up
/// the handler declaring `rpc_name` and calls it. `Reply::exception_message`
/// does not fit [`Dispatch`]'s `Vec<u8>` return type, so it is stashed in
/// `exception_slot` for [`ThtpService::process`] to read back after the
/// chain completes.
struct HandlerTerminal {
    handlers: Arc<[Arc<dyn ServiceDispatch>]>,
    protocol: Protocol,
    exception_slot: Arc<Mutex<Option<String>>>,
}

#[async_trait::async_trait]
impl Dispatch for HandlerTerminal {
    async fn dispatch(&self, rpc_name: &str, args: Vec<u8>, _opts: &Opts) -> Result<Vec<u8>, ClientError> {
        let handler = self.handlers.iter().find(|h| h.rpc_names().contains(&rpc_name));
        let Some(handler) = handler else {
            return Err(ClientError::from(ServerError::UnknownRpc(rpc_name.to_owned())));
        };
        let reply = handler.dispatch(rpc_name, &args, self.protocol).await.map_err(ClientError::from)?;
        *self.exception_slot.lock().expect("lock poisoned") = reply.exception_message;
        Ok(reply.body)
    }
}

fn strip_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

fn health_response() -> Response<Bytes> {
    Response::builder()
        .status(StatusCode::OK)
        .header(http::header::CONTENT_TYPE, "text/plain")
        .body(Bytes::from_static(b"Everything is OK"))
        .unwrap_or_else(|_| Response::new(Bytes::new()))
}

fn reply_response(protocol: Protocol, body: Vec<u8>) -> Response<Bytes> {
    Response::builder()
        .status(StatusCode::OK)
        .header(http::header::CONTENT_TYPE, protocol.content_type())
        .body(Bytes::from(body))
        .unwrap_or_else(|_| Response::new(Bytes::new()))
}

fn error_response(protocol: Protocol, err: &ServerError) -> Response<Bytes> {
    let app_err = err.to_application_error();
    let body = encode_application_error(&app_err, protocol).unwrap_or_default();
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(http::header::CONTENT_TYPE, protocol.content_type())
        .body(Bytes::from(body))
        .unwrap_or_else(|_| Response::new(Bytes::new()))
}

/// Encode a Thrift `ApplicationException` directly as the response body
/// (no outer message envelope — see [`crate::envelope`]).
fn encode_application_error(err: &thrift::ApplicationError, protocol: Protocol) -> thrift::Result<Vec<u8>> {
    use thrift::protocol::{TBinaryOutputProtocol, TCompactOutputProtocol, TJsonOutputProtocol};

    let mut sink: Vec<u8> = Vec::new();
    match protocol {
        Protocol::Binary => {
            let mut out = TBinaryOutputProtocol::new(&mut sink, true);
            ThriftError::write_application_error_to_out_protocol(err, &mut out)?;
        }
        Protocol::Compact => {
            let mut out = TCompactOutputProtocol::new(&mut sink);
            ThriftError::write_application_error_to_out_protocol(err, &mut out)?;
        }
        Protocol::Json => {
            let mut out = TJsonOutputProtocol::new(&mut sink);
            ThriftError::write_application_error_to_out_protocol(err, &mut out)?;
        }
    }
    Ok(sink)
}
