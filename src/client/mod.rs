//! Client dispatcher: the RPC call path (`spec.md` §4.3, §7, C7).

pub mod pool;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::timeout;

use crate::{
    config::ClientConfig,
    envelope::{ResultEnvelope, ResultOutcome, ThriftEnvelope, deserialize_reply, serialize_args},
    error::ClientError,
    middleware::{Dispatch, MiddlewareStack, Opts},
    protocol::Protocol,
};

/// A Thrift-RPC-over-HTTP client bound to one service.
///
/// Connections are `reqwest::Client` handles checked out of a [`bb8`] pool
/// (see [`pool::HttpConnectionManager`]); because a handle is itself a cheap
/// reference to `reqwest`'s own internally pooled sockets, "discarding" a
/// connection on timeout (`spec.md` §7, §8 scenario 6) does not require a
/// bespoke pool eviction — the in-flight HTTP/1.1 exchange is simply dropped
/// without completing, and the handle is still fit to reuse for the next
/// call.
#[derive(Clone)]
pub struct ThtpClient {
    inner: Arc<Inner>,
}

struct Inner {
    config: ClientConfig,
    service_path: String,
    pool: bb8::Pool<pool::HttpConnectionManager>,
    middleware: Arc<MiddlewareStack>,
}

impl ThtpClient {
    /// Build a client for `service_path` against `config`.
    ///
    /// # Errors
    /// Returns a `reqwest::Error` if the connection pool cannot build its
    /// first client handle.
    pub async fn new(
        service_path: impl Into<String>,
        config: ClientConfig,
        middleware: Arc<MiddlewareStack>,
    ) -> Result<Self, reqwest::Error> {
        let http_pool = pool::build_pool(&config).await?;
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                service_path: service_path.into(),
                pool: http_pool,
                middleware,
            }),
        })
    }

    /// Call `rpc_name` with already-encoded `args` and decode the result.
    ///
    /// # Errors
    /// Returns [`ClientError`] for every failure mode in `spec.md` §7: an
    /// unreachable server, an elapsed RPC timeout, a non-200/500 status, a
    /// decoded `ApplicationException`, or a (de)serialisation failure.
    pub async fn call<A, R>(
        &self,
        rpc_name: &str,
        args: &A,
        protocol: Protocol,
    ) -> Result<ResultOutcome<R::Success, R::Exception>, ClientError>
    where
        A: ThriftEnvelope,
        R: ResultEnvelope,
    {
        let encoded = serialize_args(args, protocol).map_err(ClientError::Serialization)?;
        let terminal: Box<dyn Dispatch> = Box::new(HttpTerminal {
            inner: Arc::clone(&self.inner),
            protocol,
        });
        let chain = self.inner.middleware.compose(terminal);
        let reply_bytes = chain.dispatch(rpc_name, encoded, &Opts::new()).await?;
        let outcome =
            deserialize_reply::<R>(&reply_bytes, protocol).map_err(ClientError::Deserialization)?;

        if R::declares_success() && matches!(outcome, ResultOutcome::Void) {
            return Err(ClientError::BadResponse(format!(
                "'{rpc_name}' declares a success field but the reply set none"
            )));
        }
        Ok(outcome)
    }
}

async fn send(inner: &Inner, rpc_name: &str, body: Vec<u8>, protocol: Protocol) -> Result<Vec<u8>, ClientError> {
    let conn = inner
        .pool
        .get()
        .await
        .map_err(|err| ClientError::ServerUnreachable(err.to_string()))?;

    let url = format!("{}/{}/{}", inner.config.base_url(), inner.service_path, rpc_name);
    let request = conn
        .post(url)
        .header(http::header::CONTENT_TYPE, protocol.content_type())
        .body(body);

    // `rpc_timeout` bounds the whole response, not just the headers: a peer
    // that answers promptly then stalls mid-body must still time out.
    let (status, bytes) = timeout(inner.config.rpc_timeout, async move {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        Ok::<_, reqwest::Error>((status, bytes))
    })
    .await
    .map_err(|_| ClientError::RpcTimeout(rpc_name.to_owned()))?
    .map_err(|err| ClientError::ServerUnreachable(err.to_string()))?;

    if status == http::StatusCode::OK {
        Ok(bytes.to_vec())
    } else if status == http::StatusCode::INTERNAL_SERVER_ERROR {
        let app_err = decode_application_error(&bytes, protocol).map_err(ClientError::Application)?;
        Err(ClientError::Application(thrift::Error::Application(app_err)))
    } else {
        Err(ClientError::UnknownMessageType(status.as_u16()))
    }
}

struct HttpTerminal {
    inner: Arc<Inner>,
    protocol: Protocol,
}

#[async_trait]
impl Dispatch for HttpTerminal {
    async fn dispatch(&self, rpc_name: &str, args: Vec<u8>, _opts: &Opts) -> Result<Vec<u8>, ClientError> {
        send(&self.inner, rpc_name, args, self.protocol).await
    }
}

fn decode_application_error(bytes: &[u8], protocol: Protocol) -> thrift::Result<thrift::ApplicationError> {
    use std::io::Cursor;

    use thrift::protocol::{TBinaryInputProtocol, TCompactInputProtocol, TInputProtocol, TJsonInputProtocol};

    let mut cursor = Cursor::new(bytes);
    let mut input: Box<dyn TInputProtocol> = match protocol {
        Protocol::Binary => Box::new(TBinaryInputProtocol::new(&mut cursor, true)),
        Protocol::Compact => Box::new(TCompactInputProtocol::new(&mut cursor)),
        Protocol::Json => Box::new(TJsonInputProtocol::new(&mut cursor)),
    };
    thrift::Error::read_application_error_from_in_protocol(input.as_mut())
}
