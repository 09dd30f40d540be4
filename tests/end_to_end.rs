//! End-to-end scenarios from `spec.md` §8.

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http::{Method, Request, StatusCode};
use test_support::{
    CalculatorServiceDispatch, CalculatorServiceHandler, DivideByZero, DoOperationFailure, InternalFailure, RetVal,
    SetVariablesFailure, Vars,
};
use thtp::config::ClientConfig;
use thtp::middleware::MiddlewareStack;
use thtp::protocol::Protocol;
use thtp::pubsub::{Bus, Subscriber};
use thtp::server::ServiceDispatch;
use thtp::{ResultOutcome, ThtpClient, ThtpService};

const SERVICE_PATH: &str = "thtp.test.calculator_service";

struct Calculator;

#[async_trait::async_trait]
impl CalculatorServiceHandler for Calculator {
    async fn do_operation(&self, op: test_support::Operation, a: i32, b: i32) -> Result<i32, DoOperationFailure> {
        use test_support::Operation::{Add, Divide, Multiply, Subtract};
        match op {
            Add => Ok(a + b),
            Subtract => Ok(a - b),
            Multiply => Ok(a * b),
            Divide => {
                if b == 0 {
                    Err(DivideByZero { error_string: "nope".to_owned(), zero: 0 }.into())
                } else {
                    Ok(a / b)
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

/// A handler whose `test_internal_error` succeeds, for the void-reply
/// round-trip test below.
struct AlwaysSucceeds;

#[async_trait::async_trait]
impl CalculatorServiceHandler for AlwaysSucceeds {
    async fn do_operation(&self, _op: test_support::Operation, a: i32, b: i32) -> Result<i32, DoOperationFailure> {
        Ok(a + b)
    }

    async fn set_variables(&self, _reason: String, req: Vars) -> Result<RetVal, SetVariablesFailure> {
        Ok(RetVal { val: req.value })
    }

    async fn test_internal_error(&self) -> Result<(), InternalFailure> {
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSubscriber {
    events: Mutex<Vec<String>>,
}

impl Subscriber for Arc<RecordingSubscriber> {
    fn on_success(&self, rpc: &str, elapsed_ms: u64) {
        RecordingSubscriber::on_success(self, rpc, elapsed_ms);
    }

    fn on_exception(&self, rpc: &str, message: &str, elapsed_ms: u64) {
        RecordingSubscriber::on_exception(self, rpc, message, elapsed_ms);
    }

    fn on_error(&self, rpc: Option<&str>, message: &str, elapsed_ms: u64) {
        RecordingSubscriber::on_error(self, rpc, message, elapsed_ms);
    }

    fn on_internal_error(&self, rpc: Option<&str>, message: &str, elapsed_ms: u64) {
        RecordingSubscriber::on_internal_error(self, rpc, message, elapsed_ms);
    }
}

impl Subscriber for RecordingSubscriber {
    fn on_success(&self, rpc: &str, _elapsed_ms: u64) {
        self.events.lock().expect("lock poisoned").push(format!("success:{rpc}"));
    }

    fn on_exception(&self, rpc: &str, message: &str, _elapsed_ms: u64) {
        self.events.lock().expect("lock poisoned").push(format!("exception:{rpc}:{message}"));
    }

    fn on_error(&self, rpc: Option<&str>, _message: &str, _elapsed_ms: u64) {
        self.events.lock().expect("lock poisoned").push(format!("error:{}", rpc.unwrap_or("?")));
    }

    fn on_internal_error(&self, rpc: Option<&str>, message: &str, _elapsed_ms: u64) {
        self.events
            .lock()
            .expect("lock poisoned")
            .push(format!("internal_error:{}:{message}", rpc.unwrap_or("?")));
    }
}

fn compact_body() -> Request<Bytes> {
    Request::builder()
        .method(Method::POST)
        .uri(format!("/{SERVICE_PATH}/do_operation"))
        .header(http::header::CONTENT_TYPE, Protocol::Compact.content_type())
}

fn service_with<H>(bus: Arc<Bus>, handler: H) -> ThtpService
where
    H: CalculatorServiceHandler + 'static,
{
    let dispatch: Arc<dyn ServiceDispatch> = Arc::new(CalculatorServiceDispatch::new(handler));
    ThtpService::new(SERVICE_PATH, vec![dispatch], bus, Arc::new(MiddlewareStack::new()))
}

fn service(bus: Arc<Bus>) -> ThtpService {
    service_with(bus, Calculator)
}

/// Serve `svc` over a real HTTP listener on an OS-assigned port, forwarding
/// every request straight to [`ThtpService::handle`].
async fn spawn_server(svc: Arc<ThtpService>) -> std::net::SocketAddr {
    use axum::{Router, extract::State};

    async fn proxy(State(svc): State<Arc<ThtpService>>, req: axum::extract::Request) -> axum::response::Response {
        let (parts, body) = req.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
        let request = http::Request::from_parts(parts, bytes);
        svc.handle(request).await.map(axum::body::Body::from)
    }

    let app = Router::new().fallback(proxy).with_state(svc);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

#[tokio::test]
async fn scenario_1_success_compact() {
    use test_support::{DoOperationArgs, Operation};
    use thtp::envelope::serialize_args;

    let recorder = Arc::new(RecordingSubscriber::default());
    let mut bus = Bus::new();
    bus.subscribe(Arc::clone(&recorder));
    let svc = service(Arc::new(bus));

    let args = DoOperationArgs { op: Operation::Add, operand_one: 2, operand_two: 3 };
    let body = serialize_args(&args, Protocol::Compact).expect("encode");
    let req = compact_body().body(Bytes::from(body)).expect("request");

    let resp = svc.handle(req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(http::header::CONTENT_TYPE).unwrap(), Protocol::Compact.content_type());
    assert_eq!(*recorder.events.lock().expect("lock poisoned"), vec!["success:do_operation"]);
}

#[tokio::test]
async fn scenario_2_schema_exception() {
    use test_support::{DoOperationArgs, Operation};
    use thtp::envelope::serialize_args;

    let recorder = Arc::new(RecordingSubscriber::default());
    let mut bus = Bus::new();
    bus.subscribe(Arc::clone(&recorder));
    let svc = service(Arc::new(bus));

    let args = DoOperationArgs { op: Operation::Divide, operand_one: 1, operand_two: 0 };
    let body = serialize_args(&args, Protocol::Compact).expect("encode");
    let req = compact_body().body(Bytes::from(body)).expect("request");

    let resp = svc.handle(req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let events = recorder.events.lock().expect("lock poisoned").clone();
    assert_eq!(events, vec!["exception:do_operation:nope"]);
}

#[tokio::test]
async fn scenario_3_unknown_rpc() {
    let bus = Bus::new();
    let svc = service(Arc::new(bus));
    let req = Request::builder()
        .method(Method::POST)
        .uri(format!("/{SERVICE_PATH}/ponder"))
        .header(http::header::CONTENT_TYPE, Protocol::Compact.content_type())
        .body(Bytes::new())
        .expect("request");

    let resp = svc.handle(req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn scenario_4_wrong_verb() {
    let bus = Bus::new();
    let svc = service(Arc::new(bus));
    let req = Request::builder()
        .method(Method::GET)
        .uri(format!("/{SERVICE_PATH}/do_operation"))
        .body(Bytes::new())
        .expect("request");

    let resp = svc.handle(req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn scenario_5_internal_error() {
    use test_support::TestInternalErrorArgs;
    use thtp::envelope::serialize_args;

    let recorder = Arc::new(RecordingSubscriber::default());
    let mut bus = Bus::new();
    bus.subscribe(Arc::clone(&recorder));
    let svc = service(Arc::new(bus));

    let body = serialize_args(&TestInternalErrorArgs, Protocol::Compact).expect("encode");
    let req = Request::builder()
        .method(Method::POST)
        .uri(format!("/{SERVICE_PATH}/test_internal_error"))
        .header(http::header::CONTENT_TYPE, Protocol::Compact.content_type())
        .body(Bytes::from(body))
        .expect("request");

    let resp = svc.handle(req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let events = recorder.events.lock().expect("lock poisoned").clone();
    assert_eq!(events, vec!["internal_error:test_internal_error:internal error (RuntimeError): boom"]);
}

#[tokio::test]
async fn scenario_6_client_timeout_does_not_return_connection_to_pool() {
    use std::time::Duration;

    use axum::{Router, routing::post};
    use thtp::ClientError;
    use tokio::net::TcpListener;

    async fn slow_handler() -> axum::http::StatusCode {
        tokio::time::sleep(Duration::from_secs(1)).await;
        axum::http::StatusCode::OK
    }

    let app = Router::new().route(&format!("/{SERVICE_PATH}/do_operation"), post(slow_handler));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let config = ClientConfig::new(addr.ip().to_string(), addr.port()).rpc_timeout(Duration::from_millis(10));
    let client = ThtpClient::new(SERVICE_PATH, config, Arc::new(MiddlewareStack::new()))
        .await
        .expect("client built");

    let args = test_support::DoOperationArgs { op: test_support::Operation::Add, operand_one: 1, operand_two: 1 };
    let outcome = client
        .call::<_, test_support::DoOperationResult>("do_operation", &args, Protocol::Compact)
        .await;

    assert!(matches!(outcome, Err(ClientError::RpcTimeout(ref rpc)) if rpc == "do_operation"));
}

/// The three scenarios below drive the real `ThtpClient::call` path end to
/// end over HTTP, rather than calling `ThtpService::handle` directly, so a
/// regression in the client's status-code dispatch or reply decoding would
/// be caught here.

#[tokio::test]
async fn client_success_round_trip_over_http() {
    let svc = Arc::new(service(Arc::new(Bus::new())));
    let addr = spawn_server(Arc::clone(&svc)).await;

    let config = ClientConfig::new(addr.ip().to_string(), addr.port());
    let client = ThtpClient::new(SERVICE_PATH, config, Arc::new(MiddlewareStack::new()))
        .await
        .expect("client built");

    let args = test_support::DoOperationArgs { op: test_support::Operation::Add, operand_one: 2, operand_two: 3 };
    let outcome = client
        .call::<_, test_support::DoOperationResult>("do_operation", &args, Protocol::Compact)
        .await
        .expect("call succeeds");

    assert!(matches!(outcome, ResultOutcome::Success(5)));
}

#[tokio::test]
async fn client_schema_exception_round_trip_over_http() {
    let svc = Arc::new(service(Arc::new(Bus::new())));
    let addr = spawn_server(Arc::clone(&svc)).await;

    let config = ClientConfig::new(addr.ip().to_string(), addr.port());
    let client = ThtpClient::new(SERVICE_PATH, config, Arc::new(MiddlewareStack::new()))
        .await
        .expect("client built");

    let args = test_support::DoOperationArgs { op: test_support::Operation::Divide, operand_one: 1, operand_two: 0 };
    let outcome = client
        .call::<_, test_support::DoOperationResult>("do_operation", &args, Protocol::Compact)
        .await
        .expect("a schema exception is not a transport error");

    match outcome {
        ResultOutcome::Exception(exc) => assert_eq!(exc.error_string, "nope"),
        _ => panic!("expected a schema-declared exception"),
    }
}

#[tokio::test]
async fn client_void_round_trip_over_http() {
    let svc = Arc::new(service_with(Arc::new(Bus::new()), AlwaysSucceeds));
    let addr = spawn_server(Arc::clone(&svc)).await;

    let config = ClientConfig::new(addr.ip().to_string(), addr.port());
    let client = ThtpClient::new(SERVICE_PATH, config, Arc::new(MiddlewareStack::new()))
        .await
        .expect("client built");

    let outcome = client
        .call::<_, test_support::TestInternalErrorResult>(
            "test_internal_error",
            &test_support::TestInternalErrorArgs,
            Protocol::Compact,
        )
        .await
        .expect("call succeeds");

    assert!(matches!(outcome, ResultOutcome::Void));
}
