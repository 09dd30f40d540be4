//! Pub/sub bus: synchronous, ordered, best-effort delivery of request
//! lifecycle events (`spec.md` §4.6).
//!
//! Subscribers are registered before first publish; the list is sealed at
//! first publish, mirroring [`crate::middleware::MiddlewareStack`]. A
//! subscriber that panics when handling an event aborts delivery to the
//! remaining subscribers for that event — this is documented behaviour, not
//! a bug (`spec.md` §4.6, §9), so it must not be "upgraded" to a
//! best-effort-all-subscribers contract.

use std::{
    panic::AssertUnwindSafe,
    sync::atomic::{AtomicBool, Ordering},
};

use tracing::warn;

/// One of the four lifecycle events the server handler publishes, exactly
/// one per request (`spec.md` §4.5 step 7).
#[derive(Debug, Clone)]
pub enum Event {
    /// The handler returned normally (including void).
    Success {
        /// RPC name, when known.
        rpc: String,
        /// Wall-clock elapsed time for the request.
        elapsed_ms: u64,
    },
    /// The handler raised a schema-declared exception.
    Exception {
        /// RPC name, when known.
        rpc: String,
        /// Display text of the raised exception.
        message: String,
        /// Wall-clock elapsed time for the request.
        elapsed_ms: u64,
    },
    /// A non-schema server error occurred (bad request, unknown RPC,
    /// (de)serialisation, or validation failure).
    Error {
        /// RPC name, when known (absent for route-match failures).
        rpc: Option<String>,
        /// Display text of the error.
        message: String,
        /// Wall-clock elapsed time for the request.
        elapsed_ms: u64,
    },
    /// A handler raised a non-Thrift runtime error.
    InternalError {
        /// RPC name, when known.
        rpc: Option<String>,
        /// Display text of the originating error.
        message: String,
        /// Wall-clock elapsed time for the request.
        elapsed_ms: u64,
    },
}

/// A lifecycle event subscriber. Implementors only need to override the
/// event kinds they care about; the defaults do nothing.
pub trait Subscriber: Send + Sync {
    /// Handle an `rpc_success` event.
    fn on_success(&self, _rpc: &str, _elapsed_ms: u64) {}
    /// Handle an `rpc_exception` event.
    fn on_exception(&self, _rpc: &str, _message: &str, _elapsed_ms: u64) {}
    /// Handle an `rpc_error` event.
    fn on_error(&self, _rpc: Option<&str>, _message: &str, _elapsed_ms: u64) {}
    /// Handle an `internal_error` event.
    fn on_internal_error(&self, _rpc: Option<&str>, _message: &str, _elapsed_ms: u64) {}
}

/// An ordered, append-only (until first publish) list of subscribers.
pub struct Bus {
    subscribers: Vec<Box<dyn Subscriber>>,
    sealed: AtomicBool,
}

impl Bus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            sealed: AtomicBool::new(false),
        }
    }

    /// Register a subscriber. A no-op, logged at `warn`, if the bus has
    /// already published (sealing is permissive here, unlike
    /// [`crate::middleware::MiddlewareStack::push`], because a late
    /// subscriber only misses events rather than corrupting ordering).
    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) {
        if self.sealed.load(Ordering::Acquire) {
            warn!("subscriber registered after first publish; ignoring");
            return;
        }
        self.subscribers.push(Box::new(subscriber));
    }

    /// Publish an event to all subscribers, in subscription order. A
    /// subscriber whose callback panics stops delivery to the remaining
    /// subscribers for this event but does not propagate the panic to the
    /// caller.
    pub fn publish(&self, event: &Event) {
        self.sealed.store(true, Ordering::Release);
        for subscriber in &self.subscribers {
            let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| dispatch_one(subscriber.as_ref(), event)));
            if outcome.is_err() {
                warn!("subscriber panicked handling event; not considered a bug, stopping delivery for this event");
                break;
            }
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

fn dispatch_one(subscriber: &dyn Subscriber, event: &Event) {
    match event {
        Event::Success { rpc, elapsed_ms } => subscriber.on_success(rpc, *elapsed_ms),
        Event::Exception { rpc, message, elapsed_ms } => {
            subscriber.on_exception(rpc, message, *elapsed_ms);
        }
        Event::Error { rpc, message, elapsed_ms } => {
            subscriber.on_error(rpc.as_deref(), message, *elapsed_ms);
        }
        Event::InternalError { rpc, message, elapsed_ms } => {
            subscriber.on_internal_error(rpc.as_deref(), message, *elapsed_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl Subscriber for Recorder {
        fn on_success(&self, rpc: &str, _elapsed_ms: u64) {
            self.0.lock().expect("lock poisoned").push(format!("success:{rpc}"));
        }
    }

    struct PanicsOnSuccess;

    impl Subscriber for PanicsOnSuccess {
        fn on_success(&self, _rpc: &str, _elapsed_ms: u64) {
            panic!("boom");
        }
    }

    #[test]
    fn delivers_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = Bus::new();
        bus.subscribe(Recorder(Arc::clone(&log)));
        bus.subscribe(Recorder(Arc::clone(&log)));

        bus.publish(&Event::Success { rpc: "do_operation".to_owned(), elapsed_ms: 1 });

        assert_eq!(
            *log.lock().expect("lock poisoned"),
            vec!["success:do_operation", "success:do_operation"]
        );
    }

    #[test]
    fn panicking_subscriber_stops_delivery_without_propagating() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = Bus::new();
        bus.subscribe(PanicsOnSuccess);
        bus.subscribe(Recorder(Arc::clone(&log)));

        bus.publish(&Event::Success { rpc: "x".to_owned(), elapsed_ms: 0 });

        assert!(log.lock().expect("lock poisoned").is_empty());
    }
}
