//! Middleware chain: an ordered "around" pipeline shared by client and
//! server (`spec.md` §4.4).
//!
//! A [`MiddlewareStack`] is mutable only before its first dispatch; the first
//! call to [`MiddlewareStack::dispatch`] freezes it, and any subsequent
//! [`MiddlewareStack::push`] is rejected with a fatal programming error
//! rather than silently ignored or permitted (`spec.md` §4.4, §9).

use std::{collections::HashMap, sync::atomic::{AtomicBool, Ordering}};

use async_trait::async_trait;

use crate::error::ClientError;

/// Free-form side channel middleware use to coordinate with each other. The
/// terminal dispatcher ignores it entirely (`spec.md` §4.4, §9).
pub type Opts = HashMap<String, String>;

/// The terminal callable a middleware chain wraps: performs the actual RPC
/// (a server-side handler call, or a client-side network round trip).
#[async_trait]
pub trait Dispatch: Send + Sync {
    /// Invoke the RPC named `rpc_name` with positional `args`.
    async fn dispatch(&self, rpc_name: &str, args: Vec<u8>, opts: &Opts) -> Result<Vec<u8>, ClientError>;
}

/// An "around" interceptor wrapping an inner [`Dispatch`].
///
/// A middleware must either delegate to `inner` (typically after recording
/// timing or metadata) or short-circuit by returning/failing directly
/// without calling it.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Wrap `inner`, returning a new callable that runs this middleware's
    /// logic around it.
    fn wrap(&self, inner: Box<dyn Dispatch>) -> Box<dyn Dispatch>;
}

/// Attempting to register middleware after the stack has already dispatched
/// at least one call. This is a programming error, not a runtime condition a
/// caller should handle — freezing ordering bugs is more valuable than
/// permissive mutation (`spec.md` §4.4).
#[derive(Debug, thiserror::Error)]
#[error("middleware stack is frozen: cannot register middleware after first dispatch")]
pub struct StackFrozenError;

/// An ordered sequence of middleware factories plus a terminal dispatcher.
///
/// The first registered middleware is outermost: it sees requests first and
/// responses last. Composition is `m1(m2(...mN(terminal)...))`.
pub struct MiddlewareStack {
    layers: Vec<Box<dyn Middleware>>,
    frozen: AtomicBool,
}

impl MiddlewareStack {
    /// Create an empty, unfrozen stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            frozen: AtomicBool::new(false),
        }
    }

    /// Register a middleware layer. The first layer registered is outermost.
    ///
    /// # Errors
    /// Returns [`StackFrozenError`] if the stack has already dispatched.
    pub fn push(&mut self, middleware: impl Middleware + 'static) -> Result<(), StackFrozenError> {
        if self.frozen.load(Ordering::Acquire) {
            return Err(StackFrozenError);
        }
        self.layers.push(Box::new(middleware));
        Ok(())
    }

    /// Whether the stack has been frozen by a prior dispatch.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Compose the registered layers around `terminal` and freeze the stack.
    ///
    /// Subsequent calls return the same composition shape (further
    /// [`push`](Self::push) calls will fail); this may be called more than
    /// once per request dispatched through the resulting callable.
    #[must_use]
    pub fn compose(&self, terminal: Box<dyn Dispatch>) -> Box<dyn Dispatch> {
        self.frozen.store(true, Ordering::Release);
        self.layers
            .iter()
            .rev()
            .fold(terminal, |inner, layer| layer.wrap(inner))
    }
}

impl Default for MiddlewareStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;

    struct Recording {
        log: Arc<Mutex<Vec<String>>>,
        tag: &'static str,
    }

    #[async_trait]
    impl Middleware for Recording {
        fn wrap(&self, inner: Box<dyn Dispatch>) -> Box<dyn Dispatch> {
            Box::new(RecordingDispatch {
                inner,
                log: Arc::clone(&self.log),
                tag: self.tag,
            })
        }
    }

    struct RecordingDispatch {
        inner: Box<dyn Dispatch>,
        log: Arc<Mutex<Vec<String>>>,
        tag: &'static str,
    }

    #[async_trait]
    impl Dispatch for RecordingDispatch {
        async fn dispatch(&self, rpc_name: &str, args: Vec<u8>, opts: &Opts) -> Result<Vec<u8>, ClientError> {
            self.log.lock().expect("lock poisoned").push(format!("{}:enter", self.tag));
            let result = self.inner.dispatch(rpc_name, args, opts).await;
            self.log.lock().expect("lock poisoned").push(format!("{}:exit", self.tag));
            result
        }
    }

    struct Terminal;

    #[async_trait]
    impl Dispatch for Terminal {
        async fn dispatch(&self, _rpc_name: &str, args: Vec<u8>, _opts: &Opts) -> Result<Vec<u8>, ClientError> {
            Ok(args)
        }
    }

    #[tokio::test]
    async fn outermost_layer_sees_request_first_and_response_last() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut stack = MiddlewareStack::new();
        stack
            .push(Recording { log: Arc::clone(&log), tag: "outer" })
            .expect("stack not frozen yet");
        stack
            .push(Recording { log: Arc::clone(&log), tag: "inner" })
            .expect("stack not frozen yet");

        let chain = stack.compose(Box::new(Terminal));
        chain.dispatch("do_operation", vec![1], &Opts::new()).await.expect("dispatch");

        let events = log.lock().expect("lock poisoned").clone();
        assert_eq!(events, vec!["outer:enter", "inner:enter", "inner:exit", "outer:exit"]);
    }

    #[tokio::test]
    async fn stack_rejects_push_after_first_dispatch() {
        let mut stack = MiddlewareStack::new();
        let chain = stack.compose(Box::new(Terminal));
        chain.dispatch("x", vec![], &Opts::new()).await.expect("dispatch");

        assert!(stack.is_frozen());
        let log = Arc::new(Mutex::new(Vec::new()));
        let err = stack.push(Recording { log, tag: "late" });
        assert!(err.is_err());
    }
}
