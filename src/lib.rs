//! Core of a Thrift-RPC-over-HTTP gateway.
//!
//! This crate carries Apache Thrift request/response structs as HTTP/1.1
//! POST bodies over persistent connections, negotiating among the binary,
//! compact, and JSON wire protocols via `Content-Type`. It is deliberately
//! symmetric: the same envelope codec, error taxonomy, and middleware chain
//! back both [`server`] and [`client`].
//!
//! The Thrift schema compiler and the generated service/struct code are
//! assumed to exist already (see `test-support` for a hand-written stand-in
//! used by this crate's own tests); the HTTP server runtime that hosts
//! [`server::ThtpService`] is likewise a caller-supplied collaborator.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod middleware;
pub mod protocol;
pub mod pubsub;
pub mod server;

pub use client::ThtpClient;
pub use envelope::{ResultEnvelope, ResultOutcome, ThriftEnvelope};
pub use error::{ClientError, ServerError};
pub use protocol::Protocol;
pub use server::{Reply, ServiceDispatch, ThtpService};
