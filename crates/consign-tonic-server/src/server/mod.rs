//! Server internals: configuration, telemetry, the shared order store, the
//! shipment consolidation engine, and the gRPC service implementation.
//!
//! ## Structure
//!
//! - [`config`] - CLI/env configuration parsed into [`config::ServerConfig`].
//! - [`interceptor`] - Pass-through call logging middleware.
//! - [`service`] - gRPC service entry point (`OrderService`).
//! - [`store`] - Shared in-memory order store.
//! - [`streaming`] - Per-call aggregation, flush policy, and the
//!   bidirectional processing loop.
//! - [`telemetry`] - Structured logging setup.

pub mod config;
pub mod interceptor;
pub mod service;
pub mod store;
pub mod streaming;
pub mod telemetry;
