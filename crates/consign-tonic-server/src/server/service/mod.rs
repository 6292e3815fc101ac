//! gRPC service implementation.
//!
//! This module contains the client-facing entry point for the
//! `OrderManagement` service: unary add/get, the streaming search and
//! bulk-update handlers, and the bidirectional shipment-consolidation
//! stream, which delegates to [`crate::server::streaming`].
//!
//! ## Structure
//!
//! - [`handler`] - gRPC service entry point (`OrderService`).

pub mod handler;
