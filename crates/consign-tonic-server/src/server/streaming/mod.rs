//! Shipment consolidation engine for the bidirectional `ProcessOrders`
//! stream.
//!
//! All state here is call-local: each stream invocation constructs its own
//! aggregator and flush policy, and both are dropped when the call ends.
//! Nothing in this module is shared across calls.
//!
//! ## Structure
//!
//! - [`aggregator`] - Groups orders into combined shipments by destination.
//! - [`batch`] - Counter-based flush trigger.
//! - [`processor`] - The receive/lookup/aggregate/flush/drain loop.

pub mod aggregator;
pub mod batch;
pub mod processor;
