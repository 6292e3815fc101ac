//! Shared types and error definitions used across the `consign` service.
//!
//! ## Submodules
//!
//! - [`error`] - Centralized service error type used throughout request
//!   handling.
//! - [`types`] - Domain constants shared by the store and the
//!   consolidation engine.
//! - [`proto`] - Generated Protobuf service and message definitions.

pub mod error;
pub mod types;

pub use error::{Error, Result};

/// gRPC service and message definitions generated from
/// `proto/ecommerce.proto`.
///
/// ## Service
///
/// - `OrderManagement` - unary add/get, server-streaming search,
///   client-streaming update, and the bidirectional `ProcessOrders`
///   shipment-consolidation stream.
///
/// Note that `google.protobuf.StringValue` arguments surface in the
/// generated Rust API as plain `String` messages.
pub mod proto {
    tonic::include_proto!("ecommerce");

    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("ecommerce_descriptor");
}
