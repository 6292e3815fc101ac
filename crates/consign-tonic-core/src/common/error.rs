//! Error types for the order-management service.
//!
//! This module defines the central `Error` enum, which captures all
//! recoverable and reportable error cases within the service. It
//! implements `From<Error>` for `tonic::Status` so handlers can propagate
//! failures to clients with appropriate status codes, messages, and
//! (for validation failures) machine-readable `BadRequest` details.
//!
//! ## Error Cases
//! - `InvalidField`: A request field failed validation (e.g. the sentinel
//!   order id on `AddOrder`).
//! - `OrderNotFound`: A lookup against the order store missed.
//! - `StreamTransport`: Receiving on an active stream failed; fatal to
//!   that call.
//! - `ChannelError`: An internal communication failure between tasks.
//! - `RequestCancelled`: The client went away mid-stream.
//! - `ServiceShutdown`: A request arrived while the service was shutting
//!   down.
//! - `Internal`: An internal invariant was violated.

use tonic::{Code, Status};
use tonic_types::{ErrorDetails, StatusExt};

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the order-management service.
#[derive(Clone, thiserror::Error, Debug)]
pub enum Error {
    /// A request field failed validation. Carried to the client as an
    /// `INVALID_ARGUMENT` status with a `BadRequest` field violation.
    #[error("Invalid {field}: {description}")]
    InvalidField { field: String, description: String },

    /// No order exists under the given id.
    #[error("Order does not exist: {id}")]
    OrderNotFound { id: String },

    /// Send/receive failure on an active stream.
    #[error("Stream transport error: {context}")]
    StreamTransport { context: String },

    /// Internal channel send/receive failure (e.g., closed channel).
    #[error("Channel error: {context}")]
    ChannelError { context: String },

    /// The client aborted the call.
    #[error("Request cancelled by client")]
    RequestCancelled,

    /// The service is in the process of shutting down.
    #[error("Service is shutting down")]
    ServiceShutdown,

    /// An internal invariant was violated.
    #[error("Internal error: {context}")]
    Internal { context: String },
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidField { field, description } => {
                let mut details = ErrorDetails::new();
                details.add_bad_request_violation(field, description);
                Status::with_error_details(
                    Code::InvalidArgument,
                    "Invalid information received",
                    details,
                )
            }
            Error::OrderNotFound { id } => {
                Status::not_found(format!("Order does not exist: {id}"))
            }
            Error::StreamTransport { context } => {
                Status::internal(format!("Stream transport error: {context}"))
            }
            Error::ChannelError { context } => {
                Status::internal(format!("Channel error: {context}"))
            }
            Error::RequestCancelled => Status::cancelled("Request was cancelled"),
            Error::ServiceShutdown => Status::unavailable("Service is shutting down"),
            Error::Internal { context } => Status::internal(context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_field_carries_bad_request_detail() {
        let status: Status = Error::InvalidField {
            field: "ID".to_string(),
            description: "Order ID received is not valid -1".to_string(),
        }
        .into();

        assert_eq!(status.code(), Code::InvalidArgument);
        let bad_request = status
            .get_details_bad_request()
            .expect("missing BadRequest detail");
        assert_eq!(bad_request.field_violations.len(), 1);
        assert_eq!(bad_request.field_violations[0].field, "ID");
    }

    #[test]
    fn not_found_maps_to_not_found_code() {
        let status: Status = Error::OrderNotFound {
            id: "999".to_string(),
        }
        .into();
        assert_eq!(status.code(), Code::NotFound);
        assert!(status.message().contains("999"));
    }

    #[test]
    fn cancelled_maps_to_cancelled_code() {
        let status: Status = Error::RequestCancelled.into();
        assert_eq!(status.code(), Code::Cancelled);
    }
}
