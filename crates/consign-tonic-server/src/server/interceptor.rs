//! Pass-through logging middleware wrapped around every call.
//!
//! Authentication, rejection, and richer auditing belong to an external
//! interceptor layer; this one only observes. It is applied in `main` via
//! [`tonic::service::interceptor::InterceptedService`], keeping the
//! cross-cutting concern out of the handlers themselves.

use tonic::{Request, Status};

/// Logs call metadata and lets the request through unchanged.
pub fn log_calls(req: Request<()>) -> Result<Request<()>, Status> {
    tracing::debug!(
        remote = ?req.remote_addr(),
        user_agent = ?req.metadata().get("user-agent"),
        "accepted rpc"
    );
    Ok(req)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_requests_through() {
        let req = Request::new(());
        assert!(log_calls(req).is_ok());
    }
}
