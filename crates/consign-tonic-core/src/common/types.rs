//! Domain constants shared between the order store and the shipment
//! consolidation engine.
//!
//! These values are part of the observable protocol: shipment ids are
//! derived from the destination with a fixed prefix, and the sentinel
//! order id is reserved for deliberately exercising validation failure.

/// Number of processed order ids that triggers a mid-stream flush of all
/// in-progress combined shipments. Overridable at runtime via server
/// configuration.
pub const DEFAULT_ORDER_BATCH_SIZE: usize = 3;

/// Prefix prepended to a destination to form a combined shipment id,
/// e.g. `cmb-Mountain View, CA`.
pub const SHIPMENT_ID_PREFIX: &str = "cmb-";

/// Status marker stamped on every combined shipment at creation.
pub const SHIPMENT_STATUS_PROCESSED: &str = "Processed!";

/// Reserved order id that must never be persisted. `AddOrder` rejects it
/// with an `INVALID_ARGUMENT` status carrying a field violation.
pub const SENTINEL_ORDER_ID: &str = "-1";
