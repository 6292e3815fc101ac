//! Per-stream grouping of orders into combined shipments.

use consign_tonic_core::proto::{CombinedShipment, Order};
use consign_tonic_core::types::{SHIPMENT_ID_PREFIX, SHIPMENT_STATUS_PROCESSED};
use std::collections::HashMap;

/// Keyed mapping from destination to an in-progress combined shipment.
///
/// Owned by a single `ProcessOrders` invocation; created at call start and
/// discarded on every flush and at stream end. At most one shipment exists
/// per destination within an aggregation window, and a shipment's order
/// list is append-only for the life of that window.
#[derive(Debug, Default)]
pub struct ShipmentAggregator {
    shipments: HashMap<String, CombinedShipment>,
}

impl ShipmentAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `order` to its destination's shipment, creating the
    /// shipment first when this is the destination's first order in the
    /// current window.
    pub fn ingest(&mut self, order: Order) {
        self.shipments
            .entry(order.destination.clone())
            .or_insert_with(|| CombinedShipment {
                id: format!("{SHIPMENT_ID_PREFIX}{}", order.destination),
                status: SHIPMENT_STATUS_PROCESSED.to_string(),
                order_list: Vec::new(),
            })
            .order_list
            .push(order);
    }

    /// Removes and returns every current shipment. Iteration order is
    /// unspecified, but the result is exhaustive and the aggregator is
    /// empty afterwards.
    pub fn drain_all(&mut self) -> Vec<CombinedShipment> {
        self.shipments.drain().map(|(_, shipment)| shipment).collect()
    }

    /// Number of in-progress shipments.
    pub fn len(&self) -> usize {
        self.shipments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shipments.is_empty()
    }
}
