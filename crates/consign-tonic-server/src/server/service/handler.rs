//! gRPC service implementation for the order-management API.
//!
//! This module defines [`OrderService`], the concrete implementation of
//! the [`OrderManagement`] gRPC service defined in the protobuf
//! specification.
//!
//! ## Responsibilities
//!
//! - Validate incoming orders and reject the sentinel invalid id.
//! - Delegate reads and writes to the shared [`OrderStore`].
//! - Stream search results and consume bulk-update streams.
//! - Spawn the per-call consolidation loop for `ProcessOrders` and wire
//!   its bounded output channel back to the client.

use crate::server::{
    config::ServerConfig, store::OrderStore, streaming::processor::drive_order_stream,
};
use consign_tonic_core::Error;
use consign_tonic_core::proto::{
    CombinedShipment, Order, order_management_server::OrderManagement,
};
use consign_tonic_core::types::SENTINEL_ORDER_ID;
use core::pin::Pin;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status, Streaming};
use tracing::Instrument;
use uuid::Uuid;

/// gRPC order-management service backed by a shared in-memory store.
///
/// Cloning is cheap: the store is behind an [`Arc`] and shared by every
/// concurrently active call. Per-call state (the shipment aggregator and
/// flush counter) lives inside each `ProcessOrders` task, never here.
#[derive(Clone)]
pub struct OrderService {
    config: ServerConfig,
    store: Arc<OrderStore>,
}

impl OrderService {
    /// Creates the service, seeding the store with sample data unless the
    /// configuration disabled it.
    pub fn new(config: ServerConfig) -> Self {
        let store = if config.seed_sample_data {
            OrderStore::with_sample_data()
        } else {
            OrderStore::new()
        };
        Self::with_store(config, Arc::new(store))
    }

    pub(crate) fn with_store(config: ServerConfig, store: Arc<OrderStore>) -> Self {
        Self { config, store }
    }
}

/// Consumes a client-streamed sequence of orders, upserting each into the
/// store, and produces the summary returned to the caller.
pub(crate) async fn apply_order_updates<S>(
    store: &OrderStore,
    mut inbound: S,
) -> Result<String, Status>
where
    S: Stream<Item = Result<Order, Status>> + Unpin,
{
    let mut processed = Vec::new();

    while let Some(order) = inbound.next().await.transpose()? {
        tracing::debug!(order = %order.id, "order updated");
        processed.push(order.id.clone());
        store.put(order);
    }

    Ok(format!("Orders processed: [{}]", processed.join(", ")))
}

#[tonic::async_trait]
impl OrderManagement for OrderService {
    /// Adds a new order to the store.
    ///
    /// The sentinel id `"-1"` is rejected with `INVALID_ARGUMENT` and a
    /// `BadRequest` field violation on `"ID"`; it is never persisted. An
    /// empty id means the caller wants a server-assigned one.
    async fn add_order(&self, request: Request<Order>) -> Result<Response<String>, Status> {
        let mut order = request.into_inner();

        if order.id == SENTINEL_ORDER_ID {
            tracing::warn!("Order ID is invalid! -> Received Order ID {}", order.id);
            return Err(Error::InvalidField {
                field: "ID".to_string(),
                description: format!(
                    "Order ID received is not valid {} : {}",
                    order.id, order.description
                ),
            }
            .into());
        }

        if order.id.is_empty() {
            order.id = Uuid::new_v4().to_string();
        }

        let id = order.id.clone();
        self.store.put(order);
        tracing::info!(order = %id, "order added");

        Ok(Response::new(format!("Order Added: {id}")))
    }

    /// Looks up a single order; `NOT_FOUND` on miss.
    async fn get_order(&self, request: Request<String>) -> Result<Response<Order>, Status> {
        let order = self.store.get(request.get_ref())?;
        Ok(Response::new(order))
    }

    type SearchOrdersStream = Pin<Box<dyn Stream<Item = Result<Order, Status>> + Send>>;

    /// Streams every order with an item matching the query substring.
    ///
    /// The matches are a snapshot taken at call time; concurrent writes do
    /// not alter an in-flight search stream.
    async fn search_orders(
        &self,
        request: Request<String>,
    ) -> Result<Response<Self::SearchOrdersStream>, Status> {
        let query = request.into_inner();
        let matches = self.store.search(&query);
        tracing::debug!(query = %query, matches = matches.len(), "search complete");

        let stream = futures::stream::iter(matches.into_iter().map(Ok));
        Ok(Response::new(Box::pin(stream)))
    }

    /// Consumes an inbound stream of orders until end-of-input, upserting
    /// each, then returns one summary listing the processed ids.
    async fn update_orders(
        &self,
        request: Request<Streaming<Order>>,
    ) -> Result<Response<String>, Status> {
        let summary = apply_order_updates(&self.store, request.into_inner()).await?;
        Ok(Response::new(summary))
    }

    type ProcessOrdersStream = Pin<Box<dyn Stream<Item = Result<CombinedShipment, Status>> + Send>>;

    /// Bidirectional shipment consolidation.
    ///
    /// Spawns the per-call processing loop on its own task and hands the
    /// bounded receiving half back as the outbound stream, so a slow
    /// client applies backpressure to the loop rather than growing an
    /// unbounded buffer.
    async fn process_orders(
        &self,
        request: Request<Streaming<String>>,
    ) -> Result<Response<Self::ProcessOrdersStream>, Status> {
        let inbound = request.into_inner();
        let (resp_tx, resp_rx) =
            mpsc::channel::<Result<CombinedShipment, Status>>(self.config.stream_buffer_size);

        let store = Arc::clone(&self.store);
        let batch_size = self.config.order_batch_size;

        let fut = async move {
            if let Err(e) = drive_order_stream(store, batch_size, inbound, resp_tx).await {
                tracing::warn!("order processing stream terminated: {e}");
            }
        };
        tokio::spawn(fut.instrument(tracing::info_span!("process_orders")));

        Ok(Response::new(Box::pin(ReceiverStream::new(resp_rx))))
    }
}
