//! The bidirectional `ProcessOrders` loop.
//!
//! Drives one stream invocation: receive an order id, look it up in the
//! shared store, fold it into the call-local aggregator, flush every
//! batch-size ingests, and drain whatever remains at end-of-input.
//!
//! The loop is generic over the inbound stream so it can be exercised in
//! tests without a live transport; in production the handler passes the
//! `tonic::Streaming` half of the call directly.

use super::aggregator::ShipmentAggregator;
use super::batch::BatchPolicy;
use crate::server::store::OrderStore;
use consign_tonic_core::proto::CombinedShipment;
use consign_tonic_core::{Error, Result};
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tonic::Status;

/// Runs the receive/lookup/aggregate/flush/drain loop for one call.
///
/// # Behavior
///
/// - An id missing from the store fails the stream: the `NotFound` status
///   is forwarded to the client (best effort) and the call terminates.
///   Shipments already grouped but not yet flushed are discarded.
/// - Shipments emitted by a flush are fully sent before the loop resumes
///   waiting for input.
/// - End-of-input drains every remaining shipment, then finishes `Ok`.
/// - An inbound receive error is fatal: it is forwarded to the client as
///   the terminal status (best effort) and surfaces as
///   [`Error::StreamTransport`].
/// - If the client stops consuming (outbound channel closed), the loop
///   exits with [`Error::RequestCancelled`] without delivering partial
///   state.
pub async fn drive_order_stream<S>(
    store: Arc<OrderStore>,
    batch_size: usize,
    mut inbound: S,
    resp_tx: mpsc::Sender<core::result::Result<CombinedShipment, Status>>,
) -> Result<()>
where
    S: Stream<Item = core::result::Result<String, Status>> + Unpin,
{
    let mut aggregator = ShipmentAggregator::new();
    let mut policy = BatchPolicy::new(batch_size);

    loop {
        match inbound.next().await {
            Some(Ok(order_id)) => {
                let order = match store.get(&order_id) {
                    Ok(order) => order,
                    Err(e) => {
                        // Surface the lookup failure to the client; the
                        // client may already be gone, so log instead of
                        // failing on the send.
                        if let Err(send_err) = resp_tx.send(Err(e.clone().into())).await {
                            tracing::warn!("Failed to forward err: {send_err}");
                        }
                        return Err(e);
                    }
                };

                tracing::debug!(
                    order = %order_id,
                    destination = %order.destination,
                    "ingesting order"
                );
                aggregator.ingest(order);

                if policy.record_ingest() {
                    flush_shipments(&mut aggregator, &resp_tx).await?;
                }
            }
            Some(Err(status)) => {
                let err = Error::StreamTransport {
                    context: status.to_string(),
                };
                // The receive failure must reach the client as the call's
                // terminal status; dropping the channel alone would close
                // the outbound stream cleanly.
                if let Err(send_err) = resp_tx.send(Err(err.clone().into())).await {
                    tracing::warn!("Failed to forward err: {send_err}");
                }
                return Err(err);
            }
            None => {
                tracing::debug!("order id stream closed, draining remaining shipments");
                flush_shipments(&mut aggregator, &resp_tx).await?;
                return Ok(());
            }
        }
    }
}

/// Emits every in-progress shipment on the outbound channel and resets the
/// aggregator.
async fn flush_shipments(
    aggregator: &mut ShipmentAggregator,
    resp_tx: &mpsc::Sender<core::result::Result<CombinedShipment, Status>>,
) -> Result<()> {
    for shipment in aggregator.drain_all() {
        tracing::debug!(shipment = %shipment.id, orders = shipment.order_list.len(), "shipping");
        if resp_tx.send(Ok(shipment)).await.is_err() {
            return Err(Error::RequestCancelled);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::collections::HashMap;
    use tokio_stream::wrappers::ReceiverStream;
    use tonic::Code;

    fn seeded_store() -> Arc<OrderStore> {
        Arc::new(OrderStore::with_sample_data())
    }

    fn ids(values: &[&str]) -> Vec<core::result::Result<String, Status>> {
        values.iter().map(|v| Ok(v.to_string())).collect()
    }

    async fn collect_shipments(
        mut resp_rx: mpsc::Receiver<core::result::Result<CombinedShipment, Status>>,
    ) -> Vec<CombinedShipment> {
        let mut shipments = Vec::new();
        while let Some(msg) = resp_rx.recv().await {
            shipments.push(msg.expect("unexpected stream error"));
        }
        shipments
    }

    #[tokio::test]
    async fn batch_threshold_flushes_grouped_shipments() {
        // Scenario from the sample data: 102 and 104 ship to Mountain
        // View, 103 to San Jose; batch size 3 flushes after the third
        // ingest, before end-of-input.
        let (in_tx, in_rx) = mpsc::channel(8);
        let (resp_tx, mut resp_rx) = mpsc::channel(8);

        let task = tokio::spawn(drive_order_stream(
            seeded_store(),
            3,
            ReceiverStream::new(in_rx),
            resp_tx,
        ));

        for id in ["102", "103", "104"] {
            in_tx.send(Ok(id.to_string())).await.unwrap();
        }

        let mut by_id = HashMap::new();
        for _ in 0..2 {
            let shipment = resp_rx.recv().await.unwrap().unwrap();
            by_id.insert(shipment.id.clone(), shipment);
        }

        let mountain_view = &by_id["cmb-Mountain View, CA"];
        let order_ids: Vec<_> = mountain_view.order_list.iter().map(|o| &o.id).collect();
        assert_eq!(order_ids, ["102", "104"]);

        let san_jose = &by_id["cmb-San Jose, CA"];
        assert_eq!(san_jose.order_list.len(), 1);
        assert_eq!(san_jose.order_list[0].id, "103");

        // End the inbound stream: the aggregator was emptied by the
        // flush, so nothing further arrives.
        drop(in_tx);
        assert!(resp_rx.recv().await.is_none());
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn drain_delivers_every_order_exactly_once() {
        // Five ids with batch size 3: one mid-stream flush plus a final
        // drain. The union of all emitted shipments must contain each
        // input order exactly once, grouped by destination.
        let (resp_tx, resp_rx) = mpsc::channel(16);
        let inbound = stream::iter(ids(&["102", "103", "104", "105", "106"]));

        drive_order_stream(seeded_store(), 3, inbound, resp_tx)
            .await
            .unwrap();

        let shipments = collect_shipments(resp_rx).await;
        assert_eq!(shipments.len(), 4);

        let mut seen: Vec<String> = shipments
            .iter()
            .flat_map(|s| s.order_list.iter().map(|o| o.id.clone()))
            .collect();
        seen.sort();
        assert_eq!(seen, ["102", "103", "104", "105", "106"]);

        for shipment in &shipments {
            for order in &shipment.order_list {
                assert_eq!(shipment.id, format!("cmb-{}", order.destination));
            }
        }
    }

    #[tokio::test]
    async fn final_drain_only_when_under_threshold() {
        let (resp_tx, resp_rx) = mpsc::channel(8);
        let inbound = stream::iter(ids(&["102", "103"]));

        drive_order_stream(seeded_store(), 3, inbound, resp_tx)
            .await
            .unwrap();

        let shipments = collect_shipments(resp_rx).await;
        assert_eq!(shipments.len(), 2);
    }

    #[tokio::test]
    async fn unknown_id_fails_the_stream_with_not_found() {
        let (resp_tx, mut resp_rx) = mpsc::channel(8);
        let inbound = stream::iter(ids(&["102", "999"]));

        let err = drive_order_stream(seeded_store(), 3, inbound, resp_tx)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::OrderNotFound { ref id } if id == "999"));

        // The client observes the failure as a terminal NOT_FOUND status;
        // nothing from the aborted window is delivered.
        let status = resp_rx.recv().await.unwrap().unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
        assert!(resp_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn inbound_error_is_fatal() {
        let (resp_tx, _resp_rx) = mpsc::channel(8);
        let inbound = stream::iter(vec![
            Ok("102".to_string()),
            Err(Status::unavailable("connection reset")),
        ]);

        let err = drive_order_stream(seeded_store(), 3, inbound, resp_tx)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::StreamTransport { .. }));
    }

    #[tokio::test]
    async fn inbound_error_reaches_client_as_terminal_status() {
        // A decode failure on a healthy transport must not look like a
        // clean close: after the flushed shipment the client sees an
        // error item, never a bare end-of-stream.
        let (resp_tx, mut resp_rx) = mpsc::channel(8);
        let inbound = stream::iter(vec![
            Ok("102".to_string()),
            Err(Status::unavailable("connection reset")),
        ]);

        let err = drive_order_stream(seeded_store(), 1, inbound, resp_tx)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::StreamTransport { .. }));

        let shipment = resp_rx.recv().await.unwrap().unwrap();
        assert_eq!(shipment.id, "cmb-Mountain View, CA");

        let status = resp_rx.recv().await.unwrap().unwrap_err();
        assert_eq!(status.code(), Code::Internal);
        assert!(status.message().contains("connection reset"));
        assert!(resp_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn disconnected_client_cancels_without_partial_delivery() {
        let (resp_tx, resp_rx) = mpsc::channel(8);
        drop(resp_rx);

        // Batch size 1 forces an immediate flush attempt.
        let inbound = stream::iter(ids(&["102"]));
        let err = drive_order_stream(seeded_store(), 1, inbound, resp_tx)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RequestCancelled));
    }
}
