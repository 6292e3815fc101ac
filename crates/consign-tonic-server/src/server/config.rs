use anyhow::bail;
use clap::Parser;
use consign_tonic_core::types::DEFAULT_ORDER_BATCH_SIZE;

/// Runtime configuration for the `consign-tonic-server` binary.
///
/// These settings control batching, buffering, and transport behavior of
/// the order-management service. All values are parsed from CLI arguments
/// or environment variables, with defaults matching the reference
/// deployment.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "consign-tonic-server",
    version,
    about = "A gRPC order-management service with streaming shipment consolidation"
)]
pub struct CliArgs {
    /// Number of processed order ids that triggers a mid-stream flush of
    /// all in-progress combined shipments on a `ProcessOrders` call.
    ///
    /// Environment variable: `ORDER_BATCH_SIZE`
    #[arg(long, env = "ORDER_BATCH_SIZE", default_value_t = DEFAULT_ORDER_BATCH_SIZE)]
    pub order_batch_size: usize,

    /// Capacity of the response buffer between the processing loop and the
    /// gRPC stream.
    ///
    /// This affects how many shipments can be buffered before the
    /// processing loop must wait for the client to consume more data.
    /// Lower values increase backpressure responsiveness.
    ///
    /// Environment variable: `STREAM_BUFFER_SIZE`
    #[arg(long, env = "STREAM_BUFFER_SIZE", default_value_t = 8)]
    pub stream_buffer_size: usize,

    /// Address to listen on (TCP or Unix socket path; use --uds for Unix socket).
    ///
    /// Example: "0.0.0.0:50051" or "/tmp/consign-uds.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:50051"))]
    pub server_addr: String,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,

    /// Start with an empty order store instead of the five sample orders.
    #[arg(long, default_value_t = false)]
    pub no_seed: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub order_batch_size: usize,
    pub stream_buffer_size: usize,
    pub server_addr: String,
    pub uds: bool,
    pub seed_sample_data: bool,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.order_batch_size == 0 {
            bail!("ORDER_BATCH_SIZE must be greater than 0");
        }

        if args.stream_buffer_size == 0 {
            bail!("STREAM_BUFFER_SIZE must be greater than 0");
        }

        Ok(Self {
            order_batch_size: args.order_batch_size,
            stream_buffer_size: args.stream_buffer_size,
            server_addr: args.server_addr,
            uds: args.uds,
            seed_sample_data: !args.no_seed,
        })
    }
}
