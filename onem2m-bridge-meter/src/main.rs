//! oneM2M bridge for a simulated utility meter.
//!
//! Provisions the meter's resource tree on a oneM2M CSE, then publishes a
//! simulated reading at a fixed cadence for a bounded number of ticks.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use meterlink_client::HttpResourceClient;
use meterlink_common::AddressBuilder;

use onem2m_bridge_meter::config::{self, MeterBridgeConfig};
use onem2m_bridge_meter::meter::UtilityMeter;
use onem2m_bridge_meter::provision;
use onem2m_bridge_meter::publisher::MeterPublisher;

/// Publishes simulated utility-meter readings to a oneM2M CSE.
#[derive(Parser, Debug)]
#[command(name = "onem2m-bridge-meter")]
#[command(about = "Publishes simulated utility-meter readings to a oneM2M CSE")]
#[command(version)]
struct Args {
    /// CSE address as IP:Port.
    server: Option<String>,

    /// Requested run time in minutes (non-numeric values count as zero).
    runtime_minutes: Option<String>,

    /// Path to an optional configuration file (JSON5 format).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MeterBridgeConfig::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => MeterBridgeConfig::default(),
    };

    if let Some(server) = &args.server {
        config.cse.address = server.clone();
    }
    if let Some(runtime) = &args.runtime_minutes {
        config.meter.runtime_minutes = Some(config::parse_runtime_minutes(runtime));
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    // A malformed endpoint aborts startup before any network activity,
    // with the message on stdout.
    if let Err(err) = config.validate() {
        println!(
            "Invalid configuration for CSE '{}': {}\n   Exiting...",
            config.cse.address, err
        );
        std::process::exit(2);
    }

    meterlink_common::init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to init tracing: {}", e))?;

    let endpoint = config.cse.endpoint().context("CSE endpoint")?;

    info!("Starting onem2m-bridge-meter");
    info!("CSE endpoint: {}", endpoint);

    let client = HttpResourceClient::new(
        &endpoint,
        &config.cse.credentials(),
        Duration::from_millis(config.cse.timeout_ms),
    )
    .map_err(|e| anyhow::anyhow!("Failed to build CSE client: {}", e))?;

    let mut meter = UtilityMeter::new();
    meter.set_descriptor(config.meter.descriptor.as_str());

    let addresses = AddressBuilder::new(&config.cse.root);

    info!(
        "Provisioning resource tree under {}",
        addresses.ae(&config.meter.ae_name)
    );
    let reports = provision::provision(
        &client,
        &addresses,
        &config.meter,
        &meter,
        &config.cse.request_ticket,
    )
    .await;

    let failed = reports.iter().filter(|r| !r.succeeded()).count();
    if failed > 0 {
        warn!(
            "{} of {} provisioning steps did not succeed; publishing anyway",
            failed,
            reports.len()
        );
    }

    let iterations = config.meter.iterations();
    info!(
        "Meter values will now update every {}s for {} readings",
        config.meter.interval_secs, iterations
    );

    // Ctrl+C cancels the token; the loop notices on its next pass.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let data_address = addresses.container(&config.meter.ae_name, &config.meter.data_container);
    let publisher = MeterPublisher::new(
        client,
        meter,
        data_address,
        config.cse.request_ticket.as_str(),
        Duration::from_secs(config.meter.interval_secs),
        iterations,
    );

    let published = publisher.run(cancel).await;

    info!("Published {} readings. Finished!", published);

    Ok(())
}
