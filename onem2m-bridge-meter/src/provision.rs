//! One-shot provisioning of the meter's resource tree.
//!
//! Best-effort: each step is attempted exactly once, every outcome is
//! logged with its status code, and a failed step never prevents the steps
//! after it. Re-runs simply attempt creation again and surface the
//! server's conflict status.

use tracing::{info, warn};

use meterlink_client::{
    Ae, ClientError, Container, ContentInstance, Outcome, Resource, ResourceClient,
};
use meterlink_common::{AddressBuilder, ResourceAddress};

use crate::config::MeterConfig;
use crate::meter::{UtilityMeter, reading_payload};

/// Report for one provisioning step, surfaced for logging and summary.
#[derive(Debug)]
pub struct StepReport {
    pub step: &'static str,
    pub address: ResourceAddress,
    pub result: Result<Outcome, ClientError>,
}

impl StepReport {
    /// True when the call went through and the CSE answered with success.
    pub fn succeeded(&self) -> bool {
        self.result.as_ref().is_ok_and(Outcome::is_success)
    }
}

/// Build the AE + descriptor + data tree on the CSE.
///
/// The sequence is fixed: create AE, retrieve it back (verification),
/// create the descriptor container and publish the device description into
/// it, create the data container and publish the first reading into it,
/// then retrieve the latest data content instance (verification).
pub async fn provision<C: ResourceClient>(
    client: &C,
    addresses: &AddressBuilder,
    meter_config: &MeterConfig,
    meter: &UtilityMeter,
    ticket: &str,
) -> Vec<StepReport> {
    let root = addresses.root();
    let ae_address = addresses.ae(&meter_config.ae_name);
    let descriptor_address =
        addresses.container(&meter_config.ae_name, &meter_config.descriptor_container);
    let data_address = addresses.container(&meter_config.ae_name, &meter_config.data_container);

    let mut reports = Vec::with_capacity(7);

    let ae = Resource::from(Ae::new(&meter_config.ae_name, &meter_config.app_id));
    reports.push(record(
        "create AE",
        &root,
        client.create_resource(&root, ticket, &ae).await,
    ));

    reports.push(record(
        "retrieve AE",
        &ae_address,
        client.retrieve_resource(&ae_address, ticket).await,
    ));

    let descriptor_container =
        Resource::from(Container::new(&meter_config.descriptor_container));
    reports.push(record(
        "create descriptor container",
        &ae_address,
        client
            .create_resource(&ae_address, ticket, &descriptor_container)
            .await,
    ));

    let description = Resource::from(ContentInstance::text(meter.descriptor()));
    reports.push(record(
        "publish descriptor",
        &descriptor_address,
        client
            .create_resource(&descriptor_address, ticket, &description)
            .await,
    ));

    let data_container = Resource::from(Container::new(&meter_config.data_container));
    reports.push(record(
        "create data container",
        &ae_address,
        client
            .create_resource(&ae_address, ticket, &data_container)
            .await,
    ));

    let first_reading =
        Resource::from(ContentInstance::text(reading_payload(meter.random_value())));
    reports.push(record(
        "publish first reading",
        &data_address,
        client
            .create_resource(&data_address, ticket, &first_reading)
            .await,
    ));

    let latest = data_address.child("la");
    reports.push(record(
        "retrieve latest reading",
        &latest,
        client.retrieve_resource(&latest, ticket).await,
    ));

    reports
}

fn record(
    step: &'static str,
    address: &ResourceAddress,
    result: Result<Outcome, ClientError>,
) -> StepReport {
    match &result {
        Ok(outcome) => match outcome.response_type {
            Some(kind) => info!(
                "{} at {}: status {} ({})",
                step, address, outcome.status, kind
            ),
            None => info!("{} at {}: status {}", step, address, outcome.status),
        },
        Err(err) => warn!("{} at {}: {}", step, address, err),
    }

    StepReport {
        step,
        address: address.clone(),
        result,
    }
}
