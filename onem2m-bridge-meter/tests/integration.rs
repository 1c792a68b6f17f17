//! End-to-end tests for onem2m-bridge-meter against a mock CSE.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use meterlink_client::{ClientError, Outcome, Resource, ResourceClient};
use meterlink_common::{AddressBuilder, ResourceAddress};

use onem2m_bridge_meter::config::MeterBridgeConfig;
use onem2m_bridge_meter::meter::{MAX_READING, UtilityMeter};
use onem2m_bridge_meter::provision::provision;
use onem2m_bridge_meter::publisher::MeterPublisher;

/// In-memory CSE double recording every call.
#[derive(Clone, Default)]
struct FakeCse {
    calls: Arc<Mutex<Vec<String>>>,
    instances: Arc<Mutex<Vec<(String, String)>>>,
}

impl ResourceClient for FakeCse {
    async fn create_resource(
        &self,
        parent: &ResourceAddress,
        _ticket: &str,
        resource: &Resource,
    ) -> Result<Outcome, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create {} {}", resource.kind(), parent));

        if let Resource::ContentInstance(instance) = resource {
            self.instances
                .lock()
                .unwrap()
                .push((parent.as_str().to_string(), instance.content.clone()));
        }

        Ok(Outcome {
            status: 2001,
            response_type: Some(resource.kind()),
            body: String::new(),
        })
    }

    async fn retrieve_resource(
        &self,
        target: &ResourceAddress,
        _ticket: &str,
    ) -> Result<Outcome, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("retrieve {}", target));

        Ok(Outcome {
            status: 2000,
            response_type: None,
            body: String::new(),
        })
    }
}

/// Parse a `{"kWH": N}` body, asserting its exact shape.
fn reading_of(body: &str) -> u32 {
    // The body is also well-formed JSON with a single integer field.
    let parsed: serde_json::Value = serde_json::from_str(body).expect("reading body is JSON");
    assert!(parsed["kWH"].is_u64(), "unexpected reading body: {:?}", body);

    let value = body
        .strip_prefix("{\"kWH\": ")
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or_else(|| panic!("unexpected reading body: {:?}", body));
    value.parse().expect("reading is an integer")
}

#[tokio::test(start_paused = true)]
async fn one_minute_run_publishes_seven_readings() {
    // Mirrors `onem2m-bridge-meter 127.0.0.1:8080 1`.
    let mut config = MeterBridgeConfig::default();
    config.cse.address = "127.0.0.1:8080".to_string();
    config.meter.runtime_minutes = Some(1);
    config.validate().unwrap();

    let iterations = config.meter.iterations();
    assert_eq!(iterations, 7);

    let client = FakeCse::default();
    let calls = client.calls.clone();
    let instances = client.instances.clone();

    let mut meter = UtilityMeter::new();
    meter.set_descriptor(&config.meter.descriptor);

    let addresses = AddressBuilder::new(&config.cse.root);
    let reports = provision(
        &client,
        &addresses,
        &config.meter,
        &meter,
        &config.cse.request_ticket,
    )
    .await;
    assert_eq!(reports.len(), 7);

    let data_address = addresses.container(&config.meter.ae_name, &config.meter.data_container);
    let published = MeterPublisher::new(
        client,
        meter,
        data_address.clone(),
        config.cse.request_ticket.clone(),
        Duration::from_secs(config.meter.interval_secs),
        iterations,
    )
    .run(CancellationToken::new())
    .await;

    assert_eq!(published, 7);

    // Provisioning (7 calls) plus one create per loop tick.
    assert_eq!(calls.lock().unwrap().len(), 7 + 7);

    // One descriptor instance, one first reading, seven loop readings.
    let instances = instances.lock().unwrap();
    assert_eq!(instances.len(), 9);

    let readings: Vec<&(String, String)> = instances
        .iter()
        .filter(|(parent, _)| parent == data_address.as_str())
        .collect();
    assert_eq!(readings.len(), 8);

    for (_, body) in &readings {
        assert!(reading_of(body) < MAX_READING);
    }
}

#[tokio::test(start_paused = true)]
async fn default_run_publishes_thirteen_readings() {
    let config = MeterBridgeConfig::default();
    assert_eq!(config.meter.iterations(), 13);

    let client = FakeCse::default();
    let instances = client.instances.clone();

    let addresses = AddressBuilder::new(&config.cse.root);
    let data_address = addresses.container(&config.meter.ae_name, &config.meter.data_container);

    let published = MeterPublisher::new(
        client,
        UtilityMeter::new(),
        data_address,
        config.cse.request_ticket.clone(),
        Duration::from_secs(config.meter.interval_secs),
        config.meter.iterations(),
    )
    .run(CancellationToken::new())
    .await;

    assert_eq!(published, 13);
    assert_eq!(instances.lock().unwrap().len(), 13);
}

#[tokio::test(start_paused = true)]
async fn provisioning_then_loop_keeps_the_data_container_ordered() {
    let config = MeterBridgeConfig::default();
    let client = FakeCse::default();
    let calls = client.calls.clone();

    let mut meter = UtilityMeter::new();
    meter.set_descriptor(&config.meter.descriptor);

    let addresses = AddressBuilder::new(&config.cse.root);
    provision(
        &client,
        &addresses,
        &config.meter,
        &meter,
        &config.cse.request_ticket,
    )
    .await;

    let data_address = addresses.container(&config.meter.ae_name, &config.meter.data_container);
    MeterPublisher::new(
        client,
        meter,
        data_address,
        config.cse.request_ticket.clone(),
        Duration::from_secs(config.meter.interval_secs),
        2,
    )
    .run(CancellationToken::new())
    .await;

    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            "create AE /in-cse/in-name",
            "retrieve /in-cse/in-name/MY_METER",
            "create container /in-cse/in-name/MY_METER",
            "create contentInstance /in-cse/in-name/MY_METER/DESCRIPTOR",
            "create container /in-cse/in-name/MY_METER",
            "create contentInstance /in-cse/in-name/MY_METER/DATA",
            "retrieve /in-cse/in-name/MY_METER/DATA/la",
            "create contentInstance /in-cse/in-name/MY_METER/DATA",
            "create contentInstance /in-cse/in-name/MY_METER/DATA",
        ]
    );
}
