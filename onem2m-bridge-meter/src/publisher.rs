//! Bounded fixed-rate publishing of meter readings.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use meterlink_client::{ClientError, ContentInstance, Outcome, Resource, ResourceClient};
use meterlink_common::ResourceAddress;

use crate::meter::{UtilityMeter, reading_payload};

/// What to do with a publish that did not go through.
///
/// The meter is fire-and-forget telemetry: the default policy logs the
/// status and moves on, so a transient failure never aborts the loop.
/// Alternative policies (retry with backoff) slot in here without touching
/// the loop shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the status and continue with the next tick.
    #[default]
    IgnoreAndLog,
}

impl FailurePolicy {
    fn apply(&self, tick: u64, result: &Result<Outcome, ClientError>) {
        match self {
            FailurePolicy::IgnoreAndLog => match result {
                Ok(outcome) if outcome.is_success() => {
                    info!("tick {}: published reading (status {})", tick, outcome.status);
                }
                Ok(outcome) => {
                    warn!("tick {}: CSE refused reading (status {})", tick, outcome.status);
                }
                Err(err) => {
                    warn!("tick {}: publish failed: {}", tick, err);
                }
            },
        }
    }
}

/// Bounded fixed-rate publisher: one reading per interval until the
/// iteration count is reached or the token is cancelled.
pub struct MeterPublisher<C> {
    client: C,
    meter: UtilityMeter,
    data_address: ResourceAddress,
    ticket: String,
    interval: Duration,
    iterations: u64,
    policy: FailurePolicy,
}

impl<C: ResourceClient> MeterPublisher<C> {
    pub fn new(
        client: C,
        meter: UtilityMeter,
        data_address: ResourceAddress,
        ticket: impl Into<String>,
        interval: Duration,
        iterations: u64,
    ) -> Self {
        Self {
            client,
            meter,
            data_address,
            ticket: ticket.into(),
            interval,
            iterations,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the loop to completion.
    ///
    /// Fixed-rate: a late pass carries its remainder into the next tick,
    /// so drift never accumulates beyond one interval's rounding. The
    /// token is checked once per scheduler pass and wins over a due tick.
    ///
    /// Returns the number of readings published.
    pub async fn run(mut self, cancel: CancellationToken) -> u64 {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
        // The first interval tick completes immediately; consume it so no
        // reading goes out before one full interval has elapsed.
        ticker.tick().await;

        let mut ticks = 0;
        while ticks < self.iterations {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("cancelled after {} of {} readings", ticks, self.iterations);
                    break;
                }
                _ = ticker.tick() => {}
            }

            self.meter.update_random();
            let value = self.meter.value();
            info!("meter-value: {}", value);

            let instance = Resource::from(ContentInstance::text(reading_payload(value)));
            let result = self
                .client
                .create_resource(&self.data_address, &self.ticket, &instance)
                .await;

            ticks += 1;
            self.policy.apply(ticks, &result);
        }

        ticks
    }
}
