//! Simulated utility meter.

use rand::Rng;

/// Upper bound (exclusive) for simulated readings.
pub const MAX_READING: u32 = 1000;

/// A simulated utility meter: a current reading plus a free-form
/// descriptor.
///
/// The reading is owned here exclusively; only [`update_random`] mutates
/// it, [`value`] and [`random_value`] never do.
///
/// [`update_random`]: UtilityMeter::update_random
/// [`value`]: UtilityMeter::value
/// [`random_value`]: UtilityMeter::random_value
#[derive(Debug, Clone, Default)]
pub struct UtilityMeter {
    value: u32,
    descriptor: String,
}

impl UtilityMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the free-form device description (type, location, app-id).
    pub fn set_descriptor(&mut self, text: impl Into<String>) {
        self.descriptor = text.into();
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Draw a fresh reading without touching the stored value. Used for the
    /// very first published reading during provisioning.
    pub fn random_value(&self) -> u32 {
        rand::rng().random_range(0..MAX_READING)
    }

    /// Replace the stored reading with a fresh draw.
    pub fn update_random(&mut self) {
        self.value = self.random_value();
    }

    /// Current reading, without mutation.
    pub fn value(&self) -> u32 {
        self.value
    }
}

/// Format a reading as the published JSON body.
///
/// The body is literally `{"kWH": <value>}`, single space after the colon.
pub fn reading_payload(value: u32) -> String {
    format!("{{\"kWH\": {}}}", value)
}
