use embassy_time::Duration;

use crate::decode::MeasurementKind;

/// How the sensor behaves while a conversion is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementMode {
    /// The sensor stretches the clock until the result is ready.
    #[default]
    Hold,
    /// The sensor releases the bus and NACKs reads until the result is ready.
    NoHold,
}

impl MeasurementMode {
    pub const fn command(&self, kind: MeasurementKind) -> u8 {
        match (self, kind) {
            (MeasurementMode::Hold, MeasurementKind::Temperature) => 0xe3,
            (MeasurementMode::Hold, MeasurementKind::Humidity) => 0xe5,
            (MeasurementMode::NoHold, MeasurementKind::Temperature) => 0xf3,
            (MeasurementMode::NoHold, MeasurementKind::Humidity) => 0xf5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SHT21Config {
    pub mode: MeasurementMode,
    /// Wait between issuing a measurement command and reading its result.
    /// Must cover the sensor's conversion time.
    pub settle_delay: Duration,
    /// Sleep between two polls of [`crate::SHT21Poller`].
    pub poll_interval: Duration,
    pub validate_crc: bool,
    /// Reject a result whose status bits tag it as the other measurement.
    pub check_measurement_kind: bool,
    /// Clear the two status bits before decoding.
    pub mask_status_bits: bool,
}

impl Default for SHT21Config {
    fn default() -> Self {
        Self {
            mode: MeasurementMode::Hold,
            settle_delay: Duration::from_millis(100),
            poll_interval: Duration::from_secs(1),
            validate_crc: true,
            check_measurement_kind: false,
            mask_status_bits: false,
        }
    }
}

impl SHT21Config {
    pub const fn no_hold() -> Self {
        Self {
            mode: MeasurementMode::NoHold,
            settle_delay: Duration::from_millis(100),
            poll_interval: Duration::from_secs(1),
            validate_crc: true,
            check_measurement_kind: false,
            mask_status_bits: false,
        }
    }

    /// Shortest settle delay the datasheet allows for a 14-bit temperature conversion.
    pub const fn fast() -> Self {
        Self {
            mode: MeasurementMode::Hold,
            settle_delay: Duration::from_millis(85),
            poll_interval: Duration::from_secs(1),
            validate_crc: true,
            check_measurement_kind: false,
            mask_status_bits: false,
        }
    }
}
