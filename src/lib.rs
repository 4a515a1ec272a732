#![cfg_attr(not(test), no_std)]

// This mod must go first, so that the others see its macros.
mod fmt;

mod config;
mod decode;
mod poller;
mod sht21;

use core::fmt::{Display, Formatter};

pub use config::{MeasurementMode, SHT21Config};
pub use decode::{
    compensated_humidity, convert_humidity, convert_temperature, sht21_crc8, MeasurementKind,
    RawSample,
};
pub use embedded_hal_async::i2c::ErrorKind;
pub use poller::SHT21Poller;
pub use sht21::{SHT21Sensor, SHT21_ADDRESS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SHT21Response {
    pub temperature: f64,
    pub humidity: f64,
    pub compensated_humidity: f64,
}

impl SHT21Response {
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
            compensated_humidity: compensated_humidity(temperature, humidity),
        }
    }
}

impl Display for SHT21Response {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Temperature: {:.2}°C", self.temperature)?;
        writeln!(f, "Humidity: {:.2}%", self.humidity)?;
        write!(f, "Compensated Humidity: {:.2}%", self.compensated_humidity)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SHT21Response {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", defmt::Display2Format(self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SHT21Error {
    /// The bus transaction failed: device absent, NACK, arbitration loss or short read.
    I2CError(ErrorKind),
    /// The checksum byte does not match the two data bytes.
    ChecksumMismatch { expected: u8, actual: u8 },
    /// The status bits tag the result as the other measurement.
    UnexpectedMeasurement,
}

impl SHT21Error {
    pub fn is_transport(&self) -> bool {
        matches!(self, SHT21Error::I2CError(_))
    }
}

impl Display for SHT21Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            SHT21Error::I2CError(kind) => write!(f, "I2C communication error: {kind}"),
            SHT21Error::ChecksumMismatch { expected, actual } => write!(
                f,
                "checksum mismatch: expected {expected:#04x}, received {actual:#04x}"
            ),
            SHT21Error::UnexpectedMeasurement => {
                write!(f, "sensor returned a different measurement than requested")
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SHT21Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SHT21Error::I2CError(kind) => {
                defmt::write!(f, "I2CError({})", defmt::Debug2Format(kind))
            }
            SHT21Error::ChecksumMismatch { expected, actual } => defmt::write!(
                f,
                "ChecksumMismatch {{ expected: {=u8:#x}, actual: {=u8:#x} }}",
                expected,
                actual
            ),
            SHT21Error::UnexpectedMeasurement => defmt::write!(f, "UnexpectedMeasurement"),
        }
    }
}
