const RAW_FULL_SCALE: f64 = 65536.0;

const STATUS_BITS_MASK: u16 = 0x0003;
const MEASUREMENT_KIND_BIT: u8 = 0x02;

/// Reference temperature of the humidity compensation, in °C.
pub const COMPENSATION_REFERENCE: f64 = 25.0;
/// Humidity correction per degree of distance from the reference, in %RH/°C.
pub const COMPENSATION_COEFFICIENT: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementKind {
    Temperature,
    Humidity,
}

/// The two data bytes of one measurement, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub high: u8,
    pub low: u8,
}

impl RawSample {
    pub const fn new(high: u8, low: u8) -> Self {
        Self { high, low }
    }

    pub const fn raw(&self) -> u16 {
        u16::from_be_bytes([self.high, self.low])
    }

    /// The two least significant bits, which the sensor uses as status flags.
    pub const fn status_bits(&self) -> u8 {
        self.low & STATUS_BITS_MASK as u8
    }

    pub const fn measurement_kind(&self) -> MeasurementKind {
        if self.low & MEASUREMENT_KIND_BIT == 0 {
            MeasurementKind::Temperature
        } else {
            MeasurementKind::Humidity
        }
    }

    /// Raw value with the status bits cleared.
    pub const fn masked(&self) -> u16 {
        self.raw() & !STATUS_BITS_MASK
    }
}

pub fn convert_temperature(raw: u16) -> f64 {
    (raw as f64 / RAW_FULL_SCALE) * 175.72 - 46.85
}

pub fn convert_humidity(raw: u16) -> f64 {
    (raw as f64 / RAW_FULL_SCALE) * 125.0 - 6.0
}

/// Corrects relative humidity for the distance of the measured temperature
/// from 25 °C.
pub fn compensated_humidity(temperature: f64, humidity: f64) -> f64 {
    (COMPENSATION_REFERENCE - temperature) * COMPENSATION_COEFFICIENT + humidity
}

/// CRC-8 over the data bytes, polynomial x^8 + x^5 + x^4 + 1.
///
/// The SHT2x family starts from 0x00, unlike the 0xFF used by SHT3x/SCD4x parts.
#[inline]
pub fn sht21_crc8(data: &[u8]) -> u8 {
    const CRC8_POLYNOMIAL: u8 = 0x31;
    const CRC8_INIT: u8 = 0x00;

    let mut crc: u8 = CRC8_INIT;

    for &b in data {
        crc ^= b;
        for _ in 0..8 {
            crc = if (crc & 0x80) != 0 {
                (crc << 1) ^ CRC8_POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }

    crc
}
