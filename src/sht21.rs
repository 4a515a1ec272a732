use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::{Error as _, I2c};

use crate::decode::{convert_humidity, convert_temperature, sht21_crc8};
use crate::{MeasurementKind, RawSample, SHT21Config, SHT21Error, SHT21Response};

pub const SHT21_ADDRESS: u8 = 0x40;

const SOFT_RESET_COMMAND: u8 = 0xfe;
const SOFT_RESET_DELAY: Duration = Duration::from_millis(15);

pub struct SHT21Sensor<'a, T: I2c> {
    i2c: &'a mut T,
    address: u8,
    config: SHT21Config,
}

impl<'a, T: I2c> SHT21Sensor<'a, T> {
    pub fn new(i2c: &'a mut T, address: u8) -> Self {
        Self::with_config(i2c, address, SHT21Config::default())
    }

    pub fn with_config(i2c: &'a mut T, address: u8, config: SHT21Config) -> Self {
        Self {
            i2c,
            address,
            config,
        }
    }

    pub fn config(&self) -> &SHT21Config {
        &self.config
    }

    /// Gives the bus back to the caller.
    pub fn release(self) -> &'a mut T {
        self.i2c
    }

    pub async fn soft_reset(&mut self) -> Result<(), SHT21Error> {
        debug!("Soft reset");
        self.i2c_write(&[SOFT_RESET_COMMAND]).await?;
        Timer::after(SOFT_RESET_DELAY).await;
        Ok(())
    }

    /// Temperature in °C.
    pub async fn read_temperature(&mut self) -> Result<f64, SHT21Error> {
        let raw = self.measure(MeasurementKind::Temperature).await?;
        Ok(convert_temperature(raw))
    }

    /// Relative humidity in %RH, uncompensated.
    pub async fn read_humidity(&mut self) -> Result<f64, SHT21Error> {
        let raw = self.measure(MeasurementKind::Humidity).await?;
        Ok(convert_humidity(raw))
    }

    pub async fn read(&mut self) -> Result<SHT21Response, SHT21Error> {
        let temperature = self.read_temperature().await?;
        let humidity = self.read_humidity().await?;
        Ok(SHT21Response::new(temperature, humidity))
    }

    async fn measure(&mut self, kind: MeasurementKind) -> Result<u16, SHT21Error> {
        let command = self.config.mode.command(kind);
        trace!("Measurement command {=u8:#x}", command);
        self.i2c_write(&[command]).await?;

        Timer::after(self.config.settle_delay).await;

        let mut buf = [0u8; 3];
        self.i2c_read(&mut buf).await?;
        trace!("Received I2C data: {:?}", &buf);

        let sample = RawSample::new(buf[0], buf[1]);
        if self.config.validate_crc {
            let expected = sht21_crc8(&buf[..2]);
            if expected != buf[2] {
                return Err(SHT21Error::ChecksumMismatch {
                    expected,
                    actual: buf[2],
                });
            }
        }
        if self.config.check_measurement_kind && sample.measurement_kind() != kind {
            return Err(SHT21Error::UnexpectedMeasurement);
        }

        if self.config.mask_status_bits {
            Ok(sample.masked())
        } else {
            Ok(sample.raw())
        }
    }

    async fn i2c_read(&mut self, read: &mut [u8]) -> Result<(), SHT21Error> {
        self.i2c
            .read(self.address, read)
            .await
            .map_err(|e| SHT21Error::I2CError(e.kind()))
    }

    async fn i2c_write(&mut self, write: &[u8]) -> Result<(), SHT21Error> {
        self.i2c
            .write(self.address, write)
            .await
            .map_err(|e| SHT21Error::I2CError(e.kind()))
    }
}
