use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;

use crate::{SHT21Error, SHT21Response, SHT21Sensor};

/// Polls a sensor at a fixed interval, logging failures and carrying on.
///
/// A failed poll is not retried; the next scheduled poll takes its place.
pub struct SHT21Poller<'a, T: I2c> {
    sensor: SHT21Sensor<'a, T>,
    poll_interval: Duration,
    failures: u32,
}

impl<'a, T: I2c> SHT21Poller<'a, T> {
    pub fn new(sensor: SHT21Sensor<'a, T>) -> Self {
        let poll_interval = sensor.config().poll_interval;
        Self {
            sensor,
            poll_interval,
            failures: 0,
        }
    }

    /// Number of failed polls so far.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn into_sensor(self) -> SHT21Sensor<'a, T> {
        self.sensor
    }

    pub async fn poll_once(&mut self) -> Result<SHT21Response, SHT21Error> {
        match self.sensor.read().await {
            Ok(data) => {
                info!("{}", data);
                Ok(data)
            }
            Err(e) => {
                self.failures = self.failures.saturating_add(1);
                if e.is_transport() {
                    error!("I2C communication error: {}", e);
                } else {
                    warn!("Discarding reading: {}", e);
                }
                Err(e)
            }
        }
    }

    /// One loop iteration: poll, then sleep for the poll interval.
    pub async fn cycle(&mut self) -> Result<SHT21Response, SHT21Error> {
        let result = self.poll_once().await;
        Timer::after(self.poll_interval).await;
        result
    }

    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.cycle().await;
        }
    }
}
