#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::peripherals::I2C0;
use embassy_rp::{bind_interrupts, i2c};
use embassy_sht21_sensor::{SHT21Config, SHT21Poller, SHT21Sensor, SHT21_ADDRESS};
use panic_probe as _;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    let sda = p.PIN_0;
    let scl = p.PIN_1;

    // Configure I2C
    let mut i2c = i2c::I2c::new_async(p.I2C0, scl, sda, Irqs, Default::default());

    // Create sensor instance
    let mut sensor = SHT21Sensor::with_config(&mut i2c, SHT21_ADDRESS, SHT21Config::default());
    match sensor.soft_reset().await {
        Ok(()) => info!("SHT21 reset"),
        Err(e) => error!("SHT21 reset failed: {}", e),
    }

    // Read sensor data
    let mut poller = SHT21Poller::new(sensor);
    poller.run().await
}
