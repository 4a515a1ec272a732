use embassy_sht21_sensor::{
    ErrorKind, MeasurementMode, SHT21Config, SHT21Error, SHT21Sensor, SHT21_ADDRESS,
};
use embassy_time::{Duration, Instant};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

const TEMPERATURE_RESPONSE: [u8; 3] = [0x66, 0x4c, 0x4f];
const HUMIDITY_RESPONSE: [u8; 3] = [0x7c, 0x82, 0x97];

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

fn measurement(command: u8, response: [u8; 3]) -> [I2cTransaction; 2] {
    [
        I2cTransaction::write(SHT21_ADDRESS, vec![command]),
        I2cTransaction::read(SHT21_ADDRESS, response.to_vec()),
    ]
}

#[tokio::test]
async fn reads_temperature_with_hold_master_command() {
    let mut i2c = I2cMock::new(&measurement(0xe3, TEMPERATURE_RESPONSE));

    {
        let mut sensor = SHT21Sensor::new(&mut i2c, SHT21_ADDRESS);
        let temperature = sensor.read_temperature().await.unwrap();
        assert_close(temperature, 23.367214355468754);
    }

    i2c.done();
}

#[tokio::test]
async fn reads_humidity_with_hold_master_command() {
    let mut i2c = I2cMock::new(&measurement(0xe5, HUMIDITY_RESPONSE));

    {
        let mut sensor = SHT21Sensor::new(&mut i2c, SHT21_ADDRESS);
        let humidity = sensor.read_humidity().await.unwrap();
        assert_close(humidity, (0x7c82 as f64 / 65536.0) * 125.0 - 6.0);
    }

    i2c.done();
}

#[tokio::test]
async fn read_combines_both_measurements() {
    let mut expectations = measurement(0xe3, TEMPERATURE_RESPONSE).to_vec();
    expectations.extend(measurement(0xe5, HUMIDITY_RESPONSE));
    let mut i2c = I2cMock::new(&expectations);

    {
        let mut sensor = SHT21Sensor::new(&mut i2c, SHT21_ADDRESS);
        let response = sensor.read().await.unwrap();
        assert_close(response.temperature, 23.367214355468754);
        assert_close(response.humidity, 54.794830322265625);
        assert_close(
            response.compensated_humidity,
            (25.0 - response.temperature) * 0.15 + response.humidity,
        );
    }

    i2c.done();
}

#[tokio::test]
async fn no_hold_mode_uses_polling_commands() {
    let mut expectations = measurement(0xf3, TEMPERATURE_RESPONSE).to_vec();
    expectations.extend(measurement(0xf5, HUMIDITY_RESPONSE));
    let mut i2c = I2cMock::new(&expectations);

    {
        let config = SHT21Config::no_hold();
        assert_eq!(config.mode, MeasurementMode::NoHold);
        let mut sensor = SHT21Sensor::with_config(&mut i2c, SHT21_ADDRESS, config);
        assert!(sensor.read().await.is_ok());
    }

    i2c.done();
}

#[tokio::test]
async fn waits_settle_delay_before_reading_result() {
    let mut i2c = I2cMock::new(&measurement(0xe3, TEMPERATURE_RESPONSE));

    {
        let mut sensor = SHT21Sensor::new(&mut i2c, SHT21_ADDRESS);
        let started = Instant::now();
        sensor.read_temperature().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    i2c.done();
}

#[tokio::test]
async fn write_failure_is_a_transport_error() {
    let expectations =
        [I2cTransaction::write(SHT21_ADDRESS, vec![0xe3]).with_error(ErrorKind::Other)];
    let mut i2c = I2cMock::new(&expectations);

    {
        let mut sensor = SHT21Sensor::new(&mut i2c, SHT21_ADDRESS);
        let error = sensor.read_temperature().await.unwrap_err();
        assert_eq!(error, SHT21Error::I2CError(ErrorKind::Other));
        assert!(error.is_transport());
    }

    i2c.done();
}

#[tokio::test]
async fn read_failure_is_a_transport_error() {
    let expectations = [
        I2cTransaction::write(SHT21_ADDRESS, vec![0xe5]),
        I2cTransaction::read(SHT21_ADDRESS, vec![0, 0, 0]).with_error(ErrorKind::Other),
    ];
    let mut i2c = I2cMock::new(&expectations);

    {
        let mut sensor = SHT21Sensor::new(&mut i2c, SHT21_ADDRESS);
        assert_eq!(
            sensor.read_humidity().await,
            Err(SHT21Error::I2CError(ErrorKind::Other))
        );
    }

    i2c.done();
}

#[tokio::test]
async fn rejects_corrupted_checksum() {
    let mut i2c = I2cMock::new(&measurement(0xe3, [0x66, 0x4c, 0x00]));

    {
        let mut sensor = SHT21Sensor::new(&mut i2c, SHT21_ADDRESS);
        let error = sensor.read_temperature().await.unwrap_err();
        assert_eq!(
            error,
            SHT21Error::ChecksumMismatch {
                expected: 0x4f,
                actual: 0x00
            }
        );
        assert!(!error.is_transport());
    }

    i2c.done();
}

#[tokio::test]
async fn checksum_is_ignored_when_validation_is_off() {
    let mut i2c = I2cMock::new(&measurement(0xe3, [0x66, 0x4c, 0x00]));

    {
        let config = SHT21Config {
            validate_crc: false,
            ..SHT21Config::default()
        };
        let mut sensor = SHT21Sensor::with_config(&mut i2c, SHT21_ADDRESS, config);
        assert_close(sensor.read_temperature().await.unwrap(), 23.367214355468754);
    }

    i2c.done();
}

#[tokio::test]
async fn decodes_status_tagged_temperature_by_default() {
    let mut i2c = I2cMock::new(&measurement(0xe3, [0x66, 0x4e, 0x2d]));

    {
        let mut sensor = SHT21Sensor::new(&mut i2c, SHT21_ADDRESS);
        assert_close(sensor.read_temperature().await.unwrap(), 23.37257690429687);
    }

    i2c.done();
}

#[tokio::test]
async fn rejects_humidity_result_for_temperature_command() {
    let mut i2c = I2cMock::new(&measurement(0xe3, HUMIDITY_RESPONSE));

    {
        let config = SHT21Config {
            check_measurement_kind: true,
            ..SHT21Config::default()
        };
        let mut sensor = SHT21Sensor::with_config(&mut i2c, SHT21_ADDRESS, config);
        assert_eq!(
            sensor.read_temperature().await,
            Err(SHT21Error::UnexpectedMeasurement)
        );
    }

    i2c.done();
}

#[tokio::test]
async fn masking_clears_status_bits_before_decoding() {
    let mut i2c = I2cMock::new(&measurement(0xe5, HUMIDITY_RESPONSE));

    {
        let config = SHT21Config {
            mask_status_bits: true,
            ..SHT21Config::default()
        };
        let mut sensor = SHT21Sensor::with_config(&mut i2c, SHT21_ADDRESS, config);
        assert_close(sensor.read_humidity().await.unwrap(), 54.791015625);
    }

    i2c.done();
}

#[tokio::test]
async fn soft_reset_sends_reset_command() {
    let expectations = [I2cTransaction::write(SHT21_ADDRESS, vec![0xfe])];
    let mut i2c = I2cMock::new(&expectations);

    {
        let mut sensor = SHT21Sensor::new(&mut i2c, SHT21_ADDRESS);
        sensor.soft_reset().await.unwrap();
    }

    i2c.done();
}

#[tokio::test]
async fn release_returns_the_bus() {
    let mut i2c = I2cMock::new(&[]);

    let sensor = SHT21Sensor::new(&mut i2c, SHT21_ADDRESS);
    let bus = sensor.release();
    bus.done();
}
