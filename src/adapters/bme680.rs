//! BME680 combined sensor adapter.
//!
//! Wraps the `bme680` driver crate behind [`EnvSensorPort`]. Forced
//! mode with one measurement per trigger; oversampling T x8 / P x4 /
//! H x2 with an IIR filter of 3, gas plate heated to 320 C for 150 ms.
//! Generic over the bus and delay so host tests can substitute fakes.

use core::time::Duration;

use bme680::{
    Bme680, I2CAddress, IIRFilterSize, OversamplingSetting, PowerMode, SettingsBuilder,
};
use embedded_hal_0_2::blocking::delay::DelayMs;
use embedded_hal_0_2::blocking::i2c::{Read, Write};
use log::warn;

use crate::app::ports::{EnvReading, EnvSensorPort};
use crate::error::SensorError;

const GAS_HEATER_TEMP_C: u16 = 320;
const GAS_HEATER_DURATION_MS: u64 = 150;
const AMBIENT_TEMP_HINT_C: i8 = 25;

pub struct Bme680Adapter<I2C, D> {
    /// Bus handle, consumed by the driver at `begin`.
    bus: Option<I2C>,
    delay: D,
    dev: Option<Bme680<I2C, D>>,
}

impl<I2C, D> Bme680Adapter<I2C, D>
where
    I2C: Read + Write,
    D: DelayMs<u8>,
{
    pub fn new(bus: I2C, delay: D) -> Self {
        Self {
            bus: Some(bus),
            delay,
            dev: None,
        }
    }
}

impl<I2C, D> EnvSensorPort for Bme680Adapter<I2C, D>
where
    I2C: Read + Write,
    D: DelayMs<u8>,
{
    fn begin(&mut self) -> Result<(), SensorError> {
        let bus = self.bus.take().ok_or(SensorError::NotPresent)?;
        let mut dev = Bme680::init(bus, &mut self.delay, I2CAddress::Secondary)
            .map_err(|_| SensorError::NotPresent)?;

        let settings = SettingsBuilder::new()
            .with_temperature_oversampling(OversamplingSetting::OS8x)
            .with_pressure_oversampling(OversamplingSetting::OS4x)
            .with_humidity_oversampling(OversamplingSetting::OS2x)
            .with_temperature_filter(IIRFilterSize::Size3)
            .with_gas_measurement(
                Duration::from_millis(GAS_HEATER_DURATION_MS),
                GAS_HEATER_TEMP_C,
                AMBIENT_TEMP_HINT_C,
            )
            .with_run_gas(true)
            .build();
        dev.set_sensor_settings(&mut self.delay, settings)
            .map_err(|_| SensorError::NotPresent)?;

        self.dev = Some(dev);
        Ok(())
    }

    fn read(&mut self) -> Result<EnvReading, SensorError> {
        let dev = self.dev.as_mut().ok_or(SensorError::NotPresent)?;

        dev.set_sensor_mode(&mut self.delay, PowerMode::ForcedMode)
            .map_err(|_| {
                warn!("BME680: forced-mode trigger failed");
                SensorError::ReadFailed
            })?;

        let (data, _condition) = dev
            .get_sensor_data(&mut self.delay)
            .map_err(|_| SensorError::ReadFailed)?;

        Ok(EnvReading {
            temperature_c: data.temperature_celsius(),
            pressure_pa: data.pressure_hpa() * 100.0,
            humidity_pct: data.humidity_percent(),
            gas_ohms: data.gas_resistance_ohm() as f32,
        })
    }
}
