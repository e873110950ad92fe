//! BH1750 ambient light sensor adapter.
//!
//! Minimal driver for the ROHM BH1750FVI behind [`LightSensorPort`].
//! The part is simple enough that the whole protocol is three opcodes:
//! power on, pick a mode, then read two big-endian counts bytes. Runs
//! in continuous high-resolution mode 2 (0.5 lx steps, 120 ms cycle).
//! Generic over `embedded-hal` so it works against any bus, including
//! a scripted one in tests.

use embedded_hal::i2c::I2c;

use crate::app::ports::LightSensorPort;
use crate::error::SensorError;

/// ADDR pin low. High would be 0x5C.
const ADDR: u8 = 0x23;

const OP_POWER_ON: u8 = 0x01;
const OP_CONT_HIRES_2: u8 = 0x11;

pub struct Bh1750Adapter<I2C> {
    bus: I2C,
}

impl<I2C: I2c> Bh1750Adapter<I2C> {
    pub fn new(bus: I2C) -> Self {
        Self { bus }
    }
}

impl<I2C: I2c> LightSensorPort for Bh1750Adapter<I2C> {
    fn begin(&mut self) -> Result<(), SensorError> {
        self.bus
            .write(ADDR, &[OP_POWER_ON])
            .map_err(|_| SensorError::NotPresent)?;
        self.bus
            .write(ADDR, &[OP_CONT_HIRES_2])
            .map_err(|_| SensorError::NotPresent)?;
        Ok(())
    }

    fn read(&mut self) -> Result<u32, SensorError> {
        let mut raw = [0u8; 2];
        self.bus
            .read(ADDR, &mut raw)
            .map_err(|_| SensorError::Bus)?;
        let counts = u32::from(u16::from_be_bytes(raw));
        // Datasheet: lux = counts / 1.2, halved again in mode 2.
        // counts * 10 / 24 keeps it in integer arithmetic.
        Ok(counts * 10 / 24)
    }
}
