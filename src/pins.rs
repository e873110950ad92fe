//! GPIO assignments for the Orwell node board.

#![allow(dead_code)] // Referenced from the espidf-gated bootstrap only.

/// PIR motion input (level-sampled, pulled down).
pub const MOTION_GPIO: i32 = 10;

/// I2C0: BME680 combined sensor.
pub const I2C0_SDA_GPIO: i32 = 8;
pub const I2C0_SCL_GPIO: i32 = 9;

/// I2C1: BH1750 light sensor.
pub const I2C1_SDA_GPIO: i32 = 17;
pub const I2C1_SCL_GPIO: i32 = 18;
