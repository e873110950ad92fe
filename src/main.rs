//! Orwell node firmware entry point.
//!
//! Bootstraps ESP-IDF, wires the hardware adapters to their ports, and
//! hands everything to the loop driver:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  WifiLink      MqttLink      HttpUpdater     TickClock   │
//! │  (Network)     (Messaging)   (Update)        (Clock)     │
//! │  Bme680Adapter Bh1750Adapter MotionInput                 │
//! │  (Env)         (Light)       (Motion)                    │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │         NodeService (pure loop driver)         │      │
//! │  │  transport · status · update · motion ·        │      │
//! │  │  environment · light                           │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use esp_idf_hal::delay::Delay;
use esp_idf_hal::gpio::{AnyIOPin, PinDriver, Pull};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::FromValueType;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;

use orwell_node::adapters::bh1750::Bh1750Adapter;
use orwell_node::adapters::bme680::Bme680Adapter;
use orwell_node::adapters::motion_gpio::MotionInput;
use orwell_node::adapters::mqtt::MqttLink;
use orwell_node::adapters::time::TickClock;
use orwell_node::adapters::updater::HttpUpdater;
use orwell_node::adapters::wifi::WifiLink;
use orwell_node::app::{NodeIo, NodeService};
use orwell_node::config::{NodeConfig, BUILD_VERSION};
use orwell_node::pins;

/// Station credentials, baked in at build time.
const WIFI_SSID: &str = match option_env!("ORWELL_WIFI_SSID") {
    Some(s) => s,
    None => "orwell-net",
};
const WIFI_PASSWORD: &str = match option_env!("ORWELL_WIFI_PASSWORD") {
    Some(s) => s,
    None => "",
};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Orwell node {} starting", BUILD_VERSION);

    let config = NodeConfig::default();

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // ── 2. Network and messaging transports ───────────────────
    let wifi_driver = EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?;
    let net = WifiLink::new(wifi_driver, WIFI_SSID, WIFI_PASSWORD);
    let msg = MqttLink::new(config.mqtt_host, config.mqtt_port);

    // ── 3. Sensor buses ───────────────────────────────────────
    // Each sensor gets its own controller; no bus sharing needed.
    let i2c_config = I2cConfig::new().baudrate(100.kHz().into());
    let i2c0 = I2cDriver::new(
        peripherals.i2c0,
        unsafe { AnyIOPin::new(pins::I2C0_SDA_GPIO) },
        unsafe { AnyIOPin::new(pins::I2C0_SCL_GPIO) },
        &i2c_config,
    )?;
    let i2c1 = I2cDriver::new(
        peripherals.i2c1,
        unsafe { AnyIOPin::new(pins::I2C1_SDA_GPIO) },
        unsafe { AnyIOPin::new(pins::I2C1_SCL_GPIO) },
        &i2c_config,
    )?;
    let env = Bme680Adapter::new(i2c0, Delay::new_default());
    let light = Bh1750Adapter::new(i2c1);

    // ── 4. Motion input ───────────────────────────────────────
    let mut motion_pin = PinDriver::input(unsafe { AnyIOPin::new(pins::MOTION_GPIO) })?;
    motion_pin.set_pull(Pull::Down)?;
    let motion = MotionInput::new(motion_pin);

    // ── 5. Update and clock ───────────────────────────────────
    let update = HttpUpdater::new();
    let clock = TickClock::new();

    // ── 6. Run ────────────────────────────────────────────────
    info!("adapters wired, entering service loop");
    let mut service = NodeService::new(&config);
    service.run(NodeIo {
        net,
        msg,
        env,
        light,
        motion,
        update,
        clock,
    })
}
