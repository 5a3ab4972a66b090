//! BM-Lite Hardware Abstraction Layer
//!
//! This crate defines the hardware contract between the BM-Lite sensor
//! stack and a concrete microcontroller platform: trait seams for the SPI
//! bus, the control-line GPIOs, and the timebase, plus the shared
//! configuration, error, and transport types. Platform crates implement
//! the traits; `bmlite-board` drives them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Sensor protocol stack (opaque client)  │
//! └─────────────────────────────────────────┘
//!                     │ Transport
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bmlite-board (session + transfers)     │
//! └─────────────────────────────────────────┘
//!                     │ SpiHost / GpioBank / Timebase
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bmlite-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │    esp-idf    │       │    embassy    │
//! │   platform    │       │   platform    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::SpiHost`], [`bus::SpiDevice`] - bus claim and full-duplex
//!   transfers with chip-select hold
//! - [`gpio::GpioBank`], [`gpio::OutputPin`], [`gpio::InputPin`] - line
//!   configuration and control
//! - [`time::Timebase`] - millisecond ticks and blocking delay
//! - [`transport::Transport`] - the seam handed to the protocol layer
//!
//! The `mock` feature adds a std-only mock platform implementing the
//! whole contract, for host tests of board and driver code.

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "mock")]
extern crate std;

pub mod bus;
pub mod config;
pub mod error;
pub mod gpio;
pub mod time;
pub mod transport;

#[cfg(feature = "mock")]
pub mod mock;

// Re-export key types at crate root for convenience
pub use bus::{BusConfig, DeviceConfig, Mode, SpiDevice, SpiHost, MAX_TRANSFER_LEN};
pub use config::{Interface, PinAssignment};
pub use error::{Error, Result};
pub use gpio::{GpioBank, InputPin, OutputPin};
pub use time::Timebase;
pub use transport::Transport;
