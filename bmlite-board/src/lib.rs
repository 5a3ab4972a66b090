//! BM-Lite board session
//!
//! Resource lifecycle and transfer engine for the BM-Lite fingerprint
//! sensor, generic over the `bmlite-hal` platform traits. The session
//! owns the SPI device handle and the reset/status lines between
//! [`Board::acquire`] and [`Board::release`], and hands the protocol
//! layer a [`Transport`] implementation for its traffic.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Sensor protocol stack (opaque client)  │
//! └─────────────────────────────────────────┘
//!            │ Transport (send / recv)
//!            ▼
//! ┌─────────────────────────────────────────┐
//! │  Board (this crate)                     │
//! │  acquire/release, reset, status, delay  │
//! └─────────────────────────────────────────┘
//!            │ SpiHost / GpioBank / Timebase
//!            ▼
//! ┌─────────────────────────────────────────┐
//! │  Platform crate (ESP-IDF, embassy, ...) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! One session exists at a time; callers serialize their own calls. The
//! board holds no locks and enforces the single-owner contract through
//! `&mut self`.

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod link;
pub mod time;

pub use board::{Board, RESET_HOLD_MS, RESET_SETTLE_MS};
pub use time::Delay;

// Re-export the contract types callers handle directly
pub use bmlite_hal::{Error, Interface, PinAssignment, Result, Transport};
