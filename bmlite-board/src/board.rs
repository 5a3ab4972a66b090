//! Session lifecycle and control lines
//!
//! One session at a time: acquisition refuses to run while any session
//! resource is held, and teardown is idempotent, stopping at the first
//! failing step so a later call resumes where the previous one stopped.

use bmlite_hal::bus::{BusConfig, DeviceConfig, Mode, SpiDevice, SpiHost, MAX_TRANSFER_LEN};
use bmlite_hal::config::{Interface, PinAssignment};
use bmlite_hal::error::{Error, Result};
use bmlite_hal::gpio::{GpioBank, InputPin, OutputPin};
use bmlite_hal::time::Timebase;

/// Reset pulse hold time in milliseconds.
pub const RESET_HOLD_MS: u32 = 100;

/// Settle time after releasing reset, in milliseconds.
pub const RESET_SETTLE_MS: u32 = 100;

/// Control lines held for the duration of a session.
struct Lines<G: GpioBank> {
    reset: G::Output,
    status: G::Input,
}

/// Board session for one BM-Lite sensor.
///
/// Owns the platform's SPI host and GPIO bank. While acquired it also
/// holds the attached device handle, the configured reset and status
/// lines, and a copy of the pin assignment.
pub struct Board<S: SpiHost, G: GpioBank> {
    spi: S,
    gpio: G,
    device: Option<S::Device>,
    lines: Option<Lines<G>>,
    assignment: Option<PinAssignment>,
}

impl<S: SpiHost, G: GpioBank> Board<S, G> {
    /// Create an unacquired session over the platform peripherals.
    pub fn new(spi: S, gpio: G) -> Self {
        Self {
            spi,
            gpio,
            device: None,
            lines: None,
            assignment: None,
        }
    }

    /// Acquire the bus, device, and control lines named by `pins`.
    ///
    /// Claims the bus, attaches the sensor as a mode-0 device, then
    /// configures the reset output and status input. Fails with
    /// [`Error::Internal`] if the assignment selects the byte-stream
    /// interface, if a session is already acquired or an interrupted
    /// [`release`](Self::release) still holds resources (retry the
    /// release first), or if any step fails; a failed step rolls back
    /// everything claimed before it.
    pub fn acquire(&mut self, pins: &PinAssignment) -> Result<()> {
        if pins.interface == Interface::Uart {
            log::error!("byte-stream interface is not supported");
            return Err(Error::Internal);
        }

        if self.device.is_some() || self.assignment.is_some() {
            log::error!("session already acquired or not fully released");
            return Err(Error::Internal);
        }

        let bus = BusConfig {
            bus: pins.bus,
            sck: pins.sck,
            miso: pins.miso,
            mosi: pins.mosi,
            max_transfer: MAX_TRANSFER_LEN,
        };
        if let Err(err) = self.spi.claim(&bus) {
            log::error!("failed to claim SPI bus {}: {:?}", pins.bus, err);
            return Err(Error::Internal);
        }

        let config = DeviceConfig {
            cs: pins.cs,
            clock_hz: pins.clock_hz,
            mode: Mode::Mode0,
            queue_depth: 1,
        };
        let device = match self.spi.attach(&config) {
            Ok(device) => device,
            Err(err) => {
                log::error!("failed to attach sensor device: {:?}", err);
                if let Err(err) = self.spi.release() {
                    log::error!("rollback failed to release SPI bus: {:?}", err);
                }
                return Err(Error::Internal);
            }
        };

        let reset = match self.gpio.configure_output(pins.reset) {
            Ok(pin) => pin,
            Err(err) => {
                log::error!("failed to configure reset line {}: {:?}", pins.reset, err);
                self.roll_back(device, &[]);
                return Err(Error::Internal);
            }
        };

        let status = match self.gpio.configure_input(pins.status) {
            Ok(pin) => pin,
            Err(err) => {
                log::error!("failed to configure status line {}: {:?}", pins.status, err);
                drop(reset);
                self.roll_back(device, &[pins.reset]);
                return Err(Error::Internal);
            }
        };

        self.device = Some(device);
        self.lines = Some(Lines { reset, status });
        self.assignment = Some(*pins);

        Ok(())
    }

    /// Undo a partial acquisition: detach the device, release the bus,
    /// and return any already-configured lines to hardware default.
    /// Best-effort; failures here are logged and swallowed.
    fn roll_back(&mut self, mut device: S::Device, lines: &[u8]) {
        if let Err(err) = device.detach() {
            log::error!("rollback failed to detach sensor device: {:?}", err);
        }
        if let Err(err) = self.spi.release() {
            log::error!("rollback failed to release SPI bus: {:?}", err);
        }
        for &line in lines {
            self.gpio.reset_line(line);
        }
    }

    /// Release every resource held by the session.
    ///
    /// Idempotent: with nothing held this returns `Ok` without touching
    /// hardware. Each step runs only if its resource is present; a
    /// failing step reports [`Error::Internal`] and leaves the remaining
    /// cleanup undone, with the device handle cleared only once its
    /// detach succeeds, so a later call resumes where this one stopped.
    pub fn release(&mut self) -> Result<()> {
        if let Some(mut device) = self.device.take() {
            if let Err(err) = device.detach() {
                log::error!("failed to detach sensor device: {:?}", err);
                self.device = Some(device);
                return Err(Error::Internal);
            }
        }

        if let Some(pins) = self.assignment {
            if let Err(err) = self.spi.release() {
                log::error!("failed to release SPI bus {}: {:?}", pins.bus, err);
                return Err(Error::Internal);
            }

            // Leave the sensor out of reset before its line goes back to
            // the hardware default.
            if let Some(mut lines) = self.lines.take() {
                lines.reset.set_high();
            }

            for line in pins.lines() {
                self.gpio.reset_line(line);
            }

            self.assignment = None;
        }

        Ok(())
    }

    /// Whether the session currently holds an attached device.
    pub fn is_acquired(&self) -> bool {
        self.device.is_some()
    }

    /// Pin assignment of the acquired session, if any.
    pub fn assignment(&self) -> Option<&PinAssignment> {
        self.assignment.as_ref()
    }

    pub(crate) fn device_mut(&mut self) -> Option<&mut S::Device> {
        self.device.as_mut()
    }

    /// Drive the sensor reset line.
    ///
    /// The line is electrically active-low: `active` pulls it to logic
    /// 0, deasserting drives it back to logic 1. Fails with
    /// [`Error::Internal`] when no session is acquired.
    pub fn set_reset(&mut self, active: bool) -> Result<()> {
        let lines = match self.lines.as_mut() {
            Some(lines) => lines,
            None => {
                log::error!("reset drive before acquire");
                return Err(Error::Internal);
            }
        };
        lines.reset.set_state(!active);
        Ok(())
    }

    /// Sample the sensor status line.
    ///
    /// True means logic high: ready or interrupt pending (active-high).
    /// Fails with [`Error::Internal`] when no session is acquired.
    pub fn status(&self) -> Result<bool> {
        let lines = match self.lines.as_ref() {
            Some(lines) => lines,
            None => {
                log::error!("status read before acquire");
                return Err(Error::Internal);
            }
        };
        Ok(lines.status.is_high())
    }

    /// Pulse the sensor through a full hardware reset.
    ///
    /// Asserts reset, holds it for [`RESET_HOLD_MS`], then releases it
    /// and waits [`RESET_SETTLE_MS`] for the sensor to come back up.
    pub fn hard_reset(&mut self, time: &mut impl Timebase) -> Result<()> {
        self.set_reset(true)?;
        time.delay_ms(RESET_HOLD_MS);
        self.set_reset(false)?;
        time.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }
}
