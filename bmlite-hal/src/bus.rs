//! SPI bus abstractions
//!
//! The claim/attach/release/detach split mirrors how vendor SPI drivers
//! expose a shared bus controller separately from the per-device handles
//! attached to it. A platform implements [`SpiHost`] for the controller
//! and [`SpiDevice`] for one chip-selected device on it.

/// Largest transaction the HAL will issue, in bytes.
///
/// Platforms size DMA-capable transfer buffers from this when claiming
/// the bus.
pub const MAX_TRANSFER_LEN: usize = 2048;

/// Shared SPI bus controller.
///
/// One claim covers the bus lines; devices are attached on top of it and
/// must all be detached before the claim is released. Platforms map the
/// line identifiers in the configs onto their own pin muxing.
pub trait SpiHost {
    /// Error type shared by bus and device operations
    type Error: core::fmt::Debug;
    /// Device handle produced by [`SpiHost::attach`]
    type Device: SpiDevice<Error = Self::Error>;

    /// Claim the bus lines and prepare the controller.
    fn claim(&mut self, config: &BusConfig) -> Result<(), Self::Error>;

    /// Attach one chip-selected device to the claimed bus.
    fn attach(&mut self, config: &DeviceConfig) -> Result<Self::Device, Self::Error>;

    /// Release the bus claim.
    fn release(&mut self) -> Result<(), Self::Error>;
}

/// One device attached to a claimed SPI bus.
pub trait SpiDevice {
    /// Error type for device operations
    type Error: core::fmt::Debug;

    /// Transfer data (simultaneous read/write)
    ///
    /// Writes data from `write` while reading into `read`. Both buffers
    /// must be the same length. With `keep_selected` the chip-select line
    /// stays asserted after the transaction completes, so a follow-up
    /// transaction continues without re-arbitrating the bus.
    fn transfer(
        &mut self,
        read: &mut [u8],
        write: &[u8],
        keep_selected: bool,
    ) -> Result<(), Self::Error>;

    /// Write data, discarding whatever the device clocks back
    fn write(&mut self, data: &[u8], keep_selected: bool) -> Result<(), Self::Error>;

    /// Read data while clocking out the platform's idle pattern
    fn read(&mut self, buf: &mut [u8], keep_selected: bool) -> Result<(), Self::Error>;

    /// Detach the device from the bus, dropping its chip-select claim.
    fn detach(&mut self) -> Result<(), Self::Error>;
}

/// Bus-level configuration for [`SpiHost::claim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// Bus controller identifier
    pub bus: u8,
    /// Clock line
    pub sck: u8,
    /// Data-in line (device to host)
    pub miso: u8,
    /// Data-out line (host to device)
    pub mosi: u8,
    /// Largest transaction in bytes, for transfer buffer sizing
    pub max_transfer: usize,
}

/// Device-level configuration for [`SpiHost::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Chip-select line
    pub cs: u8,
    /// Clock frequency in Hz
    pub clock_hz: u32,
    /// Clock polarity and phase
    pub mode: Mode,
    /// Driver transaction queue depth
    pub queue_depth: usize,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}
