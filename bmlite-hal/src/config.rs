//! Session configuration types
//!
//! The pin assignment is supplied by the caller (CLI or configuration
//! layer) and is immutable for the lifetime of one session. The board
//! stores its own copy while acquired; sourcing and parsing the values is
//! outside this stack.

/// Transport kind selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Interface {
    /// Synchronous serial bus, the only kind this HAL drives
    Spi,
    /// Byte-stream transport, not supported by this HAL
    Uart,
}

/// Pin and bus assignment for one sensor session.
///
/// Line numbers are platform GPIO identifiers; the platform validates
/// them when the lines are configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    /// Bus controller identifier
    pub bus: u8,
    /// Clock line
    pub sck: u8,
    /// Data-in line (sensor to host)
    pub miso: u8,
    /// Data-out line (host to sensor)
    pub mosi: u8,
    /// Chip-select line
    pub cs: u8,
    /// Sensor reset line, driven active-low
    pub reset: u8,
    /// Sensor status/interrupt line, read active-high
    pub status: u8,
    /// Bus clock frequency in Hz
    pub clock_hz: u32,
    /// Transport kind
    pub interface: Interface,
    /// Receive timeout in milliseconds, advisory for the protocol layer
    pub rx_timeout_ms: u32,
}

impl PinAssignment {
    /// All six GPIO lines of the assignment, in teardown order.
    pub const fn lines(&self) -> [u8; 6] {
        [
            self.cs,
            self.miso,
            self.mosi,
            self.sck,
            self.reset,
            self.status,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_cover_all_six_in_teardown_order() {
        let pins = PinAssignment {
            bus: 2,
            sck: 36,
            miso: 37,
            mosi: 35,
            cs: 45,
            reset: 48,
            status: 16,
            clock_hz: 5_000_000,
            interface: Interface::Spi,
            rx_timeout_ms: 3_000,
        };
        assert_eq!(pins.lines(), [45, 37, 35, 36, 48, 16]);
    }
}
