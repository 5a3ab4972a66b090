//! Protocol-layer transport seam
//!
//! The sensor protocol stack receives a [`Transport`] implementation at
//! construction time and drives all of its traffic through it. The board
//! session implements this trait on top of its transfer engine.

use crate::error::Result;

/// Byte transport driven by the protocol layer.
pub trait Transport {
    /// Transmit `data`, holding chip-select afterwards if `keep_selected`.
    fn send(&mut self, data: &[u8], keep_selected: bool) -> Result<()>;

    /// Receive into `buf`, holding chip-select afterwards if
    /// `keep_selected`.
    fn recv(&mut self, buf: &mut [u8], keep_selected: bool) -> Result<()>;

    /// Receive timeout the protocol layer should apply, in milliseconds.
    ///
    /// Advisory only; the transport itself enforces no timeout. A
    /// transport with no timeout configured reports 0.
    fn rx_timeout_ms(&self) -> u32;
}
