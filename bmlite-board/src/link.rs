//! Transfer engine
//!
//! Fixed-length exchanges over the acquired device, plus the
//! [`Transport`] implementation the protocol layer drives. A transaction
//! either completes in full or reports [`Error::Io`] with the buffer
//! contents unspecified; no partial-transfer result exists.

use bmlite_hal::bus::{SpiDevice, SpiHost};
use bmlite_hal::error::{Error, Result};
use bmlite_hal::gpio::GpioBank;
use bmlite_hal::transport::Transport;

use crate::board::Board;

impl<S: SpiHost, G: GpioBank> Board<S, G> {
    fn active_device(&mut self) -> Result<&mut S::Device> {
        match self.device_mut() {
            Some(device) => Ok(device),
            None => {
                log::error!("transfer before acquire");
                Err(Error::Internal)
            }
        }
    }

    /// Exchange `write.len()` bytes full-duplex.
    ///
    /// Both buffers must be the same length. Zero length reports `Ok`
    /// immediately without touching the bus, even on an unacquired
    /// session. With `keep_selected` the chip-select line stays asserted
    /// after the transaction, enabling back-to-back exchanges without
    /// re-arbitration.
    pub fn transfer(&mut self, read: &mut [u8], write: &[u8], keep_selected: bool) -> Result<()> {
        if read.is_empty() && write.is_empty() {
            return Ok(());
        }
        if read.len() != write.len() {
            log::error!(
                "transfer buffers differ: {} read, {} write",
                read.len(),
                write.len()
            );
            return Err(Error::Internal);
        }

        let device = self.active_device()?;
        if let Err(err) = device.transfer(read, write, keep_selected) {
            log::error!("SPI transfer failed: {:?}", err);
            return Err(Error::Io);
        }
        Ok(())
    }

    /// Transmit-only exchange; whatever the sensor clocks back is
    /// discarded.
    pub fn send(&mut self, data: &[u8], keep_selected: bool) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }

        let device = self.active_device()?;
        if let Err(err) = device.write(data, keep_selected) {
            log::error!("SPI send failed: {:?}", err);
            return Err(Error::Io);
        }
        Ok(())
    }

    /// Receive-only exchange; the transmit direction clocks the
    /// platform's idle pattern.
    pub fn recv(&mut self, buf: &mut [u8], keep_selected: bool) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }

        let device = self.active_device()?;
        if let Err(err) = device.read(buf, keep_selected) {
            log::error!("SPI receive failed: {:?}", err);
            return Err(Error::Io);
        }
        Ok(())
    }
}

impl<S: SpiHost, G: GpioBank> Transport for Board<S, G> {
    fn send(&mut self, data: &[u8], keep_selected: bool) -> Result<()> {
        Board::send(self, data, keep_selected)
    }

    fn recv(&mut self, buf: &mut [u8], keep_selected: bool) -> Result<()> {
        Board::recv(self, buf, keep_selected)
    }

    /// The acquired assignment's receive timeout, or 0 without a
    /// session.
    fn rx_timeout_ms(&self) -> u32 {
        self.assignment().map(|pins| pins.rx_timeout_ms).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmlite_hal::mock::{MockGpio, MockSpi};

    #[test]
    fn test_zero_length_exchange_is_a_no_op() {
        let spi = MockSpi::new();
        let mut board = Board::new(spi.clone(), MockGpio::new());

        // The short-circuit comes before the session check.
        board.transfer(&mut [], &[], false).unwrap();
        board.send(&[], true).unwrap();
        board.recv(&mut [], true).unwrap();

        assert_eq!(spi.transaction_count(), 0);
    }

    #[test]
    fn test_mismatched_buffers_are_rejected() {
        let spi = MockSpi::new();
        let mut board = Board::new(spi.clone(), MockGpio::new());

        let mut read = [0u8; 2];
        assert_eq!(
            board.transfer(&mut read, &[0; 3], false),
            Err(Error::Internal)
        );
        assert_eq!(spi.transaction_count(), 0);
    }

    #[test]
    fn test_transfers_require_a_session() {
        let mut board = Board::new(MockSpi::new(), MockGpio::new());

        let mut buf = [0u8; 4];
        assert_eq!(board.transfer(&mut buf, &[0; 4], false), Err(Error::Internal));
        assert_eq!(board.send(&[1], false), Err(Error::Internal));
        assert_eq!(board.recv(&mut buf, false), Err(Error::Internal));
    }
}
