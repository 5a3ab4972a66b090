//! Time service abstraction
//!
//! Millisecond ticks derived from a free-running microsecond counter,
//! plus a blocking delay that yields the processor while it waits.

/// Monotonic time source and blocking delay.
///
/// Platforms implement the microsecond counter and the delay; the
/// millisecond tick is derived here by truncation.
pub trait Timebase {
    /// Current value of the free-running microsecond counter.
    fn now_us(&self) -> u64;

    /// Block for at least `ms` milliseconds.
    ///
    /// Yields the processor to other work during the wait rather than
    /// busy-spinning. Zero returns promptly.
    fn delay_ms(&mut self, ms: u32);

    /// One-time counter setup.
    ///
    /// Platforms whose counter free-runs from boot keep the default
    /// no-op.
    fn init(&mut self) {}

    /// Current tick count in whole milliseconds.
    ///
    /// Truncated, not rounded. Monotonically non-decreasing; never
    /// fails.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1_000
    }
}
