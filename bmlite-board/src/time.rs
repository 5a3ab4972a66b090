//! Delay bridge to `embedded-hal`
//!
//! Wraps a [`Timebase`] as an [`embedded_hal::delay::DelayNs`] so driver
//! code written against the ecosystem trait can run on the HAL clock.
//! The clock only resolves milliseconds, so sub-millisecond requests
//! round up to one tick.

use bmlite_hal::time::Timebase;

/// `embedded-hal` delay adapter over a [`Timebase`].
pub struct Delay<'a, T: Timebase> {
    time: &'a mut T,
}

impl<'a, T: Timebase> Delay<'a, T> {
    /// Borrow `time` as an `embedded-hal` delay provider.
    pub fn new(time: &'a mut T) -> Self {
        Self { time }
    }
}

impl<T: Timebase> embedded_hal::delay::DelayNs for Delay<'_, T> {
    fn delay_ns(&mut self, ns: u32) {
        self.time.delay_ms(ns.div_ceil(1_000_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.time.delay_ms(us.div_ceil(1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.time.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmlite_hal::mock::MockClock;
    use embedded_hal::delay::DelayNs;

    #[test]
    fn test_sub_millisecond_requests_round_up() {
        let clock = MockClock::new();
        let mut time = clock.clone();
        let mut delay = Delay::new(&mut time);

        delay.delay_ns(1);
        delay.delay_us(999);
        delay.delay_us(1_000);
        delay.delay_us(1_001);

        assert_eq!(clock.waits(), [1, 1, 1, 2]);
    }

    #[test]
    fn test_zero_stays_zero() {
        let clock = MockClock::new();
        let mut time = clock.clone();
        let mut delay = Delay::new(&mut time);

        delay.delay_ns(0);
        delay.delay_ms(0);

        assert_eq!(clock.waits(), [0, 0]);
    }

    #[test]
    fn test_millisecond_requests_pass_through() {
        let clock = MockClock::new();
        let mut time = clock.clone();
        let mut delay = Delay::new(&mut time);

        delay.delay_ms(250);

        assert_eq!(clock.waits(), [250]);
        assert_eq!(clock.now_ms(), 250);
    }
}
