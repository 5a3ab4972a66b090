//! Time service tests: tick truncation, monotonicity, and delay
//! accounting on the mock clock.

use bmlite_board::Delay;
use bmlite_hal::mock::MockClock;
use bmlite_hal::Timebase;
use embedded_hal::delay::DelayNs;
use proptest::prelude::*;

#[test]
fn wait_zero_is_prompt() {
    let clock = MockClock::new();
    let mut time = clock.clone();

    time.delay_ms(0);

    assert_eq!(clock.waits(), [0]);
    assert_eq!(time.now_us(), 0);
}

#[test]
fn wait_advances_at_least_the_requested_time() {
    let clock = MockClock::new();
    let mut time = clock.clone();

    let before = time.now_ms();
    time.delay_ms(30);

    assert!(time.now_ms() >= before + 30);
}

proptest! {
    #[test]
    fn ticks_truncate_microseconds(us in 0u64..u64::MAX / 2) {
        let clock = MockClock::new();
        clock.advance_us(us);
        prop_assert_eq!(clock.now_ms(), us / 1_000);
    }

    #[test]
    fn ticks_never_decrease(advances in proptest::collection::vec(0u64..1_000_000, 1..20)) {
        let clock = MockClock::new();
        let mut last = clock.now_ms();
        for us in advances {
            clock.advance_us(us);
            let now = clock.now_ms();
            prop_assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn delay_bridge_never_waits_less_than_requested(us in 0u32..10_000_000) {
        let clock = MockClock::new();
        let mut time = clock.clone();
        Delay::new(&mut time).delay_us(us);

        let waited_us = u64::from(clock.waits()[0]) * 1_000;
        prop_assert!(waited_us >= u64::from(us));
    }
}
