//! Lifecycle tests against the mock platform: acquisition ordering,
//! rollback on partial failure, and idempotent teardown.

use bmlite_board::{Board, Error, Interface, PinAssignment};
use bmlite_hal::bus::{Mode, MAX_TRANSFER_LEN};
use bmlite_hal::mock::{MockGpio, MockSpi};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn pins() -> PinAssignment {
    PinAssignment {
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
    }
}

fn make_board() -> (Board<MockSpi, MockGpio>, MockSpi, MockGpio) {
    let spi = MockSpi::new();
    let gpio = MockGpio::new();
    (Board::new(spi.clone(), gpio.clone()), spi, gpio)
}

// ---------------------------------------------------------------------------
// Acquire / release
// ---------------------------------------------------------------------------

#[test]
fn acquire_then_release_clears_everything() {
    let (mut board, spi, gpio) = make_board();

    board.acquire(&pins()).unwrap();
    assert!(board.is_acquired());
    assert!(spi.is_claimed());
    assert!(spi.is_attached());

    board.release().unwrap();
    assert!(!board.is_acquired());
    assert!(board.assignment().is_none());
    assert!(!spi.is_claimed());
    assert!(!spi.is_attached());
    assert_eq!(spi.detach_count(), 1);
    assert_eq!(spi.release_count(), 1);
    assert_eq!(gpio.reset_lines(), [45, 37, 35, 36, 48, 16]);
}

#[test]
fn acquire_propagates_bus_and_device_configuration() {
    let (mut board, spi, gpio) = make_board();
    board.acquire(&pins()).unwrap();

    let bus = spi.bus_config().unwrap();
    assert_eq!(bus.bus, 2);
    assert_eq!(bus.sck, 36);
    assert_eq!(bus.miso, 37);
    assert_eq!(bus.mosi, 35);
    assert_eq!(bus.max_transfer, MAX_TRANSFER_LEN);

    let device = spi.device_config().unwrap();
    assert_eq!(device.cs, 45);
    assert_eq!(device.clock_hz, 5_000_000);
    assert_eq!(device.mode, Mode::Mode0);
    assert_eq!(device.queue_depth, 1);

    assert_eq!(gpio.output_lines(), [48]);
    assert_eq!(gpio.input_lines(), [16]);
}

#[test]
fn release_is_idempotent() {
    let (mut board, spi, gpio) = make_board();

    board.acquire(&pins()).unwrap();
    board.release().unwrap();

    let detaches = spi.detach_count();
    let releases = spi.release_count();
    let resets = gpio.reset_lines().len();

    board.release().unwrap();
    assert_eq!(spi.detach_count(), detaches);
    assert_eq!(spi.release_count(), releases);
    assert_eq!(gpio.reset_lines().len(), resets);
}

#[test]
fn release_without_acquire_is_ok() {
    let (mut board, spi, gpio) = make_board();

    board.release().unwrap();
    board.release().unwrap();

    assert_eq!(spi.detach_count(), 0);
    assert_eq!(spi.release_count(), 0);
    assert!(gpio.reset_lines().is_empty());
}

#[test]
fn byte_stream_interface_is_refused() {
    let (mut board, spi, gpio) = make_board();
    let mut uart = pins();
    uart.interface = Interface::Uart;

    assert_eq!(board.acquire(&uart), Err(Error::Internal));
    assert_eq!(spi.claim_count(), 0);
    assert!(gpio.output_lines().is_empty());
}

#[test]
fn second_acquire_is_refused() {
    let (mut board, spi, _gpio) = make_board();
    board.acquire(&pins()).unwrap();

    assert_eq!(board.acquire(&pins()), Err(Error::Internal));
    assert_eq!(spi.claim_count(), 1);
    assert!(board.is_acquired());
}

#[test]
fn reacquire_after_release() {
    let (mut board, spi, _gpio) = make_board();

    for _ in 0..3 {
        board.acquire(&pins()).unwrap();
        board.release().unwrap();
    }

    assert_eq!(spi.claim_count(), 3);
    assert_eq!(spi.release_count(), 3);
}

#[test]
fn release_leaves_sensor_out_of_reset() {
    let (mut board, _spi, gpio) = make_board();
    board.acquire(&pins()).unwrap();
    board.set_reset(true).unwrap();

    board.release().unwrap();
    assert_eq!(gpio.level(48), Some(true));
}

// ---------------------------------------------------------------------------
// Failure injection: acquire
// ---------------------------------------------------------------------------

#[test]
fn bus_claim_failure_attempts_nothing_further() {
    let (mut board, spi, gpio) = make_board();
    spi.fail_next_claim();

    assert_eq!(board.acquire(&pins()), Err(Error::Internal));
    assert!(!board.is_acquired());
    assert_eq!(spi.attach_count(), 0);
    assert!(gpio.output_lines().is_empty());

    // One-shot fault cleared: the next attempt goes through.
    board.acquire(&pins()).unwrap();
}

#[test]
fn device_attach_failure_releases_the_bus() {
    let (mut board, spi, _gpio) = make_board();
    spi.fail_next_attach();

    assert_eq!(board.acquire(&pins()), Err(Error::Internal));
    assert!(!board.is_acquired());
    assert!(!spi.is_claimed());
    assert_eq!(spi.release_count(), 1);
}

#[test]
fn reset_line_failure_rolls_back_bus_and_device() {
    let (mut board, spi, gpio) = make_board();
    gpio.fail_next_output();

    assert_eq!(board.acquire(&pins()), Err(Error::Internal));
    assert!(!board.is_acquired());
    assert!(!spi.is_claimed());
    assert!(!spi.is_attached());
    assert_eq!(spi.detach_count(), 1);
    assert_eq!(spi.release_count(), 1);
    assert!(gpio.reset_lines().is_empty());
}

#[test]
fn status_line_failure_also_unwinds_the_reset_line() {
    let (mut board, spi, gpio) = make_board();
    gpio.fail_next_input();

    assert_eq!(board.acquire(&pins()), Err(Error::Internal));
    assert!(!spi.is_claimed());
    assert!(!spi.is_attached());
    assert_eq!(gpio.output_lines(), [48]);
    assert_eq!(gpio.reset_lines(), [48]);
}

// ---------------------------------------------------------------------------
// Failure injection: release
// ---------------------------------------------------------------------------

#[test]
fn failed_detach_keeps_the_handle_for_retry() {
    let (mut board, spi, gpio) = make_board();
    board.acquire(&pins()).unwrap();
    spi.fail_next_detach();

    assert_eq!(board.release(), Err(Error::Internal));
    assert!(board.is_acquired());
    assert_eq!(spi.release_count(), 0);
    assert!(gpio.reset_lines().is_empty());

    // Fault cleared; the retry completes the teardown.
    board.release().unwrap();
    assert!(!board.is_acquired());
    assert_eq!(spi.detach_count(), 2);
    assert_eq!(spi.release_count(), 1);
    assert_eq!(gpio.reset_lines().len(), 6);
}

#[test]
fn failed_bus_release_stops_before_line_reset() {
    let (mut board, spi, gpio) = make_board();
    board.acquire(&pins()).unwrap();
    spi.fail_next_release();

    assert_eq!(board.release(), Err(Error::Internal));
    // Device already detached; the bus claim and lines are still held.
    assert!(!board.is_acquired());
    assert!(board.assignment().is_some());
    assert!(gpio.reset_lines().is_empty());

    // The retry resumes at the bus release, without a second detach.
    board.release().unwrap();
    assert_eq!(spi.detach_count(), 1);
    assert_eq!(spi.release_count(), 2);
    assert_eq!(gpio.reset_lines().len(), 6);
}

#[test]
fn acquire_is_refused_until_an_interrupted_release_completes() {
    let (mut board, spi, gpio) = make_board();
    board.acquire(&pins()).unwrap();
    spi.fail_next_release();
    assert_eq!(board.release(), Err(Error::Internal));

    // The half-released session still holds the bus claim and the line
    // handles; a fresh acquire must not claim over them.
    assert_eq!(board.acquire(&pins()), Err(Error::Internal));
    assert_eq!(spi.claim_count(), 1);
    assert_eq!(gpio.output_lines(), [48]);

    // A release retry completes the teardown, after which acquisition
    // works again.
    board.release().unwrap();
    assert_eq!(gpio.reset_lines().len(), 6);
    board.acquire(&pins()).unwrap();
    assert_eq!(spi.claim_count(), 2);
}
