//! Mock platform for host tests
//!
//! Implements the whole hardware contract with shared-state handles:
//! cloning a mock shares its underlying state, so a test can keep a probe
//! on the platform after moving it into a board session. Failure
//! injection is one-shot: arming `fail_next_*` makes exactly the next
//! matching call fail, then the flag clears so a retry can succeed.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::vec::Vec;

use crate::bus::{BusConfig, DeviceConfig, SpiDevice, SpiHost};
use crate::gpio::{GpioBank, InputPin, OutputPin};
use crate::time::Timebase;

/// Error type shared by every mock peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Direction of a recorded bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Full-duplex exchange
    Exchange,
    /// Transmit-only
    Send,
    /// Receive-only
    Recv,
}

/// One recorded bus transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Direction of the exchange
    pub direction: Direction,
    /// Bytes clocked out (empty for receive-only)
    pub tx: Vec<u8>,
    /// Transaction length in bytes
    pub len: usize,
    /// Chip-select held asserted after completion
    pub keep_selected: bool,
}

#[derive(Default)]
struct SpiState {
    claimed: bool,
    attached: bool,
    bus_config: Option<BusConfig>,
    device_config: Option<DeviceConfig>,
    claims: usize,
    attaches: usize,
    releases: usize,
    detaches: usize,
    fail_claim: bool,
    fail_attach: bool,
    fail_release: bool,
    fail_detach: bool,
    fail_transfer: bool,
    response: Vec<u8>,
    transactions: Vec<Transaction>,
}

/// Mock SPI bus controller.
///
/// Clones share state; keep one clone as a probe and hand the other to
/// the code under test.
#[derive(Clone, Default)]
pub struct MockSpi {
    state: Arc<Mutex<SpiState>>,
}

impl MockSpi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot failure for the next `claim`.
    pub fn fail_next_claim(&self) {
        self.state.lock().unwrap().fail_claim = true;
    }

    /// Arm a one-shot failure for the next `attach`.
    pub fn fail_next_attach(&self) {
        self.state.lock().unwrap().fail_attach = true;
    }

    /// Arm a one-shot failure for the next `release`.
    pub fn fail_next_release(&self) {
        self.state.lock().unwrap().fail_release = true;
    }

    /// Arm a one-shot failure for the next `detach`.
    pub fn fail_next_detach(&self) {
        self.state.lock().unwrap().fail_detach = true;
    }

    /// Arm a one-shot failure for the next transfer of any direction.
    pub fn fail_next_transfer(&self) {
        self.state.lock().unwrap().fail_transfer = true;
    }

    /// Queue bytes to feed into subsequent receive buffers.
    ///
    /// Receive directions drain this queue; once empty, buffers fill
    /// with zeroes.
    pub fn set_response(&self, bytes: &[u8]) {
        self.state.lock().unwrap().response.extend_from_slice(bytes);
    }

    pub fn is_claimed(&self) -> bool {
        self.state.lock().unwrap().claimed
    }

    pub fn is_attached(&self) -> bool {
        self.state.lock().unwrap().attached
    }

    pub fn claim_count(&self) -> usize {
        self.state.lock().unwrap().claims
    }

    pub fn attach_count(&self) -> usize {
        self.state.lock().unwrap().attaches
    }

    pub fn release_count(&self) -> usize {
        self.state.lock().unwrap().releases
    }

    pub fn detach_count(&self) -> usize {
        self.state.lock().unwrap().detaches
    }

    /// Bus configuration of the current claim, if any.
    pub fn bus_config(&self) -> Option<BusConfig> {
        self.state.lock().unwrap().bus_config
    }

    /// Device configuration of the current attachment, if any.
    pub fn device_config(&self) -> Option<DeviceConfig> {
        self.state.lock().unwrap().device_config
    }

    /// Every transaction issued so far, in order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().transactions.clone()
    }

    pub fn transaction_count(&self) -> usize {
        self.state.lock().unwrap().transactions.len()
    }
}

impl SpiHost for MockSpi {
    type Error = MockError;
    type Device = MockSpiDevice;

    fn claim(&mut self, config: &BusConfig) -> Result<(), MockError> {
        let mut state = self.state.lock().unwrap();
        state.claims += 1;
        if state.fail_claim {
            state.fail_claim = false;
            return Err(MockError);
        }
        state.claimed = true;
        state.bus_config = Some(*config);
        Ok(())
    }

    fn attach(&mut self, config: &DeviceConfig) -> Result<MockSpiDevice, MockError> {
        let mut state = self.state.lock().unwrap();
        state.attaches += 1;
        if state.fail_attach {
            state.fail_attach = false;
            return Err(MockError);
        }
        state.attached = true;
        state.device_config = Some(*config);
        Ok(MockSpiDevice {
            state: self.state.clone(),
        })
    }

    fn release(&mut self) -> Result<(), MockError> {
        let mut state = self.state.lock().unwrap();
        state.releases += 1;
        if state.fail_release {
            state.fail_release = false;
            return Err(MockError);
        }
        state.claimed = false;
        state.bus_config = None;
        Ok(())
    }
}

/// Device handle produced by [`MockSpi::attach`].
pub struct MockSpiDevice {
    state: Arc<Mutex<SpiState>>,
}

fn drain_response(response: &mut Vec<u8>, buf: &mut [u8]) {
    let n = response.len().min(buf.len());
    buf[..n].copy_from_slice(&response[..n]);
    buf[n..].fill(0);
    response.drain(..n);
}

impl SpiDevice for MockSpiDevice {
    type Error = MockError;

    fn transfer(
        &mut self,
        read: &mut [u8],
        write: &[u8],
        keep_selected: bool,
    ) -> Result<(), MockError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_transfer {
            state.fail_transfer = false;
            return Err(MockError);
        }
        drain_response(&mut state.response, read);
        state.transactions.push(Transaction {
            direction: Direction::Exchange,
            tx: write.to_vec(),
            len: read.len(),
            keep_selected,
        });
        Ok(())
    }

    fn write(&mut self, data: &[u8], keep_selected: bool) -> Result<(), MockError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_transfer {
            state.fail_transfer = false;
            return Err(MockError);
        }
        state.transactions.push(Transaction {
            direction: Direction::Send,
            tx: data.to_vec(),
            len: data.len(),
            keep_selected,
        });
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8], keep_selected: bool) -> Result<(), MockError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_transfer {
            state.fail_transfer = false;
            return Err(MockError);
        }
        drain_response(&mut state.response, buf);
        state.transactions.push(Transaction {
            direction: Direction::Recv,
            tx: Vec::new(),
            len: buf.len(),
            keep_selected,
        });
        Ok(())
    }

    fn detach(&mut self) -> Result<(), MockError> {
        let mut state = self.state.lock().unwrap();
        state.detaches += 1;
        if state.fail_detach {
            state.fail_detach = false;
            return Err(MockError);
        }
        state.attached = false;
        state.device_config = None;
        Ok(())
    }
}

#[derive(Default)]
struct GpioState {
    outputs: Vec<u8>,
    inputs: Vec<u8>,
    resets: Vec<u8>,
    drives: Vec<(u8, bool)>,
    levels: BTreeMap<u8, bool>,
    fail_output: bool,
    fail_input: bool,
}

/// Mock GPIO bank.
///
/// Clones share state, like [`MockSpi`].
#[derive(Clone, Default)]
pub struct MockGpio {
    state: Arc<Mutex<GpioState>>,
}

impl MockGpio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot failure for the next `configure_output`.
    pub fn fail_next_output(&self) {
        self.state.lock().unwrap().fail_output = true;
    }

    /// Arm a one-shot failure for the next `configure_input`.
    pub fn fail_next_input(&self) {
        self.state.lock().unwrap().fail_input = true;
    }

    /// Set the level an input pin on `line` will read.
    pub fn set_level(&self, line: u8, high: bool) {
        self.state.lock().unwrap().levels.insert(line, high);
    }

    /// Current level of `line`, if anything ever drove or set it.
    pub fn level(&self, line: u8) -> Option<bool> {
        self.state.lock().unwrap().levels.get(&line).copied()
    }

    /// Lines configured as outputs, in order.
    pub fn output_lines(&self) -> Vec<u8> {
        self.state.lock().unwrap().outputs.clone()
    }

    /// Lines configured as inputs, in order.
    pub fn input_lines(&self) -> Vec<u8> {
        self.state.lock().unwrap().inputs.clone()
    }

    /// Lines returned to hardware default, in order.
    pub fn reset_lines(&self) -> Vec<u8> {
        self.state.lock().unwrap().resets.clone()
    }

    /// Every level written to any output, in order.
    pub fn drives(&self) -> Vec<(u8, bool)> {
        self.state.lock().unwrap().drives.clone()
    }
}

impl GpioBank for MockGpio {
    type Error = MockError;
    type Output = MockOutputPin;
    type Input = MockInputPin;

    fn configure_output(&mut self, line: u8) -> Result<MockOutputPin, MockError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_output {
            state.fail_output = false;
            return Err(MockError);
        }
        state.outputs.push(line);
        Ok(MockOutputPin {
            line,
            state: self.state.clone(),
        })
    }

    fn configure_input(&mut self, line: u8) -> Result<MockInputPin, MockError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_input {
            state.fail_input = false;
            return Err(MockError);
        }
        state.inputs.push(line);
        Ok(MockInputPin {
            line,
            state: self.state.clone(),
        })
    }

    fn reset_line(&mut self, line: u8) {
        self.state.lock().unwrap().resets.push(line);
    }
}

/// Output pin handle produced by [`MockGpio::configure_output`].
pub struct MockOutputPin {
    line: u8,
    state: Arc<Mutex<GpioState>>,
}

impl OutputPin for MockOutputPin {
    fn set_high(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.levels.insert(self.line, true);
        state.drives.push((self.line, true));
    }

    fn set_low(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.levels.insert(self.line, false);
        state.drives.push((self.line, false));
    }

    fn is_set_high(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .levels
            .get(&self.line)
            .copied()
            .unwrap_or(false)
    }
}

/// Input pin handle produced by [`MockGpio::configure_input`].
pub struct MockInputPin {
    line: u8,
    state: Arc<Mutex<GpioState>>,
}

impl InputPin for MockInputPin {
    fn is_high(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .levels
            .get(&self.line)
            .copied()
            .unwrap_or(false)
    }
}

#[derive(Default)]
struct ClockState {
    now_us: u64,
    waits: Vec<u32>,
}

/// Mock timebase with a manually advanced counter.
///
/// `delay_ms` records the requested duration and advances the counter by
/// it, so elapsed time is observable without real waiting.
#[derive(Clone, Default)]
pub struct MockClock {
    state: Arc<Mutex<ClockState>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter without recording a wait.
    pub fn advance_us(&self, us: u64) {
        self.state.lock().unwrap().now_us += us;
    }

    /// Every `delay_ms` duration requested so far, in order.
    pub fn waits(&self) -> Vec<u32> {
        self.state.lock().unwrap().waits.clone()
    }
}

impl Timebase for MockClock {
    fn now_us(&self) -> u64 {
        self.state.lock().unwrap().now_us
    }

    fn delay_ms(&mut self, ms: u32) {
        let mut state = self.state.lock().unwrap();
        state.waits.push(ms);
        state.now_us += u64::from(ms) * 1_000;
    }
}
