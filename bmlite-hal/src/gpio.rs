//! GPIO pin abstractions
//!
//! Line-level traits for the sensor's reset output and status input, plus
//! the [`GpioBank`] seam a platform implements to hand out configured pins
//! and return lines to their hardware default.

/// Digital output pin
///
/// Implementations handle the register manipulation for the specific
/// chip. Operations are infallible once the line is configured.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Factory for configured GPIO lines.
///
/// `configure_output` produces a push-pull output with no pull resistors
/// and interrupts masked; `configure_input` a floating input with the
/// same defaults. `reset_line` returns a line to its hardware default
/// (unconfigured) state and never fails; teardown is best-effort by
/// contract.
pub trait GpioBank {
    /// Error type for line configuration
    type Error: core::fmt::Debug;
    /// Configured output line
    type Output: OutputPin;
    /// Configured input line
    type Input: InputPin;

    /// Configure a line as a push-pull output.
    fn configure_output(&mut self, line: u8) -> Result<Self::Output, Self::Error>;

    /// Configure a line as a floating input.
    fn configure_input(&mut self, line: u8) -> Result<Self::Input, Self::Error>;

    /// Return a line to its hardware default state.
    fn reset_line(&mut self, line: u8);
}
