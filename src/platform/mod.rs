//=========================================================================
// Platform Capabilities
//
// Narrow hardware contract consumed by the goal sensing core.
//
// Architecture:
// ```text
//  Core (Goal):                      Platform (board backend):
//  ┌──────────────────────────┐     ┌──────────────────────────────┐
//  │  new()                   │     │                              │
//  │   └─ set_pin_mode(Output)├────►│  DigitalOutput               │
//  │  activate()/deactivate() │     │   ├─ set_pin_mode()          │
//  │   └─ write_pin(Hi/Lo)    ├────►│   └─ write_pin()             │
//  │                          │     │                              │
//  │  read()/sample()         │     │  AnalogInput                 │
//  │   └─ read_analog()       ├────►│   └─ read_analog() -> i32    │
//  └──────────────────────────┘     └──────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Injected at construction**: A `Goal` owns its output and input
//   capabilities, so tests swap in the simulated board without touching
//   real pins
// - **Infallible**: Pin numbers, wiring and value ranges are preconditions
//   established by whoever builds the board backend
// - **Raw values**: `read_analog` returns whatever the converter produced;
//   resolution and range belong to the backend
//
//=========================================================================

//=== Submodules ==========================================================

pub mod simulated;

//=== External Dependencies ===============================================

use std::fmt;

//=== PinId ===============================================================

/// Hardware address of a single pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId(pub u8);

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pin {}", self.0)
    }
}

impl From<u8> for PinId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

//=== PinMode =============================================================

/// Direction a pin is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinMode {
    Input,
    Output,
}

//=== Level ===============================================================

/// Logic level driven onto a digital output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Returns `true` for [`Level::High`].
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

//=== DigitalOutput =======================================================

/// Digital output sink (emitter side).
///
/// Implementations drive a physical pin immediately; both calls are
/// synchronous and never fail from the core's point of view.
pub trait DigitalOutput {
    /// Configures `pin` for the given direction.
    fn set_pin_mode(&mut self, pin: PinId, mode: PinMode);

    /// Drives `pin` to `level`.
    fn write_pin(&mut self, pin: PinId, level: Level);
}

//=== AnalogInput =========================================================

/// Analog input source (sensor side).
pub trait AnalogInput {
    /// Samples `pin` once and returns the raw converter value.
    fn read_analog(&mut self, pin: PinId) -> i32;
}

//--- Forwarding Implementations ------------------------------------------

impl<T: DigitalOutput + ?Sized> DigitalOutput for &mut T {
    fn set_pin_mode(&mut self, pin: PinId, mode: PinMode) {
        (**self).set_pin_mode(pin, mode);
    }

    fn write_pin(&mut self, pin: PinId, level: Level) {
        (**self).write_pin(pin, level);
    }
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn read_analog(&mut self, pin: PinId) -> i32 {
        (**self).read_analog(pin)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
