//=========================================================================
// Goal
//=========================================================================
//
// One emitter/detector pair abstracted into an activation switch plus a
// calibrated beam-break detector.
//
// Architecture:
//   activate()/deactivate() → DigitalOutput::write_pin(emitter)
//   read() → AnalogInput::read_analog(sensor) → sample <= threshold
//
// Detection is memoryless: each `read()` is one independent
// sample-and-compare. Debounce and edge detection live in `filter` as
// decorators over [`BeamDetector`].
//
//=========================================================================

//=== Module Declarations =================================================

pub mod calibration;
pub mod filter;

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::platform::{AnalogInput, DigitalOutput, Level, PinId, PinMode};

//=== Public API ==========================================================

pub use calibration::{calibrate_threshold, Calibration, CalibrationError};
pub use filter::{Debounced, EdgeTrigger};

//=== BeamDetector Trait ==================================================

/// A polled source of beam-break detections.
///
/// Implemented by [`Goal`] and by the decorators in [`filter`], so they can
/// be stacked (`EdgeTrigger<Debounced<Goal<..>>>`).
pub trait BeamDetector {
    /// Returns `true` if a beam-break is detected on this poll.
    fn read(&mut self) -> bool;
}

//=== Goal ================================================================

/// A single physical target: an emitter pin and a light sensor pin.
///
/// `activated` always mirrors the level last driven onto the emitter; it is
/// only changed by [`activate`](Self::activate) and
/// [`deactivate`](Self::deactivate).
///
/// # Examples
///
/// ```
/// use beam_goal::core::goal::Goal;
/// use beam_goal::platform::PinId;
/// use beam_goal::platform::simulated::SimulatedBoard;
///
/// let board = SimulatedBoard::new();
/// let mut goal = Goal::new(board.clone(), board.clone(), PinId(9), PinId(0), 500);
///
/// goal.activate();
/// board.set_analog(PinId(0), 300);
/// assert!(goal.read());
///
/// board.set_analog(PinId(0), 700);
/// assert!(!goal.read());
/// ```
#[derive(Debug)]
pub struct Goal<O, I> {
    output: O,
    input: I,
    emitter_pin: PinId,
    sensor_pin: PinId,
    light_threshold: i32,
    activated: bool,
    label: Option<String>,
}

impl<O: DigitalOutput, I: AnalogInput> Goal<O, I> {
    //--- Construction -----------------------------------------------------

    /// Binds the goal to its pins and configures the emitter for output.
    ///
    /// The emitter is not driven and the sensor pin is not touched; the goal
    /// starts deactivated.
    pub fn new(
        mut output: O,
        input: I,
        emitter_pin: PinId,
        sensor_pin: PinId,
        light_threshold: i32,
    ) -> Self {
        output.set_pin_mode(emitter_pin, PinMode::Output);
        debug!(
            target: "goal",
            "Goal bound (emitter: {}, sensor: {}, threshold: {})",
            emitter_pin, sensor_pin, light_threshold
        );

        Self {
            output,
            input,
            emitter_pin,
            sensor_pin,
            light_threshold,
            activated: false,
            label: None,
        }
    }

    /// Attaches a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    //--- Activation -------------------------------------------------------

    /// Drives the emitter on.
    ///
    /// Repeated calls re-issue the write but leave the state unchanged.
    pub fn activate(&mut self) {
        self.output.write_pin(self.emitter_pin, Level::High);
        self.activated = true;
        debug!(target: "goal", "{} activated", self.display_name());
    }

    /// Drives the emitter off.
    pub fn deactivate(&mut self) {
        self.output.write_pin(self.emitter_pin, Level::Low);
        self.activated = false;
        debug!(target: "goal", "{} deactivated", self.display_name());
    }

    /// Returns whether the emitter is currently driven on.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    //--- Threshold --------------------------------------------------------

    /// Replaces the light threshold.
    ///
    /// Any value is accepted. Values outside the sensor's range make the
    /// goal always or never fire, but are not rejected.
    pub fn set_light_threshold(&mut self, light_threshold: i32) {
        debug!(
            target: "goal",
            "{} threshold {} -> {}",
            self.display_name(), self.light_threshold, light_threshold
        );
        self.light_threshold = light_threshold;
    }

    /// Returns the current light threshold.
    pub fn light_threshold(&self) -> i32 {
        self.light_threshold
    }

    //--- Sampling ---------------------------------------------------------

    /// Takes one raw sensor sample without comparing it.
    pub fn sample(&mut self) -> i32 {
        self.input.read_analog(self.sensor_pin)
    }

    /// Samples the sensor once; `true` iff the sample is at or below the
    /// threshold.
    ///
    /// Samples regardless of activation state.
    pub fn read(&mut self) -> bool {
        let value = self.sample();
        let broken = value <= self.light_threshold;
        trace!(
            target: "goal",
            "{} sample {} (threshold {}) -> {}",
            self.display_name(), value, self.light_threshold, broken
        );
        broken
    }
}

impl<O, I> Goal<O, I> {
    //--- Accessors --------------------------------------------------------

    pub fn emitter_pin(&self) -> PinId {
        self.emitter_pin
    }

    pub fn sensor_pin(&self) -> PinId {
        self.sensor_pin
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    /// Releases the hardware capabilities.
    pub fn into_parts(self) -> (O, I) {
        (self.output, self.input)
    }

    fn display_name(&self) -> String {
        match &self.label {
            Some(label) => format!("Goal '{}'", label),
            None => format!("Goal@{}", self.sensor_pin),
        }
    }
}

impl<O: DigitalOutput, I: AnalogInput> BeamDetector for Goal<O, I> {
    fn read(&mut self) -> bool {
        Goal::read(self)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
