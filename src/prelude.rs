//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use beam_goal::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Sensing core
pub use crate::core::goal::{BeamDetector, Calibration, CalibrationError, Debounced, EdgeTrigger, Goal};
pub use crate::core::player::Player;
pub use crate::core::report::{LogSink, ReportSink, WriterSink};

// Hardware contract
pub use crate::platform::simulated::{Beam, SimulatedBoard};
pub use crate::platform::{AnalogInput, DigitalOutput, Level, PinId, PinMode};

// Polling harness
pub use crate::{GoalEvent, GoalId, PlayerId, Rig, RigBuilder, RigCommand, RigError, RigHandle, Scoreboard, TriggerMode};
