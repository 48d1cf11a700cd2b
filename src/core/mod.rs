//=========================================================================
// Sensing Core
//
// The two leaf components a game loop consumes:
//
// - `goal`: emitter/detector pair with activation control, a polled
//   beam-break query, detection filters and threshold calibration
// - `player`: plain scorekeeping record with two reset granularities
// - `report`: text sinks for player snapshots
//
// Neither component depends on the other. Binding goals to players is
// done by the caller (see `crate::rig::Scoreboard`).
//
//=========================================================================

//=== Module Declarations =================================================

pub mod goal;
pub mod player;
pub mod report;

//=== Public API ==========================================================

pub use goal::{BeamDetector, Goal};
pub use player::Player;
pub use report::{LogSink, ReportSink, WriterSink};
