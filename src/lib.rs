//=========================================================================
// Beam Goal Library Root
//
// Sensing core for physical target games: laser/photodetector goals that
// report beam-breaks, and player records that accumulate score.
//
// Responsibilities:
// - `core`: the `Goal` and `Player` leaf components
// - `platform`: hardware capability traits injected into goals, plus a
//   simulated board for tests and demos
// - `rig`: polling harness and scoreboard a game loop composes them with
//
// Typical usage:
// ```no_run
// use beam_goal::prelude::*;
//
// let board = SimulatedBoard::new();
// let goal = Goal::new(board.clone(), board.clone(), PinId(9), PinId(0), 500);
// let handle = RigBuilder::new().add_goal(goal).build().spawn();
//
// handle.activate(GoalId(0)).unwrap();
// for event in handle.events().iter() {
//     println!("goal at tick {}", event.tick);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the sensing logic and scorekeeping record.
//
// `platform` defines the hardware contract. Board backends implement
// `DigitalOutput` and `AnalogInput`; `platform::simulated` is the
// in-memory backend.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `rig` is exposed through the re-exports below.
//
mod rig;

//--- Public Exports ------------------------------------------------------

pub use rig::{
    GoalEvent, GoalId, PlayerId, Rig, RigBuilder, RigCommand, RigError, RigHandle, Scoreboard,
    TriggerMode,
};
