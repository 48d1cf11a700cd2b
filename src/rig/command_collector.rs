//=========================================================================
// Command Collector
//=========================================================================
//
// Poll-thread side of the command channel: bounded draining of pending
// commands with shutdown detection.
//
// Architecture:
//   Receiver<RigCommand> → collect_frame() → Rig::apply() → TickControl
//
// Bounded draining keeps a command flood from starving the poll step.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::{Rig, RigCommand};
use crate::platform::{AnalogInput, DigitalOutput};

//=== TickControl =========================================================

/// Poll loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== CommandCollector ====================================================

pub(crate) struct CommandCollector {
    receiver: Receiver<RigCommand>,
}

impl CommandCollector {
    pub(crate) fn new(receiver: Receiver<RigCommand>) -> Self {
        Self { receiver }
    }

    /// Applies pending commands to `rig` (bounded per tick).
    pub(crate) fn collect_frame<O, I>(&mut self, rig: &mut Rig<O, I>) -> TickControl
    where
        O: DigitalOutput,
        I: AnalogInput,
    {
        const MAX_COMMANDS_PER_TICK: usize = 100;

        let mut drained = 0;

        while drained < MAX_COMMANDS_PER_TICK {
            match self.receiver.try_recv() {
                Ok(command) => {
                    if rig.apply(command) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_COMMANDS_PER_TICK {
            warn!(target: "rig", "Command backlog: applied {} commands this tick", drained);
        }

        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Goal;
    use crate::platform::simulated::SimulatedBoard;
    use crate::platform::PinId;
    use crate::rig::{GoalId, RigBuilder};
    use crossbeam_channel::unbounded;

    fn rig() -> Rig<SimulatedBoard, SimulatedBoard> {
        let board = SimulatedBoard::new();
        RigBuilder::new()
            .add_goal(Goal::new(board.clone(), board, PinId(9), PinId(0), 500))
            .build()
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<RigCommand>();
        let mut collector = CommandCollector::new(rx);
        let mut rig = rig();

        assert_eq!(collector.collect_frame(&mut rig), TickControl::Continue);
    }

    #[test]
    fn collect_applies_commands_in_order() {
        let (tx, rx) = unbounded();
        let mut collector = CommandCollector::new(rx);
        let mut rig = rig();

        tx.send(RigCommand::Activate(GoalId(0))).unwrap();
        tx.send(RigCommand::SetLightThreshold(GoalId(0), 42)).unwrap();

        assert_eq!(collector.collect_frame(&mut rig), TickControl::Continue);
        let goal = rig.goal(GoalId(0)).unwrap();
        assert!(goal.is_activated());
        assert_eq!(goal.light_threshold(), 42);
    }

    #[test]
    fn collect_ignores_unknown_goal() {
        let (tx, rx) = unbounded();
        let mut collector = CommandCollector::new(rx);
        let mut rig = rig();

        tx.send(RigCommand::Activate(GoalId(7))).unwrap();

        assert_eq!(collector.collect_frame(&mut rig), TickControl::Continue);
    }

    #[test]
    fn collect_returns_exit_on_shutdown() {
        let (tx, rx) = unbounded();
        let mut collector = CommandCollector::new(rx);
        let mut rig = rig();

        tx.send(RigCommand::Shutdown).unwrap();

        assert_eq!(collector.collect_frame(&mut rig), TickControl::Exit);
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<RigCommand>();
        let mut collector = CommandCollector::new(rx);
        let mut rig = rig();

        drop(tx);

        assert_eq!(collector.collect_frame(&mut rig), TickControl::Exit);
    }

    #[test]
    fn collect_is_bounded_per_tick() {
        let (tx, rx) = unbounded();
        let mut collector = CommandCollector::new(rx);
        let mut rig = rig();

        for value in 0..150 {
            tx.send(RigCommand::SetLightThreshold(GoalId(0), value)).unwrap();
        }

        collector.collect_frame(&mut rig);
        assert_eq!(rig.goal(GoalId(0)).unwrap().light_threshold(), 99);

        collector.collect_frame(&mut rig);
        assert_eq!(rig.goal(GoalId(0)).unwrap().light_threshold(), 149);
    }
}
