//=========================================================================
// Rig Handle
//=========================================================================
//
// Caller-side view of a spawned rig: command sender, event receiver and
// the poll thread's join handle.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use super::{GoalEvent, GoalId, Rig, RigCommand, RigError};

//=== RigHandle ===========================================================

/// Controls a rig running on its poll thread.
///
/// Dropping the handle without calling [`shutdown`](Self::shutdown)
/// disconnects the command channel; the thread notices on its next tick
/// and exits, and its goals are dropped with it.
pub struct RigHandle<O, I> {
    commands: Sender<RigCommand>,
    events: Receiver<GoalEvent>,
    thread: JoinHandle<Rig<O, I>>,
}

impl<O, I> RigHandle<O, I> {
    pub(super) fn new(
        commands: Sender<RigCommand>,
        events: Receiver<GoalEvent>,
        thread: JoinHandle<Rig<O, I>>,
    ) -> Self {
        Self {
            commands,
            events,
            thread,
        }
    }

    //--- Events -----------------------------------------------------------

    /// Detections published by the poll thread, in tick order.
    pub fn events(&self) -> &Receiver<GoalEvent> {
        &self.events
    }

    //--- Commands ---------------------------------------------------------

    /// Queues a command for the next tick.
    ///
    /// # Errors
    ///
    /// [`RigError::Disconnected`] if the poll thread has exited.
    pub fn send(&self, command: RigCommand) -> Result<(), RigError> {
        self.commands
            .send(command)
            .map_err(|_| RigError::Disconnected)
    }

    pub fn activate(&self, goal: GoalId) -> Result<(), RigError> {
        self.send(RigCommand::Activate(goal))
    }

    pub fn deactivate(&self, goal: GoalId) -> Result<(), RigError> {
        self.send(RigCommand::Deactivate(goal))
    }

    pub fn set_light_threshold(&self, goal: GoalId, value: i32) -> Result<(), RigError> {
        self.send(RigCommand::SetLightThreshold(goal, value))
    }

    /// Returns `false` once the poll thread has exited.
    pub fn is_running(&self) -> bool {
        !self.thread.is_finished()
    }

    //--- Shutdown ---------------------------------------------------------

    /// Stops the poll thread and returns the rig.
    ///
    /// Events still queued on [`events`](Self::events) are discarded.
    ///
    /// # Errors
    ///
    /// [`RigError::ThreadPanicked`] if the poll thread panicked.
    pub fn shutdown(self) -> Result<Rig<O, I>, RigError> {
        // The thread may already be gone (e.g. event receiver dropped)
        let _ = self.commands.send(RigCommand::Shutdown);

        match self.thread.join() {
            Ok(rig) => {
                info!(target: "rig", "Poll thread terminated cleanly");
                Ok(rig)
            }
            Err(e) => {
                error!(target: "rig", "Poll thread panicked: {:?}", e);
                Err(RigError::ThreadPanicked)
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
