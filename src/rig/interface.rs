//=========================================================================
// Rig Interface
//=========================================================================
//
// Types that cross the boundary between the caller and the poll thread:
// commands in, detections out, and the errors either side can observe.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== GoalId ==============================================================

/// Index of a goal inside a rig, assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GoalId(pub usize);

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "goal #{}", self.0)
    }
}

//=== GoalEvent ===========================================================

/// A beam-break detected on one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalEvent {
    pub goal: GoalId,

    /// Label of the goal at the time of detection.
    pub label: Option<String>,

    /// Poll number the detection happened on (first poll is 1).
    pub tick: u64,
}

//=== RigCommand ==========================================================

/// Commands sent to a running poll thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigCommand {
    Activate(GoalId),
    Deactivate(GoalId),
    SetLightThreshold(GoalId, i32),

    /// Stops the poll thread after the current tick.
    Shutdown,
}

//=== RigError ============================================================

/// Errors reported by rig operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigError {
    /// No goal with this id was added to the rig.
    UnknownGoal(GoalId),

    /// The poll thread is no longer receiving commands.
    Disconnected,

    /// The poll thread panicked; its goals are lost.
    ThreadPanicked,
}

impl fmt::Display for RigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGoal(id) => write!(f, "Unknown {}", id),
            Self::Disconnected => write!(f, "Poll thread disconnected"),
            Self::ThreadPanicked => write!(f, "Poll thread panicked"),
        }
    }
}

impl std::error::Error for RigError {}

//=========================================================================
// Unit Tests
//=========================================================================
