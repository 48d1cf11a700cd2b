//=========================================================================
// Goal Rig
//
// Polling harness that turns a set of goals into a stream of detections.
//
// Architecture:
// ```text
//     RigBuilder  ──build()──>  Rig  ──poll()──>  Vec<GoalEvent>
//         │                      │
//         ├─ with_tps()          └─ spawn() ──>  RigHandle
//         ├─ with_debounce()                       ├─ commands ──► poll thread
//         ├─ with_trigger()                        └─ events  ◄── poll thread
//         └─ add_goal()
//
//  Poll thread (fixed TPS):
//    1. CommandCollector drains RigCommands (bounded)
//    2. Rig::poll() samples every activated goal
//    3. GoalEvents try_send'ed on the bounded event channel
//    4. Sleep the remainder of the tick
// ```
//
// Each goal is wrapped as `EdgeTrigger<Debounced<Goal>>`. With the default
// configuration (debounce 1, `TriggerMode::Level`) a poll reports exactly
// what `Goal::read()` reports.
//
// The rig owns its goals exclusively; once spawned, only the poll thread
// touches them. Shutdown hands the rig back.
//
//=========================================================================

//=== Module Declarations =================================================

mod command_collector;
mod handle;
mod interface;
pub mod scoreboard;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::goal::{BeamDetector, Debounced, EdgeTrigger, Goal};
use crate::platform::{AnalogInput, DigitalOutput};
use command_collector::{CommandCollector, TickControl};

//=== Public API ==========================================================

pub use handle::RigHandle;
pub use interface::{GoalEvent, GoalId, RigCommand, RigError};
pub use scoreboard::{PlayerId, Scoreboard};

//=== TriggerMode =========================================================

/// How filtered reads become events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerMode {
    /// An event on every poll where the goal reads broken.
    #[default]
    Level,

    /// One event per break, on the intact → broken transition.
    Edge,
}

type Slot<O, I> = EdgeTrigger<Debounced<Goal<O, I>>>;

//=== RigBuilder ==========================================================

/// Builder for configuring and constructing a [`Rig`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (polls per second on the background thread)
/// - **Channel capacity**: 128 commands / events
/// - **Debounce**: 1 sample (memoryless)
/// - **Trigger**: [`TriggerMode::Level`]
///
/// # Examples
///
/// ```
/// use beam_goal::core::Goal;
/// use beam_goal::platform::PinId;
/// use beam_goal::platform::simulated::SimulatedBoard;
/// use beam_goal::{GoalId, RigBuilder, TriggerMode};
///
/// let board = SimulatedBoard::new();
/// let mut rig = RigBuilder::new()
///     .with_debounce(2)
///     .with_trigger(TriggerMode::Edge)
///     .add_goal(Goal::new(board.clone(), board.clone(), PinId(9), PinId(0), 500))
///     .build();
///
/// rig.activate_all();
/// board.set_analog(PinId(0), 100);
///
/// assert!(rig.poll().is_empty());
/// assert_eq!(rig.poll()[0].goal, GoalId(0));
/// assert!(rig.poll().is_empty());
/// ```
pub struct RigBuilder<O, I> {
    tps: f64,
    channel_capacity: usize,
    debounce: u32,
    trigger: TriggerMode,
    goals: Vec<Goal<O, I>>,
}

impl<O: DigitalOutput, I: AnalogInput> RigBuilder<O, I> {
    /// Creates a new builder with default settings and no goals.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            debounce: 1,
            trigger: TriggerMode::Level,
            goals: Vec::new(),
        }
    }

    /// Sets the poll rate of the background thread.
    ///
    /// Has no effect on [`Rig::poll`] called directly.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`, or if it is so small that one tick would not
    /// fit in a [`Duration`].
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        assert!(
            Duration::try_from_secs_f64(1.0 / tps).is_ok(),
            "TPS too small to schedule, got {}",
            tps
        );
        self.tps = tps;
        self
    }

    /// Sets the capacity of both the command and the event channel.
    ///
    /// Events that do not fit are dropped with a warning.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets how many consecutive broken samples confirm a break.
    ///
    /// Default: 1
    ///
    /// # Panics
    ///
    /// Panics if `samples == 0`.
    pub fn with_debounce(mut self, samples: u32) -> Self {
        assert!(samples > 0, "Debounce sample count must be positive");
        self.debounce = samples;
        self
    }

    /// Default: [`TriggerMode::Level`]
    pub fn with_trigger(mut self, trigger: TriggerMode) -> Self {
        self.trigger = trigger;
        self
    }

    /// Adds a goal; it receives the next [`GoalId`].
    pub fn add_goal(mut self, goal: Goal<O, I>) -> Self {
        self.goals.push(goal);
        self
    }

    /// Builds the rig.
    pub fn build(self) -> Rig<O, I> {
        info!(
            target: "rig",
            "Building rig ({} goals, TPS: {}, debounce: {}, trigger: {:?})",
            self.goals.len(), self.tps, self.debounce, self.trigger
        );

        let debounce = self.debounce;
        Rig {
            slots: self
                .goals
                .into_iter()
                .map(|goal| EdgeTrigger::new(Debounced::new(goal, debounce)))
                .collect(),
            trigger: self.trigger,
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            tick: 0,
        }
    }
}

impl<O: DigitalOutput, I: AnalogInput> Default for RigBuilder<O, I> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Rig =================================================================

/// A set of goals polled together.
///
/// Use [`poll`](Self::poll) from your own loop, or [`spawn`](Self::spawn)
/// to poll on a background thread at the configured TPS.
pub struct Rig<O, I> {
    slots: Vec<Slot<O, I>>,
    trigger: TriggerMode,
    tps: f64,
    channel_capacity: usize,
    tick: u64,
}

impl<O: DigitalOutput, I: AnalogInput> Rig<O, I> {
    //--- Goal Access ------------------------------------------------------

    pub fn goal_count(&self) -> usize {
        self.slots.len()
    }

    pub fn goal(&self, id: GoalId) -> Option<&Goal<O, I>> {
        self.slots.get(id.0).map(|slot| slot.inner().inner())
    }

    /// Direct access to a goal.
    ///
    /// Activation changes made here bypass the filter reset done by
    /// [`activate`](Self::activate) / [`deactivate`](Self::deactivate).
    pub fn goal_mut(&mut self, id: GoalId) -> Option<&mut Goal<O, I>> {
        self.slots.get_mut(id.0).map(|slot| slot.inner_mut().inner_mut())
    }

    /// Iterates goals in id order.
    pub fn goals(&self) -> impl Iterator<Item = (GoalId, &Goal<O, I>)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (GoalId(index), slot.inner().inner()))
    }

    /// Polls completed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    //--- Control ----------------------------------------------------------

    /// Activates a goal and rearms its filters.
    pub fn activate(&mut self, id: GoalId) -> Result<(), RigError> {
        let slot = self.slots.get_mut(id.0).ok_or(RigError::UnknownGoal(id))?;
        reset_filters(slot);
        slot.inner_mut().inner_mut().activate();
        Ok(())
    }

    /// Deactivates a goal and clears its filter state.
    pub fn deactivate(&mut self, id: GoalId) -> Result<(), RigError> {
        let slot = self.slots.get_mut(id.0).ok_or(RigError::UnknownGoal(id))?;
        slot.inner_mut().inner_mut().deactivate();
        reset_filters(slot);
        Ok(())
    }

    pub fn set_light_threshold(&mut self, id: GoalId, value: i32) -> Result<(), RigError> {
        let goal = self.goal_mut(id).ok_or(RigError::UnknownGoal(id))?;
        goal.set_light_threshold(value);
        Ok(())
    }

    pub fn activate_all(&mut self) {
        for slot in &mut self.slots {
            reset_filters(slot);
            slot.inner_mut().inner_mut().activate();
        }
    }

    pub fn deactivate_all(&mut self) {
        for slot in &mut self.slots {
            slot.inner_mut().inner_mut().deactivate();
            reset_filters(slot);
        }
    }

    //--- Polling ----------------------------------------------------------

    /// Runs one poll over every activated goal.
    ///
    /// Deactivated goals are not sampled. Events are returned in goal
    /// order and stamped with the new tick number.
    pub fn poll(&mut self) -> Vec<GoalEvent> {
        self.tick += 1;

        let mut events = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if !slot.inner().inner().is_activated() {
                continue;
            }

            let hit = match self.trigger {
                TriggerMode::Level => slot.inner_mut().read(),
                TriggerMode::Edge => slot.read(),
            };

            if hit {
                events.push(GoalEvent {
                    goal: GoalId(index),
                    label: slot.inner().inner().label().map(str::to_owned),
                    tick: self.tick,
                });
            }
        }

        if !events.is_empty() {
            debug!(target: "rig", "Tick {}: {} detection(s)", self.tick, events.len());
        }

        events
    }

    //--- Command Handling -------------------------------------------------

    /// Applies one command from the poll thread's queue.
    pub(crate) fn apply(&mut self, command: RigCommand) -> TickControl {
        let result = match command {
            RigCommand::Activate(id) => self.activate(id),
            RigCommand::Deactivate(id) => self.deactivate(id),
            RigCommand::SetLightThreshold(id, value) => self.set_light_threshold(id, value),
            RigCommand::Shutdown => return TickControl::Exit,
        };

        if let Err(e) = result {
            warn!(target: "rig", "Ignoring {:?}: {}", command, e);
        }

        TickControl::Continue
    }
}

//--- Filter Helpers ------------------------------------------------------

fn reset_filters<O: DigitalOutput, I: AnalogInput>(slot: &mut Slot<O, I>) {
    slot.reset();
    slot.inner_mut().reset();
}

//=== Background Polling ==================================================

impl<O, I> Rig<O, I>
where
    O: DigitalOutput + Send + 'static,
    I: AnalogInput + Send + 'static,
{
    /// Moves the rig onto a background thread polling at the configured TPS.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates bounded command and event channels
    /// 2. Spawns the poll thread
    /// 3. Thread runs until [`RigHandle::shutdown`], or until either side
    ///    of a channel is dropped
    /// 4. The thread returns the rig, recovered by `shutdown`
    pub fn spawn(self) -> RigHandle<O, I> {
        let (command_tx, command_rx) = bounded(self.channel_capacity);
        let (event_tx, event_rx) = bounded(self.channel_capacity);

        info!(
            target: "rig",
            "Spawning poll thread (goals: {}, TPS: {}, channel: {})",
            self.slots.len(), self.tps, self.channel_capacity
        );

        let thread = thread::spawn(move || self.run(command_rx, event_tx));

        RigHandle::new(command_tx, event_rx, thread)
    }

    fn run(mut self, commands: Receiver<RigCommand>, events: Sender<GoalEvent>) -> Self {
        let frame_duration = Duration::from_secs_f64(1.0 / self.tps);
        let mut collector = CommandCollector::new(commands);

        loop {
            let frame_start = Instant::now();

            //--- Step 1: Apply pending commands ----------------------------
            if let TickControl::Exit = collector.collect_frame(&mut self) {
                break;
            }

            //--- Step 2: Poll goals and publish detections ----------------
            if let TickControl::Exit = self.publish(&events) {
                break;
            }

            //--- Step 3: Maintain fixed pacing -----------------------------
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }

        info!(target: "rig", "Poll thread exiting after {} ticks", self.tick);
        self
    }

    fn publish(&mut self, events: &Sender<GoalEvent>) -> TickControl {
        for event in self.poll() {
            match events.try_send(event) {
                Ok(()) => {}
                Err(TrySendError::Full(event)) => {
                    warn!(target: "rig", "Event channel full, dropping {:?}", event);
                }
                Err(TrySendError::Disconnected(_)) => return TickControl::Exit,
            }
        }
        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
