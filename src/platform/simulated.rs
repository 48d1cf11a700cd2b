//=========================================================================
// Simulated Board
//=========================================================================
//
// In-memory board backend implementing both capability traits.
//
// Architecture:
//   SimulatedBoard (cloneable handle) → Arc<Mutex<BoardState>>
//     ├─ modes / levels: what the core drove onto output pins
//     ├─ queued:  scripted samples, consumed first
//     ├─ beams:   emitter → sensor coupling (lit / dark values)
//     └─ held:    fallback value per analog pin
//
// Sample resolution order for `read_analog(pin)`:
//   queued sample → coupled beam → held value → 0
//
// Every clone shares the same state, so a test can hand one clone to a
// `Goal` as its output, another as its input, and keep a third to script
// the sensor and inspect the emitter.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::trace;

//=== Internal Dependencies ===============================================

use super::{AnalogInput, DigitalOutput, Level, PinId, PinMode};

//=== Beam ================================================================

/// Optical coupling between an emitter pin and a sensor pin.
///
/// While the emitter is driven high and the beam is not blocked the sensor
/// reads `lit`; otherwise it reads `dark`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beam {
    pub emitter: PinId,
    pub lit: i32,
    pub dark: i32,
}

//=== BoardState ==========================================================

#[derive(Debug, Default)]
struct BoardState {
    modes: HashMap<PinId, PinMode>,
    levels: HashMap<PinId, Level>,
    held: HashMap<PinId, i32>,
    queued: HashMap<PinId, VecDeque<i32>>,
    beams: HashMap<PinId, Beam>,
    blocked: HashSet<PinId>,
    writes: usize,
    reads: usize,
}

impl BoardState {
    fn sample(&mut self, pin: PinId) -> i32 {
        if let Some(value) = self.queued.get_mut(&pin).and_then(VecDeque::pop_front) {
            return value;
        }

        if let Some(beam) = self.beams.get(&pin) {
            let emitting = self
                .levels
                .get(&beam.emitter)
                .is_some_and(|level| level.is_high());
            return if emitting && !self.blocked.contains(&pin) {
                beam.lit
            } else {
                beam.dark
            };
        }

        self.held.get(&pin).copied().unwrap_or(0)
    }
}

//=== SimulatedBoard ======================================================

/// Shared-state fake hardware for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBoard {
    state: Arc<Mutex<BoardState>>,
}

impl SimulatedBoard {
    /// Creates a board with no configured pins.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    //--- Scripting --------------------------------------------------------

    /// Sets the value `pin` reads when nothing else applies.
    pub fn set_analog(&self, pin: PinId, value: i32) {
        self.lock().held.insert(pin, value);
    }

    /// Queues samples returned by the next reads of `pin`, in order.
    pub fn queue_samples<I>(&self, pin: PinId, samples: I)
    where
        I: IntoIterator<Item = i32>,
    {
        self.lock().queued.entry(pin).or_default().extend(samples);
    }

    /// Couples `sensor` to an emitter so its reading follows the emitter level.
    pub fn couple_beam(&self, sensor: PinId, beam: Beam) {
        self.lock().beams.insert(sensor, beam);
    }

    /// Blocks or restores the beam falling on `sensor`.
    pub fn set_blocked(&self, sensor: PinId, blocked: bool) {
        let mut state = self.lock();
        if blocked {
            state.blocked.insert(sensor);
        } else {
            state.blocked.remove(&sensor);
        }
    }

    //--- Inspection -------------------------------------------------------

    /// Direction last configured for `pin`, if any.
    pub fn pin_mode(&self, pin: PinId) -> Option<PinMode> {
        self.lock().modes.get(&pin).copied()
    }

    /// Level last driven onto `pin`, if any.
    pub fn level(&self, pin: PinId) -> Option<Level> {
        self.lock().levels.get(&pin).copied()
    }

    /// Total `write_pin` calls across all pins.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Total `read_analog` calls across all pins.
    pub fn read_count(&self) -> usize {
        self.lock().reads
    }
}

//--- Capability Implementations ------------------------------------------

impl DigitalOutput for SimulatedBoard {
    fn set_pin_mode(&mut self, pin: PinId, mode: PinMode) {
        trace!(target: "platform::sim", "{} mode -> {:?}", pin, mode);
        self.lock().modes.insert(pin, mode);
    }

    fn write_pin(&mut self, pin: PinId, level: Level) {
        trace!(target: "platform::sim", "{} level -> {:?}", pin, level);
        let mut state = self.lock();
        state.levels.insert(pin, level);
        state.writes += 1;
    }
}

impl AnalogInput for SimulatedBoard {
    fn read_analog(&mut self, pin: PinId) -> i32 {
        let mut state = self.lock();
        state.reads += 1;
        state.sample(pin)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EMITTER: PinId = PinId(9);
    const SENSOR: PinId = PinId(0);

    #[test]
    fn unknown_pin_reads_zero() {
        let mut board = SimulatedBoard::new();
        assert_eq!(board.read_analog(SENSOR), 0);
        assert_eq!(board.read_count(), 1);
    }

    #[test]
    fn queued_samples_take_priority_over_held_value() {
        let mut board = SimulatedBoard::new();
        board.set_analog(SENSOR, 800);
        board.queue_samples(SENSOR, [100, 200]);

        assert_eq!(board.read_analog(SENSOR), 100);
        assert_eq!(board.read_analog(SENSOR), 200);
        assert_eq!(board.read_analog(SENSOR), 800);
    }

    #[test]
    fn clones_share_state() {
        let board = SimulatedBoard::new();
        let mut output = board.clone();

        output.set_pin_mode(EMITTER, PinMode::Output);
        output.write_pin(EMITTER, Level::High);

        assert_eq!(board.pin_mode(EMITTER), Some(PinMode::Output));
        assert_eq!(board.level(EMITTER), Some(Level::High));
        assert_eq!(board.write_count(), 1);
    }

    #[test]
    fn coupled_beam_follows_emitter_and_blocking() {
        let mut board = SimulatedBoard::new();
        board.couple_beam(SENSOR, Beam { emitter: EMITTER, lit: 900, dark: 150 });

        // Emitter never driven
        assert_eq!(board.read_analog(SENSOR), 150);

        board.write_pin(EMITTER, Level::High);
        assert_eq!(board.read_analog(SENSOR), 900);

        board.set_blocked(SENSOR, true);
        assert_eq!(board.read_analog(SENSOR), 150);

        board.set_blocked(SENSOR, false);
        assert_eq!(board.read_analog(SENSOR), 900);

        board.write_pin(EMITTER, Level::Low);
        assert_eq!(board.read_analog(SENSOR), 150);
    }
}
