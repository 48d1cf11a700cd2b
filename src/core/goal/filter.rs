//=========================================================================
// Detection Filters
//=========================================================================
//
// Decorators over `BeamDetector` that add temporal behaviour without
// changing the goal's single-sample contract.
//
//   Debounced   : N consecutive breaks required before reporting
//   EdgeTrigger : report only the intact → broken transition
//
// Stack as `EdgeTrigger<Debounced<Goal<..>>>` for "one event per
// confirmed break".
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::BeamDetector;

//=== Debounced ===========================================================

/// Requires `required` consecutive detections before reporting a break.
///
/// Any intact sample resets the streak. With `required == 1` this behaves
/// exactly like the wrapped detector.
#[derive(Debug)]
pub struct Debounced<D> {
    inner: D,
    required: u32,
    streak: u32,
}

impl<D: BeamDetector> Debounced<D> {
    /// Wraps `inner`.
    ///
    /// # Panics
    ///
    /// Panics if `required == 0`.
    pub fn new(inner: D, required: u32) -> Self {
        assert!(required > 0, "Debounce sample count must be positive");
        Self {
            inner,
            required,
            streak: 0,
        }
    }

    /// Number of consecutive breaks needed.
    pub fn required(&self) -> u32 {
        self.required
    }

    /// Forgets the current streak.
    pub fn reset(&mut self) {
        self.streak = 0;
    }
}

impl<D> Debounced<D> {
    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: BeamDetector> BeamDetector for Debounced<D> {
    fn read(&mut self) -> bool {
        if self.inner.read() {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.streak = 0;
        }
        self.streak >= self.required
    }
}

//=== EdgeTrigger =========================================================

/// Reports a break only on the poll where the wrapped detector goes from
/// intact to broken.
///
/// A sustained break counts once; two breaks separated by at least one
/// intact poll count twice.
#[derive(Debug)]
pub struct EdgeTrigger<D> {
    inner: D,
    was_broken: bool,
}

impl<D: BeamDetector> EdgeTrigger<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            was_broken: false,
        }
    }

    /// Forgets the previous state; the next break reports again.
    pub fn reset(&mut self) {
        self.was_broken = false;
    }
}

impl<D> EdgeTrigger<D> {
    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: BeamDetector> BeamDetector for EdgeTrigger<D> {
    fn read(&mut self) -> bool {
        let broken = self.inner.read();
        let rising = broken && !self.was_broken;
        self.was_broken = broken;
        rising
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    //--- Test Helpers -----------------------------------------------------

    /// Replays a fixed script, then reports intact forever.
    struct Script(VecDeque<bool>);

    impl Script {
        fn new(samples: &[bool]) -> Self {
            Self(samples.iter().copied().collect())
        }
    }

    impl BeamDetector for Script {
        fn read(&mut self) -> bool {
            self.0.pop_front().unwrap_or(false)
        }
    }

    fn run<D: BeamDetector>(detector: &mut D, polls: usize) -> Vec<bool> {
        (0..polls).map(|_| detector.read()).collect()
    }

    //=====================================================================
    // Debounced Tests
    //=====================================================================

    #[test]
    fn debounce_of_one_passes_through() {
        let pattern = [true, false, true, true, false];
        let mut filter = Debounced::new(Script::new(&pattern), 1);
        assert_eq!(run(&mut filter, 5), pattern.to_vec());
    }

    #[test]
    fn debounce_requires_consecutive_breaks() {
        let mut filter = Debounced::new(
            Script::new(&[true, true, false, true, true, true, true]),
            3,
        );
        assert_eq!(
            run(&mut filter, 7),
            vec![false, false, false, false, false, true, true]
        );
    }

    #[test]
    fn debounce_rejects_single_spike() {
        let mut filter = Debounced::new(Script::new(&[false, true, false, false]), 2);
        assert!(run(&mut filter, 4).iter().all(|hit| !hit));
    }

    #[test]
    fn debounce_reset_clears_streak() {
        let mut filter = Debounced::new(Script::new(&[true, true, true]), 2);
        assert!(!filter.read());
        filter.reset();
        assert!(!filter.read());
        assert!(filter.read());
    }

    #[test]
    #[should_panic(expected = "Debounce sample count must be positive")]
    fn debounce_panics_on_zero() {
        Debounced::new(Script::new(&[]), 0);
    }

    //=====================================================================
    // EdgeTrigger Tests
    //=====================================================================

    #[test]
    fn edge_trigger_counts_sustained_break_once() {
        let mut filter = EdgeTrigger::new(Script::new(&[true, true, true, true]));
        assert_eq!(run(&mut filter, 4), vec![true, false, false, false]);
    }

    #[test]
    fn edge_trigger_separates_successive_breaks() {
        let mut filter = EdgeTrigger::new(Script::new(&[true, false, true, true, false, true]));
        assert_eq!(
            run(&mut filter, 6),
            vec![true, false, true, false, false, true]
        );
    }

    #[test]
    fn edge_trigger_reset_rearms() {
        let mut filter = EdgeTrigger::new(Script::new(&[true, true]));
        assert!(filter.read());
        filter.reset();
        assert!(filter.read());
    }

    #[test]
    fn stacked_filters_report_one_event_per_confirmed_break() {
        let samples = [true, false, true, true, true, true, false, true, true];
        let mut filter = EdgeTrigger::new(Debounced::new(Script::new(&samples), 2));
        let hits = run(&mut filter, samples.len());
        assert_eq!(hits.iter().filter(|hit| **hit).count(), 2);
        assert_eq!(filter.inner().required(), 2);
    }
}
