//=========================================================================
// Threshold Calibration
//=========================================================================
//
// Derives a light threshold from two sample sets: readings with the beam
// intact and readings with it broken. The threshold is the midpoint of the
// two means, which keeps the `sample <= threshold` polarity: intact must
// read strictly higher than broken.
//
// Flow (Goal::calibrate):
//   emitter on  → N samples (intact)
//   emitter off → N samples (broken)
//   restore previous activation → apply midpoint
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::Goal;
use crate::platform::{AnalogInput, DigitalOutput};

//=== Calibration =========================================================

/// Result of a successful calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    /// Mean reading with the beam intact.
    pub intact: i32,
    /// Mean reading with the beam broken.
    pub broken: i32,
    /// Threshold separating the two.
    pub threshold: i32,
}

//=== CalibrationError ====================================================

/// Reasons a threshold could not be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    /// One of the sample sets was empty.
    NoSamples,

    /// Intact readings were not higher than broken readings.
    NoContrast { intact: i32, broken: i32 },
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSamples => write!(f, "Calibration needs at least one sample per state"),
            Self::NoContrast { intact, broken } => write!(
                f,
                "No contrast between intact ({}) and broken ({}) readings",
                intact, broken
            ),
        }
    }
}

impl std::error::Error for CalibrationError {}

//=== calibrate_threshold() ===============================================

/// Computes the midpoint threshold between intact and broken readings.
///
/// # Errors
///
/// - [`CalibrationError::NoSamples`] if either slice is empty
/// - [`CalibrationError::NoContrast`] if the intact mean is not strictly
///   greater than the broken mean
///
/// # Examples
///
/// ```
/// use beam_goal::core::goal::calibrate_threshold;
///
/// let calibration = calibrate_threshold(&[900, 910, 890], &[100, 120, 80]).unwrap();
/// assert_eq!(calibration.threshold, 500);
/// ```
pub fn calibrate_threshold(intact: &[i32], broken: &[i32]) -> Result<Calibration, CalibrationError> {
    let intact = mean(intact).ok_or(CalibrationError::NoSamples)?;
    let broken = mean(broken).ok_or(CalibrationError::NoSamples)?;

    if intact <= broken {
        return Err(CalibrationError::NoContrast { intact, broken });
    }

    // Widen so extreme readings cannot overflow the subtraction
    let threshold = (broken as i64 + (intact as i64 - broken as i64) / 2) as i32;

    Ok(Calibration {
        intact,
        broken,
        threshold,
    })
}

fn mean(samples: &[i32]) -> Option<i32> {
    if samples.is_empty() {
        return None;
    }
    let sum: i64 = samples.iter().map(|&s| s as i64).sum();
    Some((sum / samples.len() as i64) as i32)
}

//=== Goal::calibrate() ===================================================

impl<O: DigitalOutput, I: AnalogInput> Goal<O, I> {
    /// Samples the sensor with the emitter on and off, then applies the
    /// midpoint threshold.
    ///
    /// The activation state is restored afterwards. On error the threshold
    /// is left unchanged.
    ///
    /// # Errors
    ///
    /// See [`calibrate_threshold`]. `samples_per_state == 0` yields
    /// [`CalibrationError::NoSamples`] without touching the hardware.
    pub fn calibrate(&mut self, samples_per_state: usize) -> Result<Calibration, CalibrationError> {
        if samples_per_state == 0 {
            return Err(CalibrationError::NoSamples);
        }

        let was_activated = self.is_activated();

        self.activate();
        let intact: Vec<i32> = (0..samples_per_state).map(|_| self.sample()).collect();

        self.deactivate();
        let broken: Vec<i32> = (0..samples_per_state).map(|_| self.sample()).collect();

        if was_activated {
            self.activate();
        }

        match calibrate_threshold(&intact, &broken) {
            Ok(calibration) => {
                info!(
                    target: "calibration",
                    "{} calibrated (intact: {}, broken: {}, threshold: {})",
                    self.display_name(), calibration.intact, calibration.broken, calibration.threshold
                );
                self.set_light_threshold(calibration.threshold);
                Ok(calibration)
            }
            Err(e) => {
                warn!(target: "calibration", "{} calibration failed: {}", self.display_name(), e);
                Err(e)
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
