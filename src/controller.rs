//! Confidence shaping.
//!
//! Raw confidence from small-window classifiers spikes from one window to the
//! next. The controller steers toward `raw * quality` using its own previous
//! output as the process variable, and adds only a tenth of the correction
//! back onto the raw value.

use crate::config::ControllerGains;

/// Bound on the integral accumulator
pub const INTEGRAL_LIMIT: f32 = 10.0;

/// Share of the PID correction added to the raw confidence
const CORRECTION_SCALE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceController {
    gains: ControllerGains,
    integral: f32,
    previous_error: f32,
    previous_output: f32,
}

impl ConfidenceController {
    pub const fn new(gains: ControllerGains) -> Self {
        Self {
            gains,
            integral: 0.0,
            previous_error: 0.0,
            previous_output: 0.0,
        }
    }

    /// Controlled confidence in the range 0.0..=1.0
    pub fn control(&mut self, raw_confidence: f32, signal_quality: f32) -> f32 {
        let target = raw_confidence * signal_quality;
        let error = target - self.previous_output;

        let proportional = self.gains.proportional * error;

        self.integral = (self.integral + error).clamp(-INTEGRAL_LIMIT, INTEGRAL_LIMIT);
        let integral = self.gains.integral * self.integral;

        let derivative = self.gains.derivative * (error - self.previous_error);

        let correction = CORRECTION_SCALE * (proportional + integral + derivative);
        let output = (raw_confidence + correction).clamp(0.0, 1.0);

        self.previous_error = error;
        self.previous_output = output;
        output
    }

    pub fn integral(&self) -> f32 {
        self.integral
    }

    pub fn previous_output(&self) -> f32 {
        self.previous_output
    }
}

impl Default for ConfidenceController {
    fn default() -> Self {
        Self::new(ControllerGains::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_window_from_rest() {
        let mut c = ConfidenceController::default();

        // error 0.5; P 0.5, I 0.05, D 0.1 -> 0.5 + 0.065
        let out = c.control(0.5, 1.0);
        assert!((out - 0.565).abs() < 1e-5, "got {}", out);
    }

    #[test]
    fn low_quality_pulls_confidence_down() {
        let mut c = ConfidenceController::default();
        c.control(0.6, 1.0);

        // target 0.06 sits far below the previous output
        let out = c.control(0.6, 0.1);
        assert!(out < 0.6, "got {}", out);
    }

    #[test]
    fn output_is_clamped() {
        let mut c = ConfidenceController::default();
        assert_eq!(c.control(0.99, 1.0), 1.0);

        let mut c = ConfidenceController::new(ControllerGains {
            proportional: 5.0,
            integral: 0.0,
            derivative: 0.0,
        });
        c.control(1.0, 1.0);
        assert_eq!(c.control(0.0, 1.0), 0.0);
    }

    #[test]
    fn zero_gains_pass_raw_through() {
        let mut c = ConfidenceController::new(ControllerGains {
            proportional: 0.0,
            integral: 0.0,
            derivative: 0.0,
        });
        assert_eq!(c.control(0.42, 0.3), 0.42);
    }
}
