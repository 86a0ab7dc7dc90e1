/// One-pole low-pass filter state
///
/// Starts from zero rather than from the first input, so the first outputs
/// ramp toward the signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPassFilter {
    previous_input: f32,
    previous_output: f32,
    alpha: f32,
}

impl LowPassFilter {
    /// Create a filter with the given smoothing factor and zeroed state
    pub const fn new(alpha: f32) -> Self {
        Self {
            previous_input: 0.0,
            previous_output: 0.0,
            alpha,
        }
    }

    /// Apply low-pass: output = alpha * input + (1 - alpha) * previous_output
    pub fn apply(&mut self, input: f32) -> f32 {
        debug_assert!(
            self.alpha > 0.0 && self.alpha <= 1.0,
            "low-pass alpha must be in range (0.0, 1.0], got {}",
            self.alpha
        );

        let output = self.alpha * input + (1.0 - self.alpha) * self.previous_output;
        self.previous_output = output;
        output
    }

    /// Finite difference against the previous input, scaled to units per
    /// second and smoothed through [`apply`](Self::apply).
    pub fn derivative(&mut self, input: f32, sample_rate_hz: f32) -> f32 {
        let raw = (input - self.previous_input) * sample_rate_hz;
        self.previous_input = input;
        self.apply(raw)
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn previous_output(&self) -> f32 {
        self.previous_output
    }

    /// Reset filter state, keeping the smoothing factor
    pub fn reset(&mut self) {
        self.previous_input = 0.0;
        self.previous_output = 0.0;
    }
}
