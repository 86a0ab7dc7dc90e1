use super::LowPassFilter;

/// Filtered output of one sampling tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilteredSample {
    /// Low-passed acceleration per axis
    pub accel: [f32; 3],
    /// Smoothed rate of change of the raw acceleration per axis (jerk)
    pub jerk: [f32; 3],
}

impl FilteredSample {
    pub fn jerk_magnitude(&self) -> f32 {
        let [x, y, z] = self.jerk;
        libm::sqrtf(x * x + y * y + z * z)
    }
}

/// Per-axis acceleration and derivative filters
#[derive(Debug, Clone, Copy)]
pub struct FilterBank {
    accel: [LowPassFilter; 3],
    derivative: [LowPassFilter; 3],
    sample_rate_hz: f32,
}

impl FilterBank {
    pub const fn new(accel_alpha: f32, derivative_alpha: f32, sample_rate_hz: f32) -> Self {
        Self {
            accel: [LowPassFilter::new(accel_alpha); 3],
            derivative: [LowPassFilter::new(derivative_alpha); 3],
            sample_rate_hz,
        }
    }

    /// Run one bias-corrected sample through every axis filter
    pub fn apply(&mut self, raw: [f32; 3]) -> FilteredSample {
        let mut out = FilteredSample::default();

        for axis in 0..3 {
            out.accel[axis] = self.accel[axis].apply(raw[axis]);
            out.jerk[axis] = self.derivative[axis].derivative(raw[axis], self.sample_rate_hz);
        }

        out
    }

    pub fn reset(&mut self) {
        for filter in self.accel.iter_mut().chain(self.derivative.iter_mut()) {
            filter.reset();
        }
    }
}
