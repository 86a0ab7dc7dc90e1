//! Signal quality estimation.
//!
//! Scores a filtered acceleration sample by how close its magnitude comes to
//! one standard gravity.

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Lowest quality ever reported, so quality-weighted confidence never drops
/// to zero on its own.
pub const MIN_QUALITY: f32 = 0.1;

/// Quality of a sample in the range `MIN_QUALITY..=1.0`.
#[inline]
pub fn signal_quality(x: f32, y: f32, z: f32) -> f32 {
    let magnitude = libm::sqrtf(x * x + y * y + z * z);
    let normalized = magnitude / STANDARD_GRAVITY;

    // NaN input lands on the floor
    if normalized >= 1.0 {
        1.0
    } else if normalized > MIN_QUALITY {
        normalized
    } else {
        MIN_QUALITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resting_device_is_full_quality() {
        assert_eq!(signal_quality(0.0, 0.0, 9.81), 1.0);
    }

    #[test]
    fn strong_motion_is_capped() {
        assert_eq!(signal_quality(20.0, -15.0, 9.81), 1.0);
    }

    #[test]
    fn weak_signal_scales_linearly() {
        let q = signal_quality(0.0, 4.905, 0.0);
        assert!((q - 0.5).abs() < 1e-6);
    }

    #[test]
    fn no_signal_hits_floor() {
        assert_eq!(signal_quality(0.0, 0.0, 0.0), MIN_QUALITY);
        assert_eq!(signal_quality(f32::NAN, 0.0, 0.0), MIN_QUALITY);
    }
}
