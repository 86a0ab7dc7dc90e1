//! Adaptive anomaly gating.
//!
//! Tracks a threshold that loosens as signal quality drops, since noisy
//! input produces more spurious anomaly scores. Windows scoring above the
//! live threshold are rejected before they reach the state machine.

use crate::config::AnomalyConfig;

pub const MIN_ANOMALY_THRESHOLD: f32 = 0.1;
pub const MAX_ANOMALY_THRESHOLD: f32 = 1.0;

/// Outcome of checking one window's anomaly score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyGate {
    base_threshold: f32,
    current_threshold: f32,
    noise_level: f32,
    last_signal_strength: f32,
    adaptation_rate: f32,
    update_interval_ms: u64,
    last_update_ms: Option<u64>,
}

impl AnomalyGate {
    /// The initial threshold is the base threshold clamped into the legal band.
    pub fn new(config: &AnomalyConfig) -> Self {
        Self {
            base_threshold: config.base_threshold,
            current_threshold: clamp_threshold(config.base_threshold),
            noise_level: 0.1,
            last_signal_strength: 1.0,
            adaptation_rate: config.adaptation_rate,
            update_interval_ms: config.update_interval_ms,
            last_update_ms: None,
        }
    }

    /// Adapt the threshold (rate limited) and decide on the window.
    pub fn update_and_check(&mut self, anomaly: f32, signal_quality: f32, now_ms: u64) -> Verdict {
        self.adapt(anomaly, signal_quality, now_ms);

        if anomaly > self.current_threshold {
            log::debug!(
                "anomaly {:.3} > {:.3} (adaptive), window rejected",
                anomaly,
                self.current_threshold
            );
            Verdict::Reject
        } else {
            Verdict::Accept
        }
    }

    fn adapt(&mut self, anomaly: f32, signal_quality: f32, now_ms: u64) {
        let due = match self.last_update_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.update_interval_ms,
        };
        if !due {
            return;
        }

        let target = self.base_threshold * (2.0 - signal_quality);
        self.current_threshold = clamp_threshold(
            self.current_threshold + self.adaptation_rate * (target - self.current_threshold),
        );

        // A non-finite score would poison the average for good
        if anomaly.is_finite() {
            self.noise_level = 0.9 * self.noise_level + 0.1 * anomaly;
        }
        self.last_signal_strength = signal_quality;
        self.last_update_ms = Some(now_ms);
    }

    pub fn threshold(&self) -> f32 {
        self.current_threshold
    }

    /// Moving average of raw anomaly scores. Diagnostics only.
    pub fn noise_level(&self) -> f32 {
        self.noise_level
    }

    pub fn last_signal_strength(&self) -> f32 {
        self.last_signal_strength
    }
}

fn clamp_threshold(value: f32) -> f32 {
    if value.is_nan() {
        MAX_ANOMALY_THRESHOLD
    } else {
        value.clamp(MIN_ANOMALY_THRESHOLD, MAX_ANOMALY_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(base: f32, rate: f32) -> AnomalyGate {
        AnomalyGate::new(&AnomalyConfig {
            base_threshold: base,
            adaptation_rate: rate,
            update_interval_ms: 100,
        })
    }

    #[test]
    fn non_finite_score_leaves_noise_level_intact() {
        let mut g = gate(0.5, 0.0);

        g.update_and_check(f32::NAN, 1.0, 0);
        assert_eq!(g.noise_level(), 0.1);

        for t in 1..10 {
            assert_eq!(g.update_and_check(0.1, 1.0, t * 100), Verdict::Accept);
        }
        assert!((g.noise_level() - 0.1).abs() < 1e-6);

        g.update_and_check(f32::INFINITY, 1.0, 1000);
        assert!(g.noise_level().is_finite());
    }

    #[test]
    fn initial_threshold_is_clamped() {
        assert_eq!(gate(1.2, 0.0).threshold(), 1.0);
        assert_eq!(gate(0.01, 0.0).threshold(), 0.1);
    }

    #[test]
    fn zero_rate_freezes_threshold() {
        let mut g = gate(0.5, 0.0);
        for t in 0..20 {
            g.update_and_check(0.2, 0.1, t * 150);
        }
        assert_eq!(g.threshold(), 0.5);
    }

    #[test]
    fn tracks_target_exponentially() {
        let mut g = gate(0.4, 0.5);

        // target = 0.4 * (2 - 0.5) = 0.6; 0.4 + 0.5 * 0.2 = 0.5
        g.update_and_check(0.0, 0.5, 0);
        assert!((g.threshold() - 0.5).abs() < 1e-6);

        // 0.5 + 0.5 * 0.1 = 0.55
        g.update_and_check(0.0, 0.5, 100);
        assert!((g.threshold() - 0.55).abs() < 1e-6);
    }

    #[test]
    fn updates_are_rate_limited() {
        let mut g = gate(0.4, 0.5);
        g.update_and_check(0.0, 0.5, 1000);
        let after_first = g.threshold();

        g.update_and_check(0.0, 0.5, 1050);
        g.update_and_check(0.0, 0.5, 1099);
        assert_eq!(g.threshold(), after_first);

        g.update_and_check(0.0, 0.5, 1100);
        assert!(g.threshold() > after_first);
    }

    #[test]
    fn rejects_above_threshold() {
        let mut g = gate(0.5, 0.0);
        assert_eq!(g.update_and_check(0.5, 1.0, 0), Verdict::Accept);
        assert_eq!(g.update_and_check(0.51, 1.0, 200), Verdict::Reject);
    }

    #[test]
    fn noise_level_is_moving_average() {
        let mut g = gate(0.5, 0.0);
        g.update_and_check(1.1, 1.0, 0);
        // 0.9 * 0.1 + 0.1 * 1.1
        assert!((g.noise_level() - 0.2).abs() < 1e-6);
        assert_eq!(g.last_signal_strength(), 1.0);
    }
}
