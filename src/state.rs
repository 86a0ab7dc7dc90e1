use heapless::Vec;

use crate::anomaly::AnomalyGate;
use crate::config::Config;
use crate::controller::ConfidenceController;
use crate::duplicate::DuplicateGate;
use crate::filters::{FilterBank, FilteredSample};
use crate::machine::{GestureMachine, GestureState};
use crate::stability::StabilityBuffer;

/// Every piece of mutable recognizer state, owned by one execution context
pub struct State<const W: usize, const H: usize> {
    pub filters: FilterBank,
    pub anomaly: AnomalyGate,
    pub controller: ConfidenceController,
    pub history: StabilityBuffer<H>,
    pub machine: GestureMachine,
    pub duplicates: DuplicateGate,
    /// Interleaved x, y, z filtered samples of the window being collected
    pub window: Vec<f32, W>,
    pub offsets: [f32; 3],
    pub offsets_set: bool,
    pub last_sample_ms: Option<u64>,
    pub last_summary_ms: Option<u64>,
    pub last_filtered: FilteredSample,
    pub last_quality: f32,
}

impl<const W: usize, const H: usize> State<W, H> {
    pub fn new(config: &Config<'_>) -> Self {
        Self {
            filters: FilterBank::new(
                config.accel_alpha,
                config.derivative_alpha,
                config.sample_rate_hz as f32,
            ),
            anomaly: AnomalyGate::new(&config.anomaly),
            controller: ConfidenceController::new(config.gains),
            history: StabilityBuffer::new(config.timing.stability_lookback_ms),
            machine: GestureMachine::new(config.timing),
            duplicates: DuplicateGate::new(config.timing.duplicate_window_ms),
            window: Vec::new(),
            offsets: [0.0; 3],
            offsets_set: false,
            last_sample_ms: None,
            last_summary_ms: None,
            last_filtered: FilteredSample::default(),
            last_quality: crate::quality::MIN_QUALITY,
        }
    }
}

/// Point-in-time view of the recognizer for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct Status<'s> {
    pub state: GestureState,
    pub candidate: Option<&'s str>,
    /// Empty if nothing was emitted since the last reset
    pub last_emitted: &'s str,
    pub since_last_emission_ms: u64,
    pub anomaly_threshold: f32,
    pub noise_level: f32,
    pub offsets_set: bool,
    pub signal_quality: f32,
    pub jerk_magnitude: f32,
    /// Samples collected toward the current window
    pub window_fill: usize,
    /// Predictions held for the stability check
    pub history_len: usize,
}
