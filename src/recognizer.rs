use num_traits::AsPrimitive;

use crate::classifier::Classifier;
use crate::config::{Config, ConfigError};
use crate::event::GestureEvent;
use crate::machine::Observation;
use crate::quality::signal_quality;
use crate::stability::{DEFAULT_HISTORY, PredictionRecord};
use crate::state::{State, Status};

#[cfg(feature = "anomaly-gate")]
use crate::anomaly::Verdict;

/// Drives samples through filtering, classification and the confirmation
/// gates, one tick at a time.
///
/// `W` is the feature window length in floats (samples per window times 3),
/// `H` the number of predictions kept for stability scoring.
pub struct Recognizer<'a, C, const W: usize, const H: usize = DEFAULT_HISTORY> {
    config: Config<'a>,
    classifier: C,
    state: State<W, H>,
}

impl<'a, C, const W: usize, const H: usize> Recognizer<'a, C, W, H>
where
    C: Classifier,
{
    pub fn new(config: Config<'a>, classifier: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Config::validate_sizes(W, H)?;

        log::info!(
            "gesture recognizer: {} features/window, thresholds base {:.2} symbol {:.2}, duplicate window {} ms",
            W,
            config.thresholds.base,
            config.thresholds.symbol,
            config.timing.duplicate_window_ms
        );

        Ok(Self {
            state: State::new(&config),
            config,
            classifier,
        })
    }

    pub fn config(&self) -> &Config<'a> {
        &self.config
    }

    pub fn classifier_mut(&mut self) -> &mut C {
        &mut self.classifier
    }

    /// Bias offsets subtracted from every raw sample before filtering
    pub fn set_offsets(&mut self, offsets: [f32; 3]) {
        log::info!(
            "sensor offsets x: {:.2}, y: {:.2}, z: {:.2}",
            offsets[0],
            offsets[1],
            offsets[2]
        );
        self.state.offsets = offsets;
        self.state.offsets_set = true;
    }

    /// Process one sample taken at `now_ms`.
    ///
    /// Samples closer than one sampling period to the previous accepted
    /// sample are dropped. Returns an event only when a window completes and
    /// its gesture clears every gate.
    pub fn update<T>(&mut self, sample: [T; 3], now_ms: u64) -> Option<GestureEvent>
    where
        T: AsPrimitive<f32>,
    {
        if let Some(last) = self.state.last_sample_ms {
            if now_ms.saturating_sub(last) < self.config.sample_period_ms() {
                return None;
            }
        }
        self.state.last_sample_ms = Some(now_ms);

        let offsets = self.state.offsets;
        let raw = [
            sample[0].as_() - offsets[0],
            sample[1].as_() - offsets[1],
            sample[2].as_() - offsets[2],
        ];

        let filtered = self.state.filters.apply(raw);
        let [x, y, z] = filtered.accel;
        let quality = signal_quality(x, y, z);
        self.state.last_filtered = filtered;
        self.state.last_quality = quality;

        for value in filtered.accel {
            // W is a multiple of 3 and the window is drained when full
            let _ = self.state.window.push(value);
        }

        if self.state.window.is_full() {
            self.process_window(quality, now_ms)
        } else {
            None
        }
    }

    fn process_window(&mut self, quality: f32, now_ms: u64) -> Option<GestureEvent> {
        let result = self.classifier.classify(self.state.window.as_slice());
        self.state.window.clear();

        let classification = match result {
            Ok(classification) => classification,
            Err(err) => {
                log::warn!("classifier failed, window discarded: {:?}", err);
                return None;
            }
        };

        let (best, raw_confidence) = classification.top();

        #[cfg(feature = "anomaly-gate")]
        if let Some(anomaly) = classification.anomaly {
            if self.state.anomaly.update_and_check(anomaly, quality, now_ms) == Verdict::Reject {
                return None;
            }
        }

        let controlled = self.state.controller.control(raw_confidence, quality);
        let is_symbol = self.config.is_symbol(&best);

        let stability_score = self.state.history.stability(&best, now_ms);
        self.state.history.record(PredictionRecord {
            label: best.clone(),
            raw_confidence,
            controlled_confidence: controlled,
            stability_score,
            timestamp_ms: now_ms,
            is_symbol,
            signal_quality: quality,
        });

        let observation = Observation {
            label: &best,
            confidence: controlled,
            threshold: self.config.thresholds.effective(is_symbol, quality),
            is_symbol,
        };
        let confirmation = self
            .state
            .machine
            .step(&observation, &self.state.history, now_ms);

        self.log_summary(&best, raw_confidence, controlled, quality, now_ms);

        let confirmation = confirmation?;
        if !self.state.duplicates.allow(&confirmation.label, now_ms) {
            return None;
        }

        log::info!(
            "confirmed gesture: {} (conf: {:.2}, quality: {:.2})",
            confirmation.label,
            confirmation.confidence,
            quality
        );

        Some(GestureEvent {
            label: confirmation.label,
            confidence: confirmation.confidence,
            signal_quality: quality,
            is_symbol: confirmation.is_symbol,
            timestamp_ms: now_ms,
            anomaly_threshold: self.state.anomaly.threshold(),
        })
    }

    fn log_summary(&mut self, best: &str, raw: f32, controlled: f32, quality: f32, now_ms: u64) {
        let due = match self.state.last_summary_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.config.timing.summary_interval_ms,
        };
        if !due {
            return;
        }

        log::trace!(
            "top: {}({:.2}->{:.2}) quality: {:.2} state: {:?}",
            best,
            raw,
            controlled,
            quality,
            self.state.machine.state()
        );
        self.state.last_summary_ms = Some(now_ms);
    }

    /// Snapshot of the recognizer for diagnostics
    pub fn status(&self, now_ms: u64) -> Status<'_> {
        let state = &self.state;
        Status {
            state: state.machine.state(),
            candidate: state.machine.candidate_label(),
            last_emitted: state.duplicates.last_label(),
            since_last_emission_ms: now_ms.saturating_sub(state.duplicates.last_emitted_ms()),
            anomaly_threshold: state.anomaly.threshold(),
            noise_level: state.anomaly.noise_level(),
            offsets_set: state.offsets_set,
            signal_quality: state.last_quality,
            jerk_magnitude: state.last_filtered.jerk_magnitude(),
            window_fill: state.window.len() / 3,
            history_len: state.history.len(),
        }
    }

    /// Return to Idle and forget the last emission, the prediction history
    /// and the partial window.
    ///
    /// Filter, controller and anomaly state are kept.
    pub fn reset(&mut self) {
        self.state.machine.reset();
        self.state.duplicates.reset();
        self.state.history.clear();
        self.state.window.clear();
        log::info!("gesture recognizer reset");
    }
}
