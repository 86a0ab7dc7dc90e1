//! Short-horizon agreement between recent predictions.

use crate::classifier::Label;

/// Default number of predictions kept
pub const DEFAULT_HISTORY: usize = 4;

/// One classified, accepted window
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    pub label: Label,
    pub raw_confidence: f32,
    pub controlled_confidence: f32,
    pub stability_score: f32,
    pub timestamp_ms: u64,
    pub is_symbol: bool,
    pub signal_quality: f32,
}

/// Fixed ring of the last `N` predictions. The oldest entry is overwritten.
#[derive(Debug, Clone)]
pub struct StabilityBuffer<const N: usize = DEFAULT_HISTORY> {
    entries: [Option<PredictionRecord>; N],
    next: usize,
    lookback_ms: u64,
}

impl<const N: usize> StabilityBuffer<N> {
    pub fn new(lookback_ms: u64) -> Self {
        Self {
            entries: core::array::from_fn(|_| None),
            next: 0,
            lookback_ms,
        }
    }

    pub fn record(&mut self, prediction: PredictionRecord) {
        if N == 0 {
            return;
        }
        self.entries[self.next] = Some(prediction);
        self.next = (self.next + 1) % N;
    }

    /// Mean controlled confidence of entries for `label` younger than the
    /// lookback window, or 0.0 if there are none.
    ///
    /// Age is checked per entry; slot order says nothing about recency.
    pub fn stability(&self, label: &str, now_ms: u64) -> f32 {
        let mut sum = 0.0;
        let mut count = 0u32;

        for entry in self.entries.iter().flatten() {
            let age = now_ms.saturating_sub(entry.timestamp_ms);
            if entry.label.as_str() == label && age < self.lookback_ms {
                sum += entry.controlled_confidence;
                count += 1;
            }
        }

        if count > 0 { sum / count as f32 } else { 0.0 }
    }

    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.entries = core::array::from_fn(|_| None);
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::label;

    fn record(text: &str, confidence: f32, timestamp_ms: u64) -> PredictionRecord {
        PredictionRecord {
            label: label(text),
            raw_confidence: confidence,
            controlled_confidence: confidence,
            stability_score: 0.0,
            timestamp_ms,
            is_symbol: false,
            signal_quality: 1.0,
        }
    }

    #[test]
    fn empty_buffer_scores_zero() {
        let buffer: StabilityBuffer = StabilityBuffer::new(500);
        assert!(buffer.is_empty());
        assert_eq!(buffer.stability("peace", 0), 0.0);
    }

    #[test]
    fn averages_matching_label_only() {
        let mut buffer: StabilityBuffer = StabilityBuffer::new(500);
        buffer.record(record("peace", 0.6, 0));
        buffer.record(record("fist", 0.9, 10));
        buffer.record(record("peace", 0.8, 20));

        assert!((buffer.stability("peace", 30) - 0.7).abs() < 1e-6);
        assert!((buffer.stability("fist", 30) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn stale_entries_are_ignored() {
        let mut buffer: StabilityBuffer = StabilityBuffer::new(500);
        buffer.record(record("ok", 0.2, 0));
        buffer.record(record("ok", 0.8, 400));

        // Entry at 0 is exactly 500ms old at t=500
        assert!((buffer.stability("ok", 500) - 0.8).abs() < 1e-6);
        assert_eq!(buffer.stability("ok", 900), 0.0);
    }

    #[test]
    fn oldest_entry_is_overwritten() {
        let mut buffer: StabilityBuffer<2> = StabilityBuffer::new(500);
        buffer.record(record("ok", 0.2, 0));
        buffer.record(record("ok", 0.4, 10));
        buffer.record(record("ok", 0.6, 20));

        assert_eq!(buffer.len(), 2);
        assert!((buffer.stability("ok", 30) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn clear_drops_every_entry() {
        let mut buffer: StabilityBuffer<2> = StabilityBuffer::new(500);
        buffer.record(record("ok", 0.4, 0));
        buffer.record(record("ok", 0.6, 10));
        buffer.record(record("fist", 0.9, 20));

        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.stability("ok", 30), 0.0);

        buffer.record(record("fist", 0.8, 40));
        assert_eq!(buffer.len(), 1);
        assert!((buffer.stability("fist", 50) - 0.8).abs() < 1e-6);
    }
}
