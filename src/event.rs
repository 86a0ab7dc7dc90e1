use crate::classifier::Label;

/// A confirmed, de-duplicated gesture, ready for transport
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    pub label: Label,
    /// Controlled confidence of the confirming window
    pub confidence: f32,
    pub signal_quality: f32,
    pub is_symbol: bool,
    pub timestamp_ms: u64,
    /// Live anomaly threshold at emission, for diagnostics
    pub anomaly_threshold: f32,
}
