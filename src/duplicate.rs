use crate::classifier::{label, Label};

/// Time-windowed suppression of repeated identical emissions
#[derive(Debug, Clone)]
pub struct DuplicateGate {
    last_label: Label,
    last_emitted_ms: u64,
    window_ms: u64,
}

impl DuplicateGate {
    pub fn new(window_ms: u64) -> Self {
        Self {
            last_label: Label::new(),
            last_emitted_ms: 0,
            window_ms,
        }
    }

    /// Whether `candidate` may be emitted now. Records the emission when it may.
    pub fn allow(&mut self, candidate: &str, now_ms: u64) -> bool {
        let since_last = now_ms.saturating_sub(self.last_emitted_ms);

        if candidate == self.last_label.as_str() && since_last < self.window_ms {
            log::info!(
                "duplicate blocked: {} (last: {} ms ago)",
                candidate,
                since_last
            );
            return false;
        }

        self.last_label = label(candidate);
        self.last_emitted_ms = now_ms;
        true
    }

    /// Last emitted label, empty if nothing was emitted since the last reset
    pub fn last_label(&self) -> &str {
        self.last_label.as_str()
    }

    pub fn last_emitted_ms(&self) -> u64 {
        self.last_emitted_ms
    }

    pub fn reset(&mut self) {
        self.last_label.clear();
        self.last_emitted_ms = 0;
    }
}
