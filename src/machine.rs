//! Four-state gesture confirmation.
//!
//! ```text
//! Idle --conf >= T--> Detecting --same label, stable, dwell--> Confirmed
//!  ^                     |                                        |
//!  |<--timeout / abandon-+                                   next step
//!  |                                                              v
//!  +<------------------------ cooldown elapsed ---------------- Cooldown
//! ```
//!
//! All deadlines are checked against the timestamp handed to [`GestureMachine::step`];
//! leaving a timed state simply stops checking its deadline.

use crate::classifier::{label, Label};
use crate::config::Timing;
use crate::stability::StabilityBuffer;

/// Share of the effective threshold below which a detection is abandoned
const ABANDON_RATIO: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Detecting,
    /// Lasts exactly one step and marks the emission instant
    Confirmed,
    Cooldown,
}

/// Input for one accepted window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation<'a> {
    pub label: &'a str,
    pub confidence: f32,
    /// Effective threshold for this window's label and signal quality
    pub threshold: f32,
    pub is_symbol: bool,
}

/// A gesture that passed the confirmation protocol
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub label: Label,
    pub confidence: f32,
    pub is_symbol: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    label: Label,
    confidence: f32,
    is_symbol: bool,
}

#[derive(Debug, Clone)]
pub struct GestureMachine {
    state: GestureState,
    entered_ms: u64,
    candidate: Option<Candidate>,
    timing: Timing,
}

impl GestureMachine {
    pub fn new(timing: Timing) -> Self {
        Self {
            state: GestureState::Idle,
            entered_ms: 0,
            candidate: None,
            timing,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn state_entered_ms(&self) -> u64 {
        self.entered_ms
    }

    pub fn candidate_label(&self) -> Option<&str> {
        self.candidate.as_ref().map(|c| c.label.as_str())
    }

    pub fn candidate_confidence(&self) -> Option<f32> {
        self.candidate.as_ref().map(|c| c.confidence)
    }

    /// Advance on one accepted window. Returns the confirmation on the
    /// Detecting -> Confirmed transition and `None` otherwise.
    pub fn step<const N: usize>(
        &mut self,
        observation: &Observation<'_>,
        history: &StabilityBuffer<N>,
        now_ms: u64,
    ) -> Option<Confirmation> {
        let elapsed = now_ms.saturating_sub(self.entered_ms);
        let threshold = observation.threshold;

        match self.state {
            GestureState::Idle => {
                if observation.confidence >= threshold && !observation.label.is_empty() {
                    log::debug!(
                        "gesture state: Idle -> Detecting ({}, conf: {:.2})",
                        observation.label,
                        observation.confidence
                    );
                    self.candidate = Some(Candidate {
                        label: label(observation.label),
                        confidence: observation.confidence,
                        is_symbol: observation.is_symbol,
                    });
                    self.enter(GestureState::Detecting, now_ms);
                }
                None
            }

            GestureState::Detecting => {
                let matches = self
                    .candidate
                    .as_ref()
                    .is_some_and(|c| c.label.as_str() == observation.label);

                if matches && observation.confidence >= threshold {
                    let stability = history.stability(observation.label, now_ms);

                    if stability >= threshold && elapsed >= self.timing.min_dwell_ms {
                        return self.confirm(observation.confidence, stability, now_ms);
                    }
                    if elapsed > self.timing.detect_timeout_ms {
                        self.abandon("timeout", now_ms);
                    }
                } else if elapsed > self.timing.detect_timeout_ms {
                    self.abandon("timeout", now_ms);
                } else if observation.confidence < threshold * ABANDON_RATIO {
                    self.abandon("low confidence", now_ms);
                }
                None
            }

            GestureState::Confirmed => {
                log::debug!("gesture state: Confirmed -> Cooldown");
                self.enter(GestureState::Cooldown, now_ms);
                None
            }

            GestureState::Cooldown => {
                // Dwell follows the class of the window being stepped
                if elapsed > self.timing.cooldown_for(observation.is_symbol) {
                    log::debug!("gesture state: Cooldown -> Idle");
                    self.candidate = None;
                    self.enter(GestureState::Idle, now_ms);
                }
                None
            }
        }
    }

    /// Back to Idle, forgetting any candidate
    pub fn reset(&mut self) {
        self.candidate = None;
        self.state = GestureState::Idle;
        self.entered_ms = 0;
    }

    fn enter(&mut self, state: GestureState, now_ms: u64) {
        self.state = state;
        self.entered_ms = now_ms;
    }

    fn confirm(&mut self, confidence: f32, stability: f32, now_ms: u64) -> Option<Confirmation> {
        let candidate = self.candidate.as_mut()?;
        candidate.confidence = confidence;

        log::debug!(
            "gesture state: Detecting -> Confirmed ({}, stability: {:.2})",
            candidate.label,
            stability
        );

        let confirmation = Confirmation {
            label: candidate.label.clone(),
            confidence,
            is_symbol: candidate.is_symbol,
        };
        self.enter(GestureState::Confirmed, now_ms);
        Some(confirmation)
    }

    fn abandon(&mut self, reason: &str, now_ms: u64) {
        log::debug!("gesture state: Detecting -> Idle ({})", reason);
        self.candidate = None;
        self.enter(GestureState::Idle, now_ms);
    }
}
