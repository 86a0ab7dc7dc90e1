//! Boundary to the external window classifier.

use heapless::{String, Vec};

/// Longest label kept, in bytes
pub const LABEL_CAPACITY: usize = 32;

/// Most labels a single classification may report
pub const MAX_LABELS: usize = 16;

pub type Label = String<LABEL_CAPACITY>;

/// Copy a label into fixed storage, truncating at a char boundary if it
/// does not fit.
pub fn label(text: &str) -> Label {
    let mut out = Label::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: Label,
    pub value: f32,
}

impl LabelScore {
    pub fn new(text: &str, value: f32) -> Self {
        Self {
            label: label(text),
            value,
        }
    }
}

/// One window's worth of classifier output
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    pub scores: Vec<LabelScore, MAX_LABELS>,
    /// Present only for models with an anomaly block
    pub anomaly: Option<f32>,
}

impl Classification {
    /// Label with the strictly highest positive confidence. The first label
    /// wins ties; an all-zero vector yields an empty label at 0.0.
    pub fn top(&self) -> (Label, f32) {
        let mut best = Label::new();
        let mut best_value = 0.0;

        for score in self.scores.iter() {
            if score.value > best_value {
                best_value = score.value;
                best = score.label.clone();
            }
        }

        (best, best_value)
    }
}

/// Maps a completed feature window to per-label confidences.
///
/// The window is laid out as interleaved `x, y, z` filtered acceleration.
/// An error discards the window and leaves every other piece of state alone.
pub trait Classifier {
    type Error: core::fmt::Debug;

    fn classify(&mut self, features: &[f32]) -> Result<Classification, Self::Error>;
}

impl<C: Classifier + ?Sized> Classifier for &mut C {
    type Error = C::Error;

    fn classify(&mut self, features: &[f32]) -> Result<Classification, Self::Error> {
        (**self).classify(features)
    }
}
