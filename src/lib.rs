#![no_std]

mod config;
mod event;
mod recognizer;
mod state;
pub mod anomaly;
pub mod classifier;
pub mod controller;
pub mod duplicate;
pub mod filters;
pub mod machine;
pub mod quality;
pub mod stability;

pub use config::{
    AnomalyConfig, Config, ConfigError, ControllerGains, DEFAULT_SYMBOL_LABELS, Thresholds, Timing,
};
pub use event::GestureEvent;
pub use recognizer::Recognizer;
pub use state::Status;
pub use anomaly::{AnomalyGate, Verdict};
pub use classifier::{Classification, Classifier, Label, LabelScore};
pub use controller::ConfidenceController;
pub use duplicate::DuplicateGate;
pub use filters::{FilterBank, FilteredSample, LowPassFilter};
pub use machine::{Confirmation, GestureMachine, GestureState, Observation};
pub use quality::signal_quality;
pub use stability::{PredictionRecord, StabilityBuffer};
