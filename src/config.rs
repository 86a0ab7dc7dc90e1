use crate::filters::validate_alpha;

/// Symbol-class labels used by [`Config::default`].
pub const DEFAULT_SYMBOL_LABELS: [&str; 6] =
    ["peace", "ok", "thumbs_up", "thumbs_down", "fist", "open_hand"];

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidSampleRate,
    InvalidSmoothingFactor,
    InvalidThreshold,
    InvalidGains,
    InvalidAnomalyConfig,
    InvalidTiming,
    EmptySymbolLabels,
    InvalidWindowSize,
    InvalidHistorySize,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidSampleRate => write!(f, "sample_rate_hz must be greater than 0"),
            ConfigError::InvalidSmoothingFactor => {
                write!(f, "filter smoothing factors must be in range (0.0, 1.0]")
            }
            ConfigError::InvalidThreshold => {
                write!(f, "class confidence thresholds must be in range (0.0, 1.0]")
            }
            ConfigError::InvalidGains => write!(f, "controller gains must be finite and >= 0"),
            ConfigError::InvalidAnomalyConfig => write!(
                f,
                "anomaly base_threshold must be > 0 and adaptation_rate in range [0.0, 1.0]"
            ),
            ConfigError::InvalidTiming => {
                write!(f, "detect_timeout_ms must be greater than min_dwell_ms")
            }
            ConfigError::EmptySymbolLabels => write!(f, "symbol_labels must not be empty"),
            ConfigError::InvalidWindowSize => {
                write!(f, "feature window length must be a non-zero multiple of 3")
            }
            ConfigError::InvalidHistorySize => write!(f, "prediction history must hold at least 1 entry"),
        }
    }
}

/// Per-class base confidence thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub base: f32,
    pub symbol: f32,
}

impl Thresholds {
    /// Effective threshold for a window: class threshold * (0.7 + 0.3 * quality).
    pub fn effective(&self, is_symbol: bool, signal_quality: f32) -> f32 {
        let class = if is_symbol { self.symbol } else { self.base };
        class * (0.7 + 0.3 * signal_quality)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            base: 0.25,
            symbol: 0.20,
        }
    }
}

/// Gains of the confidence controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerGains {
    pub proportional: f32,
    pub integral: f32,
    pub derivative: f32,
}

impl Default for ControllerGains {
    fn default() -> Self {
        Self {
            proportional: 1.0,
            integral: 0.1,
            derivative: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyConfig {
    /// Threshold scaled by `2 - quality` to form the adaptation target
    pub base_threshold: f32,
    /// 0.0 freezes the threshold at its initial value
    pub adaptation_rate: f32,
    pub update_interval_ms: u64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            base_threshold: 1.2,
            adaptation_rate: 0.0,
            update_interval_ms: 100,
        }
    }
}

/// Wall-clock dwell and suppression windows, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub min_dwell_ms: u64,
    pub detect_timeout_ms: u64,
    pub symbol_cooldown_ms: u64,
    pub cooldown_ms: u64,
    pub duplicate_window_ms: u64,
    pub stability_lookback_ms: u64,
    pub summary_interval_ms: u64,
}

impl Timing {
    pub fn cooldown_for(&self, is_symbol: bool) -> u64 {
        if is_symbol {
            self.symbol_cooldown_ms
        } else {
            self.cooldown_ms
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            min_dwell_ms: 150,
            detect_timeout_ms: 800,
            symbol_cooldown_ms: 300,
            cooldown_ms: 500,
            duplicate_window_ms: 1000,
            stability_lookback_ms: 500,
            summary_interval_ms: 500,
        }
    }
}

pub struct Config<'a> {
    pub sample_rate_hz: u32,
    pub accel_alpha: f32,
    pub derivative_alpha: f32,
    pub thresholds: Thresholds,
    pub gains: ControllerGains,
    pub anomaly: AnomalyConfig,
    pub timing: Timing,
    /// Labels treated as symbol-class gestures, matched ignoring ASCII case
    pub symbol_labels: &'a [&'a str],
}

impl Default for Config<'static> {
    fn default() -> Self {
        Self {
            sample_rate_hz: 100,
            accel_alpha: 0.5,
            derivative_alpha: 0.6,
            thresholds: Thresholds::default(),
            gains: ControllerGains::default(),
            anomaly: AnomalyConfig::default(),
            timing: Timing::default(),
            symbol_labels: &DEFAULT_SYMBOL_LABELS,
        }
    }
}

impl<'a> Config<'a> {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate_hz == 0 {
            return Err(ConfigError::InvalidSampleRate);
        }

        if validate_alpha(self.accel_alpha).is_err() || validate_alpha(self.derivative_alpha).is_err()
        {
            return Err(ConfigError::InvalidSmoothingFactor);
        }

        let threshold_ok = |t: f32| t > 0.0 && t <= 1.0;
        if !threshold_ok(self.thresholds.base) || !threshold_ok(self.thresholds.symbol) {
            return Err(ConfigError::InvalidThreshold);
        }

        let gain_ok = |g: f32| g.is_finite() && g >= 0.0;
        let gains = &self.gains;
        if !gain_ok(gains.proportional) || !gain_ok(gains.integral) || !gain_ok(gains.derivative) {
            return Err(ConfigError::InvalidGains);
        }

        let anomaly = &self.anomaly;
        if !(anomaly.base_threshold > 0.0 && anomaly.base_threshold.is_finite())
            || !(0.0..=1.0).contains(&anomaly.adaptation_rate)
        {
            return Err(ConfigError::InvalidAnomalyConfig);
        }

        if self.timing.detect_timeout_ms <= self.timing.min_dwell_ms {
            return Err(ConfigError::InvalidTiming);
        }

        if self.symbol_labels.is_empty() {
            return Err(ConfigError::EmptySymbolLabels);
        }

        Ok(())
    }

    /// Validate the compile-time buffer sizes of a recognizer.
    pub fn validate_sizes(window_len: usize, history_len: usize) -> Result<(), ConfigError> {
        if window_len == 0 || window_len % 3 != 0 {
            return Err(ConfigError::InvalidWindowSize);
        }
        if history_len == 0 {
            return Err(ConfigError::InvalidHistorySize);
        }
        Ok(())
    }

    /// Whether `label` belongs to the symbol class.
    pub fn is_symbol(&self, label: &str) -> bool {
        self.symbol_labels
            .iter()
            .any(|symbol| symbol.eq_ignore_ascii_case(label))
    }

    /// Minimum spacing between accepted samples.
    pub fn sample_period_ms(&self) -> u64 {
        (1000 / self.sample_rate_hz.max(1)) as u64
    }
}
