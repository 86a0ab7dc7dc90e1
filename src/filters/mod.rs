/// Signal conditioning for raw acceleration
///
/// Each axis owns its own filter state. Nothing here is shared between axes
/// or between the acceleration and derivative paths.
mod bank;
mod low_pass;

pub use bank::{FilterBank, FilteredSample};
pub use low_pass::LowPassFilter;

/// Validate a smoothing factor: 0.0 < alpha <= 1.0
pub const fn validate_alpha(alpha: f32) -> Result<(), &'static str> {
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(())
    } else {
        Err("smoothing factor must be in range (0.0, 1.0]")
    }
}
