//! Signal filtering for pupil motion.
//!
//! Raw face positions are noisy and may sit anywhere in the frame. The
//! [`MotionFilter`] first clamps them into the band where pupils still look
//! natural inside the eye whites, then smooths them with a first-order
//! exponential filter so the pupils glide instead of jumping.

/// Range clamp keeping positions inside the visible band
pub mod clamp;

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::{
    config::FilterConfig,
    position::NormalizedPosition,
    Result,
};
use clamp::ClampBand;
use exponential::ExponentialFilter;

/// Trait for all position filters
pub trait PositionFilter: Send + Sync {
    /// Apply filter to input values
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64);

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// Clamp followed by exponential smoothing.
///
/// Owned by the render loop and stepped exactly once per tick.
#[derive(Debug, Clone)]
pub struct MotionFilter {
    band: ClampBand,
    smoother: ExponentialFilter,
}

impl MotionFilter {
    /// Create a filter starting at the frame center.
    pub fn new(band: ClampBand, alpha: f64) -> Self {
        Self {
            band,
            smoother: ExponentialFilter::new(alpha),
        }
    }

    /// Build the filter from configuration, rejecting out-of-range values
    /// instead of panicking.
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        exponential::validate_alpha(config.smoothing)?;
        let band = ClampBand::try_new(config.x_band, config.y_band)?;
        Ok(Self::new(band, config.smoothing))
    }

    /// Advance one tick toward `raw` and return the smoothed position.
    pub fn step(&mut self, raw: NormalizedPosition) -> NormalizedPosition {
        let (x, y) = self.apply(raw.x, raw.y);
        NormalizedPosition { x, y }
    }

    /// Current smoothed position without advancing.
    #[must_use]
    pub fn state(&self) -> NormalizedPosition {
        let (x, y) = self.smoother.state();
        NormalizedPosition { x, y }
    }
}

impl PositionFilter for MotionFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        let (x, y) = self.band.apply(x, y);
        self.smoother.apply(x, y)
    }

    fn reset(&mut self) {
        self.smoother.reset();
    }

    fn name(&self) -> &str {
        "MotionFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_SMOOTHING, DEFAULT_X_BAND, DEFAULT_Y_BAND};
    use crate::Error;

    fn default_filter() -> MotionFilter {
        MotionFilter::new(ClampBand::new(DEFAULT_X_BAND, DEFAULT_Y_BAND), DEFAULT_SMOOTHING)
    }

    #[test]
    fn test_starts_at_center() {
        let filter = default_filter();
        assert_eq!(filter.state(), NormalizedPosition::CENTER);
    }

    #[test]
    fn test_clamps_before_smoothing() {
        let mut filter = default_filter();
        // Raw 1.0 is clamped to 0.85 first: 0.5 + (0.85 - 0.5) * 0.18
        let p = filter.step(NormalizedPosition::new(1.0, 0.0));
        assert!((p.x - 0.563).abs() < 1e-12);
        // 0.5 + (0.20 - 0.5) * 0.18
        assert!((p.y - 0.446).abs() < 1e-12);
    }

    #[test]
    fn test_reset_returns_to_center() {
        let mut filter = default_filter();
        for _ in 0..20 {
            filter.step(NormalizedPosition::new(0.9, 0.9));
        }
        filter.reset();
        assert_eq!(filter.state(), NormalizedPosition::CENTER);
    }

    #[test]
    fn test_from_config_rejects_bad_smoothing() {
        let config = FilterConfig {
            smoothing: 0.0,
            ..FilterConfig::default()
        };
        assert!(matches!(MotionFilter::from_config(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_from_config_rejects_inverted_band() {
        let config = FilterConfig {
            x_band: (0.9, 0.1),
            ..FilterConfig::default()
        };
        assert!(MotionFilter::from_config(&config).is_err());
    }
}
