use super::PositionFilter;
use crate::constants::CENTER;
use crate::{Error, Result};

/// Reject smoothing coefficients outside `(0, 1]`.
pub fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(())
    } else {
        Err(Error::Config(format!("Smoothing must be in (0, 1], got {alpha}")))
    }
}

/// Exponential smoothing filter
///
/// `s <- s + (v - s) * alpha`, starting from a fixed initial state rather
/// than the first sample.
#[derive(Debug, Clone)]
pub struct ExponentialFilter {
    alpha: f64,
    initial: (f64, f64),
    last_x: f64,
    last_y: f64,
}

impl ExponentialFilter {
    /// Create a filter starting at the center `(0.5, 0.5)`.
    pub fn new(alpha: f64) -> Self {
        Self::with_initial(alpha, (CENTER, CENTER))
    }

    pub fn with_initial(alpha: f64, initial: (f64, f64)) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self {
            alpha,
            initial,
            last_x: initial.0,
            last_y: initial.1,
        }
    }

    #[must_use]
    pub fn state(&self) -> (f64, f64) {
        (self.last_x, self.last_y)
    }
}

impl PositionFilter for ExponentialFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        self.last_x += (x - self.last_x) * self.alpha;
        self.last_y += (y - self.last_y) * self.alpha;
        (self.last_x, self.last_y)
    }

    fn reset(&mut self) {
        self.last_x = self.initial.0;
        self.last_y = self.initial.1;
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_filter() {
        let mut filter = ExponentialFilter::with_initial(0.5, (10.0, 20.0));

        let (x, y) = filter.apply(20.0, 30.0);
        assert_eq!(x, 15.0); // 10 + (20 - 10) * 0.5
        assert_eq!(y, 25.0);
    }

    #[test]
    fn test_first_sample_is_smoothed_from_center() {
        let mut filter = ExponentialFilter::new(0.18);
        let (x, _) = filter.apply(1.0, 0.5);
        assert!((x - 0.59).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_bounds() {
        // High alpha = less smoothing
        let mut filter1 = ExponentialFilter::with_initial(0.9, (10.0, 20.0));
        let (x, _y) = filter1.apply(20.0, 30.0);
        assert!((x - 19.0).abs() < 0.001);

        // Low alpha = more smoothing
        let mut filter2 = ExponentialFilter::with_initial(0.1, (10.0, 20.0));
        let (x, _y) = filter2.apply(20.0, 30.0);
        assert!((x - 11.0).abs() < 0.001);
    }

    #[test]
    fn test_alpha_one_tracks_input() {
        let mut filter = ExponentialFilter::new(1.0);
        assert_eq!(filter.apply(0.8, 0.3), (0.8, 0.3));
    }

    #[test]
    #[should_panic(expected = "Alpha must be in (0, 1]")]
    fn test_zero_alpha_panics() {
        let _ = ExponentialFilter::new(0.0);
    }
}
