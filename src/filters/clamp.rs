use super::PositionFilter;
use crate::{Error, Result};

/// Axis-aligned band that positions are clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampBand {
    x: (f64, f64),
    y: (f64, f64),
}

impl ClampBand {
    /// Create a band from `(min, max)` pairs for each axis.
    ///
    /// # Panics
    ///
    /// Panics if a band is not ordered within `[0, 1]`.
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        match Self::try_new(x, y) {
            Ok(band) => band,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible constructor used when the bands come from configuration.
    pub fn try_new(x: (f64, f64), y: (f64, f64)) -> Result<Self> {
        for (axis, (lo, hi)) in [("x", x), ("y", y)] {
            if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
                return Err(Error::Config(format!(
                    "Clamp band for {axis} must satisfy 0 <= min <= max <= 1, got ({lo}, {hi})"
                )));
            }
        }
        Ok(Self { x, y })
    }
}

impl PositionFilter for ClampBand {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        (x.clamp(self.x.0, self.x.1), y.clamp(self.y.0, self.y.1))
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "ClampBand"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_X_BAND, DEFAULT_Y_BAND};
    use proptest::prelude::*;

    #[test]
    fn test_inside_band_passes_through() {
        let mut band = ClampBand::new(DEFAULT_X_BAND, DEFAULT_Y_BAND);
        assert_eq!(band.apply(0.4, 0.6), (0.4, 0.6));
    }

    #[test]
    fn test_edges_are_clamped() {
        let mut band = ClampBand::new(DEFAULT_X_BAND, DEFAULT_Y_BAND);
        assert_eq!(band.apply(0.0, 0.0), (0.15, 0.20));
        assert_eq!(band.apply(1.0, 1.0), (0.85, 0.80));
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(ClampBand::try_new((-0.1, 0.5), DEFAULT_Y_BAND).is_err());
        assert!(ClampBand::try_new(DEFAULT_X_BAND, (0.5, 1.5)).is_err());
        assert!(ClampBand::try_new((0.6, 0.4), DEFAULT_Y_BAND).is_err());
    }

    proptest! {
        #[test]
        fn prop_output_always_inside_band(x in 0.0f64..=1.0, y in 0.0f64..=1.0) {
            let mut band = ClampBand::new(DEFAULT_X_BAND, DEFAULT_Y_BAND);
            let (cx, cy) = band.apply(x, y);
            prop_assert!((0.15..=0.85).contains(&cx));
            prop_assert!((0.20..=0.80).contains(&cy));
        }
    }
}
