use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::DEFAULT_PIXEL_SPACING_MM;
use crate::geometry::Point;

/// Physical size of one pixel, in millimeters, along each image axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub spacing_x: f64,
    pub spacing_y: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            spacing_x: DEFAULT_PIXEL_SPACING_MM,
            spacing_y: DEFAULT_PIXEL_SPACING_MM,
        }
    }
}

impl Calibration {
    /// Build a calibration from explicit spacings, falling back to 1 mm/px
    /// unless both values are positive and finite.
    pub fn new(spacing_x: f64, spacing_y: f64) -> Self {
        if is_valid_spacing(spacing_x) && is_valid_spacing(spacing_y) {
            Self {
                spacing_x,
                spacing_y,
            }
        } else {
            debug!(spacing_x, spacing_y, "Invalid pixel spacing, using default");
            Self::default()
        }
    }

    /// Calibration from a list of spacing values; the first two are used.
    pub fn from_values(values: &[f64]) -> Self {
        match values {
            [x, y, ..] => Self::new(*x, *y),
            _ => {
                debug!(count = values.len(), "Pixel spacing missing, using default");
                Self::default()
            }
        }
    }

    /// Parse a decimal-string multi-value such as `"0.703125\\0.703125"`.
    /// Whitespace and commas are accepted as separators too. Never fails.
    pub fn parse(raw: &str) -> Self {
        let parsed: Option<Vec<f64>> = raw
            .split(['\\', ',', ' '])
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().parse::<f64>().ok())
            .collect();
        match parsed {
            Some(values) => Self::from_values(&values),
            None => {
                debug!(raw, "Malformed pixel spacing, using default");
                Self::default()
            }
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Offset between two pixel positions, scaled into millimeters.
    pub fn to_mm(&self, delta: Point) -> Point {
        Point::new(delta.x * self.spacing_x, delta.y * self.spacing_y)
    }

    /// Area of one pixel in mm².
    pub fn pixel_area(&self) -> f64 {
        self.spacing_x * self.spacing_y
    }
}

fn is_valid_spacing(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backslash_separated_pair() {
        let c = Calibration::parse("0.5\\0.25");
        assert_eq!(c, Calibration::new(0.5, 0.25));
    }

    #[test]
    fn malformed_falls_back() {
        assert!(Calibration::parse("abc\\0.5").is_default());
        assert!(Calibration::parse("0.5").is_default());
        assert!(Calibration::parse("").is_default());
        assert!(Calibration::parse("-1\\0.5").is_default());
    }

    #[test]
    fn extra_values_are_ignored() {
        assert_eq!(
            Calibration::from_values(&[0.7, 0.8, 3.0]),
            Calibration::new(0.7, 0.8)
        );
    }
}
