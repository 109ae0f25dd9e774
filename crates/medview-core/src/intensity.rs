//! Calibrated intensity (Hounsfield-style) sampling under the cursor.

use std::fmt;

use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use crate::consts::CT_MODALITY;
use crate::error::{MedviewError, Result};
use crate::geometry::Point;

/// Acquisition modality of a slice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modality {
    Ct,
    Other(String),
}

impl Modality {
    /// Parse a modality code such as `CT` or `MR`.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        if code == CT_MODALITY {
            Modality::Ct
        } else {
            Modality::Other(code.to_string())
        }
    }

    /// Whether raw samples map linearly to a calibrated density.
    pub fn is_quantitative(&self) -> bool {
        matches!(self, Modality::Ct)
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Ct => f.write_str(CT_MODALITY),
            Modality::Other(code) => f.write_str(code),
        }
    }
}

/// Per-slice linear rescale from raw sample to calibrated value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rescale {
    pub slope: f64,
    pub intercept: f64,
}

impl Default for Rescale {
    fn default() -> Self {
        Self {
            slope: 1.0,
            intercept: 0.0,
        }
    }
}

impl Rescale {
    pub fn apply(&self, raw: f64) -> f64 {
        raw * self.slope + self.intercept
    }
}

/// Outcome of sampling one position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IntensityReading {
    /// Calibrated value, unrounded.
    Value(f64),
    /// The modality has no calibrated intensity scale.
    NotApplicable,
    /// No sample at that position (outside the image or past the buffer).
    Unavailable,
}

impl IntensityReading {
    /// Value rounded half away from zero, as displayed.
    pub fn rounded(&self) -> Option<i64> {
        match self {
            IntensityReading::Value(v) => Some(v.round() as i64),
            _ => None,
        }
    }
}

impl fmt::Display for IntensityReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntensityReading::Value(v) => write!(f, "HU: {}", v.round() as i64),
            IntensityReading::NotApplicable => write!(f, "HU: N/A (Not CT)"),
            IntensityReading::Unavailable => write!(f, "HU: -"),
        }
    }
}

/// Sample the raw buffer at `at` (image pixel coordinates) and rescale it.
///
/// Coordinates are truncated toward zero. Never fails: non-quantitative
/// modalities, positions outside `[0, width) x [0, height)` and indices past
/// the end of `pixels` all yield a sentinel reading.
pub fn sample<T>(
    pixels: &[T],
    width: usize,
    height: usize,
    modality: &Modality,
    rescale: Rescale,
    at: Point,
) -> IntensityReading
where
    T: AsPrimitive<f64>,
{
    if !modality.is_quantitative() {
        return IntensityReading::NotApplicable;
    }
    if !(at.x.is_finite() && at.y.is_finite()) {
        return IntensityReading::Unavailable;
    }
    let (x, y) = (at.x.trunc(), at.y.trunc());
    if x < 0.0 || y < 0.0 || x >= width as f64 || y >= height as f64 {
        return IntensityReading::Unavailable;
    }
    let index = y as usize * width + x as usize;
    match pixels.get(index) {
        Some(raw) => IntensityReading::Value(rescale.apply((*raw).as_())),
        None => IntensityReading::Unavailable,
    }
}

/// Raw samples of the current slice together with what is needed to
/// calibrate them. Replaced wholesale on every slice change.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    width: usize,
    height: usize,
    pixels: Vec<i16>,
    pub modality: Modality,
    pub rescale: Rescale,
}

impl SampleGrid {
    pub fn new(
        width: usize,
        height: usize,
        pixels: Vec<i16>,
        modality: Modality,
        rescale: Rescale,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MedviewError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
            modality,
            rescale,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[i16] {
        &self.pixels
    }

    pub fn sample(&self, at: Point) -> IntensityReading {
        sample(
            &self.pixels,
            self.width,
            self.height,
            &self.modality,
            self.rescale,
            at,
        )
    }
}
