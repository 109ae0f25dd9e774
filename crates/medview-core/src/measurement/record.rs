use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementKind {
    Distance,
    Angle,
    Area,
}

impl MeasurementKind {
    pub fn unit(&self) -> Unit {
        match self {
            Self::Distance => Unit::Millimeters,
            Self::Angle => Unit::Degrees,
            Self::Area => Unit::SquareMillimeters,
        }
    }

    /// Number of clicks that completes the measurement, `None` when
    /// completion is explicit.
    pub fn required_points(&self) -> Option<usize> {
        match self {
            Self::Distance => Some(2),
            Self::Angle => Some(3),
            Self::Area => None,
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Distance => "Distance",
            Self::Angle => "Angle",
            Self::Area => "Area",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "degrees")]
    Degrees,
    #[serde(rename = "mm²")]
    SquareMillimeters,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Degrees => "degrees",
            Self::SquareMillimeters => "mm²",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One completed measurement. Records are never edited after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    #[serde(rename = "Type")]
    pub kind: MeasurementKind,
    #[serde(rename = "Value")]
    pub value: f64,
    #[serde(rename = "Unit")]
    pub unit: Unit,
}

impl MeasurementRecord {
    pub fn new(kind: MeasurementKind, value: f64) -> Self {
        Self {
            kind,
            value,
            unit: kind.unit(),
        }
    }

    /// Short on-image label, e.g. `12.34 mm` or `45.0°`.
    pub fn label_text(&self) -> String {
        match self.kind {
            MeasurementKind::Distance => format!("{:.2} mm", self.value),
            MeasurementKind::Angle => format!("{:.1}°", self.value),
            MeasurementKind::Area => format!("{:.2} mm²", self.value),
        }
    }

    /// Status line shown after completion, e.g. `Distance: 12.34 mm`.
    pub fn status_text(&self) -> String {
        format!("{}: {}", self.kind, self.label_text())
    }

    /// Line of the plain-text report, e.g. `- Angle: 45.00 degrees`.
    pub fn report_line(&self) -> String {
        format!("- {}: {:.2} {}", self.kind, self.value, self.unit)
    }
}
