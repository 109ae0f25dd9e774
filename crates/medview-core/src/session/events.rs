use std::fmt;

use serde::Deserialize;

use crate::config::WindowLevel;
use crate::geometry::{Affine2, Point};
use crate::intensity::IntensityReading;
use crate::measurement::MeasurementRecord;
use crate::tools::Tool;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
    };
}

/// Keys with a meaning to the viewer. Everything else is never delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Plus,
    Minus,
    R,
    Up,
    Down,
    Escape,
    Space,
}

/// Raw input from the host surface. Positions are surface (screen)
/// coordinates.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        pos: Point,
        #[serde(default)]
        button: PointerButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        pos: Point,
    },
    PointerUp {
        pos: Point,
        #[serde(default)]
        button: PointerButton,
    },
    Wheel {
        pos: Point,
        delta: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Key {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

/// Discrete actions normally bound to toolbar buttons.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewerCommand {
    Activate { tool: Tool },
    Deactivate,
    ZoomIn,
    ZoomOut,
    ZoomActualSize,
    FitToView,
    RotateLeft,
    RotateRight,
    FlipHorizontal,
    FlipVertical,
    ResetTransform,
    CompleteArea,
    ClearMeasurements,
    ClearAnnotations,
    PlayCine,
    StopCine,
    SelectSlice { index: usize },
    NextSlice,
    PreviousSlice,
    SetWindowLevel { width: f64, center: f64 },
    ApplyPreset { name: String },
}

/// Notifications for the host, in the order they happened.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerEvent {
    StatusChanged(String),
    ToolChanged { tool: Tool, hint: &'static str },
    MeasurementCompleted(MeasurementRecord),
    /// The current slice moved; the host should decode `index`.
    SliceChanged { index: usize, total: usize },
    WindowLevelChanged(WindowLevel),
    TransformChanged(Affine2),
    CursorReadout(CursorReadout),
}

/// Image-space position under the pointer and, when enabled and a slice is
/// loaded, the intensity found there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorReadout {
    pub position: Point,
    pub intensity: Option<IntensityReading>,
}

impl CursorReadout {
    pub fn position_text(&self) -> String {
        format!(
            "Position: ({}, {})",
            self.position.x.trunc() as i64,
            self.position.y.trunc() as i64
        )
    }
}

impl fmt::Display for CursorReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.position_text())?;
        if let Some(reading) = self.intensity {
            write!(f, "  {reading}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ViewerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerEvent::StatusChanged(text) => f.write_str(text),
            ViewerEvent::ToolChanged { hint, .. } => f.write_str(hint),
            ViewerEvent::MeasurementCompleted(record) => f.write_str(&record.status_text()),
            ViewerEvent::SliceChanged { index, total } => write!(f, "Slice {}/{}", index + 1, total),
            ViewerEvent::WindowLevelChanged(window) => write!(f, "{window}"),
            ViewerEvent::TransformChanged(m) => write!(
                f,
                "Transform [{:.3} {:.3} {:.3} {:.3} {:.1} {:.1}]",
                m.m11, m.m12, m.m21, m.m22, m.dx, m.dy
            ),
            ViewerEvent::CursorReadout(readout) => write!(f, "{readout}"),
        }
    }
}
