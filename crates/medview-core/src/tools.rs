//! Mutually exclusive interaction tools.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::annotation::AnnotationKind;
use crate::measurement::MeasurementKind;

/// The interaction tool. `None` means free panning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Tool {
    #[default]
    None,
    Measure(MeasurementKind),
    Annotate(AnnotationKind),
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::None,
        Tool::Measure(MeasurementKind::Distance),
        Tool::Measure(MeasurementKind::Angle),
        Tool::Measure(MeasurementKind::Area),
        Tool::Annotate(AnnotationKind::Freehand),
        Tool::Annotate(AnnotationKind::Arrow),
        Tool::Annotate(AnnotationKind::Text),
    ];

    pub fn measurement(&self) -> Option<MeasurementKind> {
        match self {
            Tool::Measure(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn annotation(&self) -> Option<AnnotationKind> {
        match self {
            Tool::Annotate(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Tools that switch back to `None` once they have produced a result.
    /// Freehand keeps drawing stroke after stroke.
    pub fn is_single_shot(&self) -> bool {
        !matches!(self, Tool::None | Tool::Annotate(AnnotationKind::Freehand))
    }

    /// Operator hint shown while the tool is active.
    pub fn hint(&self) -> &'static str {
        match self {
            Tool::None => "Active Tool: None",
            Tool::Measure(MeasurementKind::Distance) => "Active Tool: Distance (Click 2 points)",
            Tool::Measure(MeasurementKind::Angle) => "Active Tool: Angle (Click 3 points)",
            Tool::Measure(MeasurementKind::Area) => {
                "Active Tool: Area/ROI (Click points, right-click to finish)"
            }
            Tool::Annotate(AnnotationKind::Freehand) => "Active Tool: Freehand (Click and drag)",
            Tool::Annotate(AnnotationKind::Arrow) => "Active Tool: Arrow (Click 2 points)",
            Tool::Annotate(AnnotationKind::Text) => "Active Tool: Text (Click to place)",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::None => f.pad("None"),
            Tool::Measure(kind) => fmt::Display::fmt(kind, f),
            Tool::Annotate(kind) => fmt::Display::fmt(kind, f),
        }
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Tool::ALL
            .into_iter()
            .find(|t| t.to_string().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown tool: {wanted}"))
    }
}

impl TryFrom<String> for Tool {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Holder of the single active tool.
///
/// Switching is a two-step affair driven by the session: the previous tool is
/// fully deactivated (its accumulators cleared) before the next one is set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToolState {
    active: Tool,
}

impl ToolState {
    pub fn active(&self) -> Tool {
        self.active
    }

    /// Free panning is only allowed with no tool selected.
    pub fn allows_panning(&self) -> bool {
        self.active == Tool::None
    }

    /// Replace the active tool, returning the one it replaced.
    pub(crate) fn set(&mut self, tool: Tool) -> Tool {
        std::mem::replace(&mut self.active, tool)
    }
}
