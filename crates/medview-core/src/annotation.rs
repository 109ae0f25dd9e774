//! Free-form, uncalibrated annotations: freehand strokes, arrows and text.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{ARROW_HEAD_ANGLE, ARROW_HEAD_LENGTH};
use crate::geometry::Point;
use crate::overlay::{OverlayGroup, OverlayHandle, OverlayRegistry, Primitive};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationKind {
    Freehand,
    Arrow,
    Text,
}

impl std::fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Freehand => "Freehand",
            Self::Arrow => "Arrow",
            Self::Text => "Text",
        })
    }
}

/// Supplies free text for the text tool. Returning `None` (or an empty
/// string) places nothing.
pub trait TextPrompt {
    fn request_text(&mut self, at: Point) -> Option<String>;
}

/// Prompt that never yields text.
pub struct NoText;

impl TextPrompt for NoText {
    fn request_text(&mut self, _at: Point) -> Option<String> {
        None
    }
}

/// The two far corners of an arrowhead ending at `end`, each
/// [`ARROW_HEAD_LENGTH`] back from the tip and 30° off the shaft.
pub fn arrow_head(start: Point, end: Point) -> [Point; 3] {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    let corner = |theta: f64| {
        Point::new(
            end.x - ARROW_HEAD_LENGTH * theta.cos(),
            end.y - ARROW_HEAD_LENGTH * theta.sin(),
        )
    };
    [
        end,
        corner(angle - ARROW_HEAD_ANGLE),
        corner(angle + ARROW_HEAD_ANGLE),
    ]
}

/// In-progress state of the annotation tools.
#[derive(Debug, Default)]
pub struct AnnotationCapture {
    stroke: Option<OverlayHandle>,
    arrow_start: Option<Point>,
}

impl AnnotationCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_stroke(&self) -> Option<OverlayHandle> {
        self.stroke
    }

    pub fn arrow_start(&self) -> Option<Point> {
        self.arrow_start
    }

    /// Start a stroke at `at` unless one is already being drawn.
    pub fn begin_stroke(&mut self, at: Point, overlays: &mut OverlayRegistry) -> bool {
        if self.stroke.is_some() {
            return false;
        }
        let handle = overlays.insert(OverlayGroup::Annotation, Primitive::freehand_stroke(at));
        self.stroke = Some(handle);
        true
    }

    /// Append a point to the active stroke.
    pub fn extend_stroke(&mut self, at: Point, overlays: &mut OverlayRegistry) -> bool {
        self.stroke
            .and_then(|h| overlays.get_mut(h))
            .is_some_and(|p| p.push_point(at))
    }

    /// Keep the stroke as a permanent overlay and forget the handle.
    pub fn finish_stroke(&mut self) -> bool {
        self.stroke.take().is_some()
    }

    /// Record the arrow start, or draw the arrow on the second click.
    /// Returns true once the arrow is complete.
    pub fn arrow_click(&mut self, at: Point, overlays: &mut OverlayRegistry) -> bool {
        let Some(start) = self.arrow_start.take() else {
            self.arrow_start = Some(at);
            return false;
        };
        overlays.insert(OverlayGroup::Annotation, Primitive::arrow_shaft(start, at));
        overlays.insert(
            OverlayGroup::Annotation,
            Primitive::arrow_head(arrow_head(start, at)),
        );
        debug!(?start, end = ?at, "Arrow placed");
        true
    }

    /// Ask `prompt` for text and anchor it at `at`. Returns true if a label
    /// was placed.
    pub fn place_text(
        &mut self,
        at: Point,
        prompt: &mut dyn TextPrompt,
        overlays: &mut OverlayRegistry,
    ) -> bool {
        match prompt.request_text(at) {
            Some(text) if !text.is_empty() => {
                overlays.insert(OverlayGroup::Annotation, Primitive::annotation_text(at, text));
                true
            }
            _ => false,
        }
    }

    /// Leave annotation mode: an open stroke is kept, a half-built arrow is dropped.
    pub fn cancel(&mut self) {
        self.finish_stroke();
        self.arrow_start = None;
    }

    pub fn clear_all(&mut self, overlays: &mut OverlayRegistry) {
        overlays.clear_group(OverlayGroup::Annotation);
        self.stroke = None;
        self.arrow_start = None;
    }
}
