#![allow(dead_code)]

use medview_core::annotation::TextPrompt;
use medview_core::calibration::Calibration;
use medview_core::geometry::Point;
use medview_core::intensity::{Modality, Rescale, SampleGrid};
use medview_core::session::{
    DecodedSlice, InputEvent, Modifiers, PointerButton, ViewerEvent, ViewerSession,
};

/// Prompt that hands out queued answers in order.
pub struct ScriptedText(pub Vec<String>);

impl TextPrompt for ScriptedText {
    fn request_text(&mut self, _at: Point) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.remove(0))
        }
    }
}

/// A CT grid whose raw value at (x, y) is `y * width + x`.
pub fn ramp_grid(width: usize, height: usize, rescale: Rescale) -> SampleGrid {
    let pixels = (0..width * height).map(|v| v as i16).collect();
    SampleGrid::new(width, height, pixels, Modality::Ct, rescale).unwrap()
}

/// Session with a series of `slices` slices and a decoded 100x100 slice.
pub fn session_with_slice(slices: usize, calibration: Calibration) -> ViewerSession {
    let mut session = ViewerSession::default();
    session.load_series(slices);
    session.slice_decoded(DecodedSlice {
        calibration,
        samples: Some(ramp_grid(100, 100, Rescale::default())),
        ..DecodedSlice::bare(100, 100)
    });
    session
}

pub fn press(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerDown {
        pos: Point::new(x, y),
        button: PointerButton::Primary,
        modifiers: Modifiers::NONE,
    }
}

pub fn release(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerUp {
        pos: Point::new(x, y),
        button: PointerButton::Primary,
    }
}

pub fn secondary(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerDown {
        pos: Point::new(x, y),
        button: PointerButton::Secondary,
        modifiers: Modifiers::NONE,
    }
}

pub fn move_to(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerMove {
        pos: Point::new(x, y),
    }
}

/// Primary click (press then release) at each point, collecting events.
pub fn click_all(
    session: &mut ViewerSession,
    prompt: &mut dyn TextPrompt,
    points: &[(f64, f64)],
) -> Vec<ViewerEvent> {
    let mut events = Vec::new();
    for &(x, y) in points {
        events.extend(session.handle_event(press(x, y), prompt));
        events.extend(session.handle_event(release(x, y), prompt));
    }
    events
}

pub fn statuses(events: &[ViewerEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            ViewerEvent::StatusChanged(s) => Some(s.clone()),
            _ => None,
        })
        .collect()
}

pub fn slice_changes(events: &[ViewerEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|e| match e {
            ViewerEvent::SliceChanged { index, .. } => Some(*index),
            _ => None,
        })
        .collect()
}
