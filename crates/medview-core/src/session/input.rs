use tracing::debug;

use crate::annotation::{AnnotationKind, TextPrompt};
use crate::geometry::Point;
use crate::measurement::ClickOutcome;
use crate::tools::Tool;

use super::events::{CursorReadout, InputEvent, Key, Modifiers, PointerButton, ViewerEvent};
use super::ViewerSession;

impl ViewerSession {
    /// Route one input event to panning, the active tool, the viewport or
    /// slice navigation. Never fails; events that mean nothing in the
    /// current state are dropped.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        prompt: &mut dyn TextPrompt,
    ) -> Vec<ViewerEvent> {
        match event {
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Primary,
                ..
            } => self.primary_down(pos, prompt),
            InputEvent::PointerDown {
                button: PointerButton::Secondary,
                ..
            } => self.secondary_down(),
            InputEvent::PointerMove { pos } => self.pointer_move(pos),
            InputEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            } => self.primary_up(),
            InputEvent::PointerUp { .. } => Vec::new(),
            InputEvent::Wheel {
                pos,
                delta,
                modifiers,
            } => self.wheel(pos, delta, modifiers),
            InputEvent::Key { key, modifiers } => self.key(key, modifiers),
        }
    }

    fn primary_down(&mut self, pos: Point, prompt: &mut dyn TextPrompt) -> Vec<ViewerEvent> {
        self.primary_down = true;
        let at = self.to_image(pos);
        match self.tools.active() {
            Tool::None => {
                self.pan_anchor = Some(pos);
                Vec::new()
            }
            Tool::Measure(_) => {
                match self
                    .measurements
                    .click(at, &self.calibration, &mut self.overlays)
                {
                    ClickOutcome::Completed(record) => self.measurement_done(record),
                    ClickOutcome::Pending { points } => {
                        debug!(points, "Measurement point added");
                        Vec::new()
                    }
                    ClickOutcome::Ignored => Vec::new(),
                }
            }
            Tool::Annotate(AnnotationKind::Freehand) => {
                self.annotations.begin_stroke(at, &mut self.overlays);
                Vec::new()
            }
            Tool::Annotate(AnnotationKind::Arrow) => {
                if self.annotations.arrow_click(at, &mut self.overlays) {
                    self.deactivate()
                } else {
                    Vec::new()
                }
            }
            Tool::Annotate(AnnotationKind::Text) => {
                self.annotations.place_text(at, prompt, &mut self.overlays);
                self.deactivate()
            }
        }
    }

    /// Secondary click: completes an area in progress, otherwise cancels the
    /// active tool.
    fn secondary_down(&mut self) -> Vec<ViewerEvent> {
        if self.measurements.is_collecting_area() {
            self.complete_area()
        } else {
            self.deactivate()
        }
    }

    fn pointer_move(&mut self, pos: Point) -> Vec<ViewerEvent> {
        let at = self.to_image(pos);
        let mut events = vec![ViewerEvent::CursorReadout(self.readout(at))];

        if let Some(last) = self.pan_anchor.filter(|_| self.primary_down) {
            self.engine.pan(&mut self.transform, pos - last);
            self.pan_anchor = Some(pos);
            events.push(ViewerEvent::TransformChanged(self.surface_transform()));
        } else if self.primary_down
            && self.tools.active() == Tool::Annotate(AnnotationKind::Freehand)
        {
            self.annotations.extend_stroke(at, &mut self.overlays);
        }
        events
    }

    fn primary_up(&mut self) -> Vec<ViewerEvent> {
        self.primary_down = false;
        if self.pan_anchor.take().is_none()
            && self.tools.active() == Tool::Annotate(AnnotationKind::Freehand)
        {
            self.annotations.finish_stroke();
        }
        Vec::new()
    }

    fn wheel(&mut self, pos: Point, delta: f64, modifiers: Modifiers) -> Vec<ViewerEvent> {
        if modifiers.ctrl {
            let pivot = self.pivot();
            self.engine
                .wheel_zoom(&mut self.transform, pos, pivot, delta);
            return vec![ViewerEvent::TransformChanged(self.surface_transform())];
        }
        if delta > 0.0 {
            self.previous_slice()
        } else if delta < 0.0 {
            self.next_slice()
        } else {
            Vec::new()
        }
    }

    fn key(&mut self, key: Key, modifiers: Modifiers) -> Vec<ViewerEvent> {
        match key {
            Key::Plus if modifiers.ctrl => self.transformed(|e, s| e.zoom_in(s)),
            Key::Minus if modifiers.ctrl => self.transformed(|e, s| e.zoom_out(s)),
            Key::R if modifiers.ctrl => self.transformed(|e, s| e.reset(s)),
            Key::Up => self.previous_slice(),
            Key::Down => self.next_slice(),
            Key::Escape => self.deactivate(),
            Key::Space => self.complete_area(),
            _ => Vec::new(),
        }
    }

    fn readout(&self, at: Point) -> CursorReadout {
        let intensity = if self.config.show_intensity {
            self.samples.as_ref().map(|grid| grid.sample(at))
        } else {
            None
        };
        CursorReadout {
            position: at,
            intensity,
        }
    }
}
