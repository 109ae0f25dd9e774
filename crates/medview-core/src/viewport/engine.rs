use tracing::debug;

use crate::config::ViewerConfig;
use crate::consts::{FIT_MARGIN, ROTATION_STEP_DEG, WHEEL_ZOOM_STEP, ZOOM_STEP};
use crate::geometry::{Affine2, Point};

use super::state::TransformState;

/// Compose scale-and-flip, then rotation (both about `pivot`), then the pan
/// translation. The order is fixed.
pub fn compose(state: &TransformState, pivot: Point) -> Affine2 {
    let (sx, sy) = state.signed_scale();
    Affine2::scale_about(sx, sy, pivot)
        .then(&Affine2::rotate_about(state.rotation_deg, pivot))
        .then(&Affine2::translation(state.pan_offset.x, state.pan_offset.y))
}

/// Stateless operations on a [`TransformState`], parameterised by the
/// configured zoom steps and fit margin.
#[derive(Clone, Debug)]
pub struct ViewportEngine {
    pub zoom_step: f64,
    pub wheel_zoom_step: f64,
    pub fit_margin: f64,
}

impl Default for ViewportEngine {
    fn default() -> Self {
        Self {
            zoom_step: ZOOM_STEP,
            wheel_zoom_step: WHEEL_ZOOM_STEP,
            fit_margin: FIT_MARGIN,
        }
    }
}

impl ViewportEngine {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            zoom_step: config.zoom_step,
            wheel_zoom_step: config.wheel_zoom_step,
            fit_margin: config.fit_margin,
        }
    }

    pub fn zoom_in(&self, state: &mut TransformState) {
        scale_by(state, self.zoom_step);
    }

    pub fn zoom_out(&self, state: &mut TransformState) {
        scale_by(state, 1.0 / self.zoom_step);
    }

    /// One wheel notch of zoom anchored at `cursor`. Positive `delta` zooms in.
    pub fn wheel_zoom(&self, state: &mut TransformState, cursor: Point, pivot: Point, delta: f64) {
        let factor = if delta > 0.0 {
            self.wheel_zoom_step
        } else {
            1.0 / self.wheel_zoom_step
        };
        self.zoom_at_cursor(state, cursor, pivot, factor);
    }

    /// Multiply the scale by `factor` while keeping the image point under
    /// `cursor` fixed on screen.
    ///
    /// The anchor is measured from `pivot`, the same point the scale and
    /// rotation are composed about, so the per-axis update
    /// `pan' = anchor - (anchor - pan) * (scale' / scale)` keeps the
    /// composed transform pinned at the cursor for any rotation or flip.
    pub fn zoom_at_cursor(
        &self,
        state: &mut TransformState,
        cursor: Point,
        pivot: Point,
        factor: f64,
    ) {
        let old_scale = state.scale;
        if !scale_by(state, factor) {
            return;
        }
        let ratio = state.scale / old_scale;
        let anchor = cursor - pivot;
        state.pan_offset = Point::new(
            anchor.x - (anchor.x - state.pan_offset.x) * ratio,
            anchor.y - (anchor.y - state.pan_offset.y) * ratio,
        );
    }

    pub fn rotate_left(&self, state: &mut TransformState) {
        state.rotation_deg = normalize_degrees(state.rotation_deg + ROTATION_STEP_DEG);
    }

    pub fn rotate_right(&self, state: &mut TransformState) {
        state.rotation_deg = normalize_degrees(state.rotation_deg - ROTATION_STEP_DEG);
    }

    pub fn flip_horizontal(&self, state: &mut TransformState) {
        state.flip_h = !state.flip_h;
    }

    pub fn flip_vertical(&self, state: &mut TransformState) {
        state.flip_v = !state.flip_v;
    }

    pub fn reset(&self, state: &mut TransformState) {
        *state = TransformState::default();
    }

    /// Actual-size view: unit scale, no pan. Rotation and mirroring are kept.
    pub fn zoom_actual_size(&self, state: &mut TransformState) {
        state.scale = 1.0;
        state.pan_offset = Point::ZERO;
    }

    /// Scale the content to fill the view with a margin and re-center it.
    /// Degenerate sizes leave the state untouched.
    pub fn fit_to_view(
        &self,
        state: &mut TransformState,
        view_w: f64,
        view_h: f64,
        content_w: f64,
        content_h: f64,
    ) {
        if content_w == 0.0 || content_h == 0.0 {
            debug!(content_w, content_h, "Fit skipped: empty content");
            return;
        }
        let scale = (view_w / content_w).min(view_h / content_h) * self.fit_margin;
        if !(scale.is_finite() && scale > 0.0) {
            debug!(view_w, view_h, "Fit skipped: degenerate view");
            return;
        }
        state.scale = scale;
        state.pan_offset = Point::ZERO;
    }

    pub fn pan(&self, state: &mut TransformState, delta: Point) {
        state.pan_offset = state.pan_offset + delta;
    }
}

/// Apply a positive finite zoom factor. Returns false when rejected.
fn scale_by(state: &mut TransformState, factor: f64) -> bool {
    let next = state.scale * factor;
    if !(factor.is_finite() && factor > 0.0 && next.is_finite() && next > 0.0) {
        debug!(factor, "Zoom factor rejected");
        return false;
    }
    state.scale = next;
    true
}

fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}
