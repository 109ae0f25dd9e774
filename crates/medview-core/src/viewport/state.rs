use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Zoom, rotation, mirroring and pan of the displayed slice.
///
/// Mutated only through [`super::ViewportEngine`]; a fresh value is the
/// identity transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// Magnification, always > 0.
    pub scale: f64,
    /// Clockwise rotation in degrees, kept in `[0, 360)`.
    pub rotation_deg: f64,
    pub flip_h: bool,
    pub flip_v: bool,
    /// Translation applied after scale and rotation, in surface pixels.
    pub pan_offset: Point,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation_deg: 0.0,
            flip_h: false,
            flip_v: false,
            pan_offset: Point::ZERO,
        }
    }
}

impl TransformState {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Horizontal and vertical scale factors including mirroring.
    pub fn signed_scale(&self) -> (f64, f64) {
        let sx = if self.flip_h { -self.scale } else { self.scale };
        let sy = if self.flip_v { -self.scale } else { self.scale };
        (sx, sy)
    }
}
