//! Overlay primitives drawn over the slice and the registry that owns them.

mod primitive;
mod registry;

pub use primitive::{Color, Primitive, Stroke, TextStyle};
pub use registry::{OverlayGroup, OverlayHandle, OverlayRegistry};
