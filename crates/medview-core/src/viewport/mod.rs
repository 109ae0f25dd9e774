//! Viewport transform: zoom, rotation, mirroring and panning of the image
//! surface, composed into a single affine transform about a pivot.

mod engine;
mod state;

pub use engine::{compose, ViewportEngine};
pub use state::TransformState;
