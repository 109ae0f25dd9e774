//! Calibrated distance, angle and area measurements.

pub mod calc;
mod collector;
mod record;

pub use collector::{ClickOutcome, MeasurementCollector};
pub use record::{MeasurementKind, MeasurementRecord, Unit};
