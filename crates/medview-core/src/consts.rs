use std::f64::consts::PI;

/// Multiplier applied by the zoom in/out buttons and keyboard shortcuts.
pub const ZOOM_STEP: f64 = 1.2;

/// Finer multiplier applied per Ctrl+wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

/// Fraction of the view filled by fit-to-view (5% margin).
pub const FIT_MARGIN: f64 = 0.95;

/// Rotation applied by a single rotate-left/right action, in degrees.
pub const ROTATION_STEP_DEG: f64 = 90.0;

/// Fixed cine playback interval in milliseconds.
pub const CINE_INTERVAL_MS: u64 = 200;

/// Diameter of the dot drawn at each measurement click.
pub const MARKER_DIAMETER: f64 = 6.0;

/// Vertical lift of distance/area labels above their anchor.
pub const LABEL_LIFT: f64 = 20.0;

/// Offset of the angle label from the vertex.
pub const ANGLE_LABEL_OFFSET: (f64, f64) = (10.0, -20.0);

/// Length of each arrowhead side.
pub const ARROW_HEAD_LENGTH: f64 = 15.0;

/// Half-opening of the arrowhead (30 degrees).
pub const ARROW_HEAD_ANGLE: f64 = PI / 6.0;

/// Fallback pixel spacing when a slice carries no calibration.
pub const DEFAULT_PIXEL_SPACING_MM: f64 = 1.0;

/// Default display window width.
pub const DEFAULT_WINDOW_WIDTH: f64 = 400.0;

/// Narrowest window width passed on to the decoding service.
pub const MIN_WINDOW_WIDTH: f64 = 1.0;

/// Default display window center (level).
pub const DEFAULT_WINDOW_CENTER: f64 = 40.0;

/// Minimum number of vertices for an area measurement.
pub const MIN_AREA_POINTS: usize = 3;

/// Timestamp layout used in exported reports.
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Modality code of computed tomography, the only quantitative modality.
pub const CT_MODALITY: &str = "CT";
