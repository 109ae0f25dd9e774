//! One viewer session: every piece of interactive state behind a single
//! value that input handlers receive explicitly.

mod events;
mod input;
mod slice;

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::annotation::AnnotationCapture;
use crate::calibration::Calibration;
use crate::cine::CineScheduler;
use crate::config::{ViewerConfig, WindowLevel};
use crate::error::{MedviewError, Result};
use crate::geometry::{Affine2, Point};
use crate::intensity::SampleGrid;
use crate::measurement::{MeasurementCollector, MeasurementRecord};
use crate::overlay::OverlayRegistry;
use crate::report::{MeasurementReport, PatientInfo, ReportFormat};
use crate::series::Series;
use crate::tools::{Tool, ToolState};
use crate::viewport::{compose, TransformState, ViewportEngine};

pub use events::{
    CursorReadout, InputEvent, Key, Modifiers, PointerButton, ViewerCommand, ViewerEvent,
};
pub use slice::{DecodedSlice, SliceSource};

pub struct ViewerSession {
    config: ViewerConfig,
    engine: ViewportEngine,
    transform: TransformState,
    content_size: (f64, f64),
    view_size: (f64, f64),
    calibration: Calibration,
    overlays: OverlayRegistry,
    measurements: MeasurementCollector,
    annotations: AnnotationCapture,
    tools: ToolState,
    series: Series<usize>,
    cine: CineScheduler,
    window: WindowLevel,
    samples: Option<SampleGrid>,
    patient: Option<PatientInfo>,
    /// Last surface position of an active pan drag.
    pan_anchor: Option<Point>,
    primary_down: bool,
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl ViewerSession {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            engine: ViewportEngine::from_config(&config),
            cine: CineScheduler::new(Duration::from_millis(config.cine_interval_ms)),
            window: config.window.clamped(),
            config,
            transform: TransformState::default(),
            content_size: (0.0, 0.0),
            view_size: (0.0, 0.0),
            calibration: Calibration::default(),
            overlays: OverlayRegistry::new(),
            measurements: MeasurementCollector::new(),
            annotations: AnnotationCapture::new(),
            tools: ToolState::default(),
            series: Series::default(),
            samples: None,
            patient: None,
            pan_anchor: None,
            primary_down: false,
        }
    }

    // --- Accessors ---

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    /// Center of the content, about which scale and rotation are applied.
    pub fn pivot(&self) -> Point {
        Point::new(self.content_size.0 / 2.0, self.content_size.1 / 2.0)
    }

    /// Composed image-to-surface transform.
    pub fn surface_transform(&self) -> Affine2 {
        compose(&self.transform, self.pivot())
    }

    /// Map a surface position into image pixel coordinates.
    pub fn to_image(&self, surface: Point) -> Point {
        match self.surface_transform().inverse() {
            Some(inverse) => inverse.apply(surface),
            None => surface,
        }
    }

    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    pub fn measurements(&self) -> &MeasurementCollector {
        &self.measurements
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        self.measurements.records()
    }

    pub fn annotations(&self) -> &AnnotationCapture {
        &self.annotations
    }

    pub fn active_tool(&self) -> Tool {
        self.tools.active()
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    pub fn current_slice(&self) -> usize {
        self.series.current_index()
    }

    pub fn slice_count(&self) -> usize {
        self.series.len()
    }

    pub fn is_cine_running(&self) -> bool {
        self.cine.is_running()
    }

    pub fn window_level(&self) -> WindowLevel {
        self.window
    }

    pub fn samples(&self) -> Option<&SampleGrid> {
        self.samples.as_ref()
    }

    pub fn set_view_size(&mut self, width: f64, height: f64) {
        self.view_size = (width, height);
    }

    // --- Series and slices ---

    /// Start a new series of `len` slices at slice 0. The transform and
    /// patient are reset and playback stops; measurements and annotations
    /// stay.
    pub fn load_series(&mut self, len: usize) -> Vec<ViewerEvent> {
        self.cine.stop();
        self.series = Series::new((0..len).collect());
        self.engine.reset(&mut self.transform);
        self.samples = None;
        self.patient = None;
        info!(slices = len, "Series loaded");
        let mut events = vec![ViewerEvent::TransformChanged(self.surface_transform())];
        if len > 0 {
            events.push(ViewerEvent::SliceChanged { index: 0, total: len });
        }
        events
    }

    /// Take in the slice the decoding service produced for the current index.
    pub fn slice_decoded(&mut self, slice: DecodedSlice) {
        debug!(
            width = slice.width,
            height = slice.height,
            spacing_x = slice.calibration.spacing_x,
            spacing_y = slice.calibration.spacing_y,
            "Slice decoded"
        );
        self.content_size = (slice.width as f64, slice.height as f64);
        self.calibration = slice.calibration;
        self.samples = slice.samples;
        self.patient = slice.patient;
    }

    /// Decode the current slice from `source` and apply it.
    pub fn decode_current(&mut self, source: &mut dyn SliceSource) -> Result<()> {
        let slice = source.decode(self.series.current_index())?;
        self.slice_decoded(slice);
        Ok(())
    }

    pub fn select_slice(&mut self, index: usize) -> Result<Vec<ViewerEvent>> {
        if self.series.is_empty() {
            return Err(MedviewError::EmptySeries);
        }
        let changed = self.series.select(index);
        Ok(self.slice_event(changed))
    }

    pub fn next_slice(&mut self) -> Vec<ViewerEvent> {
        let changed = self.series.next();
        self.slice_event(changed)
    }

    pub fn previous_slice(&mut self) -> Vec<ViewerEvent> {
        let changed = self.series.previous();
        self.slice_event(changed)
    }

    fn slice_event(&self, changed: Option<usize>) -> Vec<ViewerEvent> {
        changed
            .map(|index| ViewerEvent::SliceChanged {
                index,
                total: self.series.len(),
            })
            .into_iter()
            .collect()
    }

    // --- Cine ---

    pub fn play_cine(&mut self, now: Instant) -> Vec<ViewerEvent> {
        if self.cine.start(self.series.len(), now) {
            vec![ViewerEvent::StatusChanged("Playing cine...".to_string())]
        } else {
            Vec::new()
        }
    }

    pub fn stop_cine(&mut self) -> Vec<ViewerEvent> {
        self.cine.stop();
        vec![ViewerEvent::StatusChanged("Cine stopped".to_string())]
    }

    /// Apply every cine tick due at `now`.
    pub fn poll_cine(&mut self, now: Instant) -> Vec<ViewerEvent> {
        let total = self.series.len();
        self.cine
            .poll(now, &mut self.series)
            .into_iter()
            .map(|index| ViewerEvent::SliceChanged { index, total })
            .collect()
    }

    // --- Window/level ---

    /// The width is clamped before it reaches the decoding service.
    pub fn set_window_level(&mut self, window: WindowLevel) -> Vec<ViewerEvent> {
        let window = window.clamped();
        self.window = window;
        debug!(width = window.width, center = window.center, "Window/level changed");
        vec![ViewerEvent::WindowLevelChanged(window)]
    }

    pub fn apply_preset(&mut self, name: &str) -> Result<Vec<ViewerEvent>> {
        let window = self.config.preset(name)?;
        Ok(self.set_window_level(window))
    }

    // --- Viewport ---

    fn transformed(
        &mut self,
        op: impl FnOnce(&ViewportEngine, &mut TransformState),
    ) -> Vec<ViewerEvent> {
        op(&self.engine, &mut self.transform);
        vec![ViewerEvent::TransformChanged(self.surface_transform())]
    }

    pub fn fit_to_view(&mut self) -> Vec<ViewerEvent> {
        let (view_w, view_h) = self.view_size;
        let (content_w, content_h) = self.content_size;
        self.transformed(|engine, state| {
            engine.fit_to_view(state, view_w, view_h, content_w, content_h)
        })
    }

    // --- Tools ---

    /// Make `tool` the only active tool. Whatever the previous tool had in
    /// progress is discarded first.
    pub fn activate(&mut self, tool: Tool) -> Vec<ViewerEvent> {
        self.release_tool();
        self.tools.set(tool);
        if let Some(kind) = tool.measurement() {
            self.measurements.begin(kind);
        }
        debug!(%tool, "Tool activated");
        vec![ViewerEvent::ToolChanged {
            tool,
            hint: tool.hint(),
        }]
    }

    pub fn deactivate(&mut self) -> Vec<ViewerEvent> {
        self.activate(Tool::None)
    }

    fn release_tool(&mut self) {
        self.measurements.cancel();
        self.annotations.cancel();
        self.pan_anchor = None;
    }

    /// Close the area polygon in progress. Fewer than three points is a no-op.
    pub fn complete_area(&mut self) -> Vec<ViewerEvent> {
        match self
            .measurements
            .complete_area(&self.calibration, &mut self.overlays)
        {
            Some(record) => self.measurement_done(record),
            None => Vec::new(),
        }
    }

    fn measurement_done(&mut self, record: MeasurementRecord) -> Vec<ViewerEvent> {
        let mut events = vec![
            ViewerEvent::StatusChanged(record.status_text()),
            ViewerEvent::MeasurementCompleted(record),
        ];
        events.extend(self.deactivate());
        events
    }

    pub fn clear_measurements(&mut self) -> Vec<ViewerEvent> {
        self.measurements.clear_all(&mut self.overlays);
        // The tool stays armed for the next measurement.
        if let Some(kind) = self.tools.active().measurement() {
            self.measurements.begin(kind);
        }
        vec![ViewerEvent::StatusChanged("Measurements cleared".to_string())]
    }

    pub fn clear_annotations(&mut self) -> Vec<ViewerEvent> {
        self.annotations.clear_all(&mut self.overlays);
        info!("Annotations cleared");
        vec![ViewerEvent::StatusChanged("Annotations cleared".to_string())]
    }

    // --- Commands ---

    /// Run a toolbar-style command. `now` is used only to schedule cine ticks.
    pub fn execute(&mut self, command: ViewerCommand, now: Instant) -> Result<Vec<ViewerEvent>> {
        let events = match command {
            ViewerCommand::Activate { tool } => self.activate(tool),
            ViewerCommand::Deactivate => self.deactivate(),
            ViewerCommand::ZoomIn => self.transformed(|e, s| e.zoom_in(s)),
            ViewerCommand::ZoomOut => self.transformed(|e, s| e.zoom_out(s)),
            ViewerCommand::ZoomActualSize => self.transformed(|e, s| e.zoom_actual_size(s)),
            ViewerCommand::FitToView => self.fit_to_view(),
            ViewerCommand::RotateLeft => self.transformed(|e, s| e.rotate_left(s)),
            ViewerCommand::RotateRight => self.transformed(|e, s| e.rotate_right(s)),
            ViewerCommand::FlipHorizontal => self.transformed(|e, s| e.flip_horizontal(s)),
            ViewerCommand::FlipVertical => self.transformed(|e, s| e.flip_vertical(s)),
            ViewerCommand::ResetTransform => self.transformed(|e, s| e.reset(s)),
            ViewerCommand::CompleteArea => self.complete_area(),
            ViewerCommand::ClearMeasurements => self.clear_measurements(),
            ViewerCommand::ClearAnnotations => self.clear_annotations(),
            ViewerCommand::PlayCine => self.play_cine(now),
            ViewerCommand::StopCine => self.stop_cine(),
            ViewerCommand::SelectSlice { index } => self.select_slice(index)?,
            ViewerCommand::NextSlice => self.next_slice(),
            ViewerCommand::PreviousSlice => self.previous_slice(),
            ViewerCommand::SetWindowLevel { width, center } => {
                self.set_window_level(WindowLevel::new(width, center))
            }
            ViewerCommand::ApplyPreset { name } => self.apply_preset(&name)?,
        };
        Ok(events)
    }

    // --- Export ---

    pub fn report(&self) -> MeasurementReport {
        MeasurementReport::new(self.patient.clone(), self.measurements.records())
    }

    /// Export the measurement log. On failure the log is left as it was and
    /// the error is handed back for display.
    pub fn export_report(&self, path: &Path) -> Result<(ReportFormat, ViewerEvent)> {
        let format = self.report().write(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok((format, ViewerEvent::StatusChanged(format!("Report saved: {name}"))))
    }
}
