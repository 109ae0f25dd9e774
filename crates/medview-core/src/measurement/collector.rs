use tracing::{debug, info};

use crate::calibration::Calibration;
use crate::consts::{ANGLE_LABEL_OFFSET, LABEL_LIFT, MARKER_DIAMETER, MIN_AREA_POINTS};
use crate::geometry::Point;
use crate::overlay::{OverlayGroup, OverlayHandle, OverlayRegistry, Primitive};

use super::calc;
use super::record::{MeasurementKind, MeasurementRecord};

/// Result of feeding one click to the collector.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// No measurement tool is collecting; the click was dropped.
    Ignored,
    /// The point was accumulated; more input is needed.
    Pending { points: usize },
    /// The measurement finished and was appended to the log.
    Completed(MeasurementRecord),
}

#[derive(Clone, Debug, Default, PartialEq)]
enum State {
    #[default]
    Idle,
    Collecting {
        kind: MeasurementKind,
        points: Vec<Point>,
    },
}

/// Click accumulator and record log for the measurement tools.
///
/// Click markers and the area preview are drawn as soon as a point arrives.
/// They stay in the measurement group until that group is cleared, even when
/// the collection is cancelled.
#[derive(Debug, Default)]
pub struct MeasurementCollector {
    state: State,
    preview: Option<OverlayHandle>,
    log: Vec<MeasurementRecord>,
}

impl MeasurementCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh collection, discarding anything in progress.
    pub fn begin(&mut self, kind: MeasurementKind) {
        self.cancel();
        self.state = State::Collecting {
            kind,
            points: Vec::new(),
        };
        debug!(%kind, "Measurement collection started");
    }

    /// Drop the accumulator. Overlays already drawn for it are left alone.
    pub fn cancel(&mut self) {
        self.preview = None;
        if let State::Collecting { kind, points } = &self.state {
            if !points.is_empty() {
                debug!(%kind, discarded = points.len(), "Measurement collection cancelled");
            }
        }
        self.state = State::Idle;
    }

    pub fn active_kind(&self) -> Option<MeasurementKind> {
        match &self.state {
            State::Collecting { kind, .. } => Some(*kind),
            State::Idle => None,
        }
    }

    pub fn points(&self) -> &[Point] {
        match &self.state {
            State::Collecting { points, .. } => points,
            State::Idle => &[],
        }
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self.state, State::Collecting { .. })
    }

    /// True while an area polygon is being collected.
    pub fn is_collecting_area(&self) -> bool {
        self.active_kind() == Some(MeasurementKind::Area)
    }

    pub fn preview(&self) -> Option<OverlayHandle> {
        self.preview
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.log
    }

    /// Accumulate a click, completing distance and angle measurements once
    /// enough points are present.
    pub fn click(
        &mut self,
        point: Point,
        calibration: &Calibration,
        overlays: &mut OverlayRegistry,
    ) -> ClickOutcome {
        let State::Collecting { kind, points } = &mut self.state else {
            return ClickOutcome::Ignored;
        };
        let kind = *kind;
        points.push(point);
        let count = points.len();
        overlays.insert(
            OverlayGroup::Measurement,
            Primitive::measurement_marker(point, MARKER_DIAMETER),
        );

        match kind {
            MeasurementKind::Distance if count == 2 => {
                ClickOutcome::Completed(self.complete_distance(calibration, overlays))
            }
            MeasurementKind::Angle if count == 3 => {
                ClickOutcome::Completed(self.complete_angle(overlays))
            }
            MeasurementKind::Area if count >= MIN_AREA_POINTS => {
                self.redraw_preview(overlays);
                ClickOutcome::Pending { points: count }
            }
            _ => ClickOutcome::Pending { points: count },
        }
    }

    /// Close the area polygon. Does nothing unless an area collection holds
    /// at least three points.
    pub fn complete_area(
        &mut self,
        calibration: &Calibration,
        overlays: &mut OverlayRegistry,
    ) -> Option<MeasurementRecord> {
        let State::Collecting {
            kind: MeasurementKind::Area,
            points,
        } = &self.state
        else {
            return None;
        };
        let area = calc::polygon_area_mm2(points, calibration)?;
        let centroid = calc::centroid(points)?;

        // The preview already spans every vertex; keep it as the outline.
        if self.preview.is_none() {
            let outline = overlays.insert(
                OverlayGroup::Measurement,
                Primitive::area_polygon(points.clone()),
            );
            self.preview = Some(outline);
        }

        let record = MeasurementRecord::new(MeasurementKind::Area, area);
        Some(self.finish(record, centroid.offset(0.0, -LABEL_LIFT), overlays))
    }

    /// Remove every measurement overlay and record, and reset the accumulator.
    pub fn clear_all(&mut self, overlays: &mut OverlayRegistry) {
        overlays.clear_group(OverlayGroup::Measurement);
        self.preview = None;
        self.log.clear();
        self.state = State::Idle;
        info!("Measurements cleared");
    }

    fn complete_distance(
        &mut self,
        calibration: &Calibration,
        overlays: &mut OverlayRegistry,
    ) -> MeasurementRecord {
        let (p1, p2) = {
            let pts = self.points();
            (pts[0], pts[1])
        };
        overlays.insert(
            OverlayGroup::Measurement,
            Primitive::measurement_line(p1, p2),
        );
        let distance = calc::distance_mm(p1, p2, calibration);
        let record = MeasurementRecord::new(MeasurementKind::Distance, distance);
        self.finish(record, p1.midpoint(p2).offset(0.0, -LABEL_LIFT), overlays)
    }

    fn complete_angle(&mut self, overlays: &mut OverlayRegistry) -> MeasurementRecord {
        let (p1, vertex, p3) = {
            let pts = self.points();
            (pts[0], pts[1], pts[2])
        };
        overlays.insert(
            OverlayGroup::Measurement,
            Primitive::measurement_line(p1, vertex),
        );
        overlays.insert(
            OverlayGroup::Measurement,
            Primitive::measurement_line(vertex, p3),
        );
        let angle = calc::angle_deg(p1, vertex, p3);
        let record = MeasurementRecord::new(MeasurementKind::Angle, angle);
        let (ox, oy) = ANGLE_LABEL_OFFSET;
        self.finish(record, vertex.offset(ox, oy), overlays)
    }

    /// Draw the label, log the record and return to idle.
    fn finish(
        &mut self,
        record: MeasurementRecord,
        label_at: Point,
        overlays: &mut OverlayRegistry,
    ) -> MeasurementRecord {
        overlays.insert(
            OverlayGroup::Measurement,
            Primitive::measurement_label(label_at, record.label_text()),
        );
        self.preview = None;
        self.state = State::Idle;
        info!(kind = %record.kind, value = record.value, unit = %record.unit, "Measurement completed");
        self.log.push(record.clone());
        record
    }

    fn redraw_preview(&mut self, overlays: &mut OverlayRegistry) {
        if let Some(old) = self.preview.take() {
            overlays.remove(old);
        }
        let points = self.points().to_vec();
        let handle = overlays.insert(OverlayGroup::Measurement, Primitive::area_polygon(points));
        self.preview = Some(handle);
    }
}
