//! One-shot export of the measurement log.

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::EXPORT_DATE_FORMAT;
use crate::error::Result;
use crate::measurement::MeasurementRecord;

const NOT_AVAILABLE: &str = "N/A";

/// Patient identification copied into the report header.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "StudyDate")]
    pub study_date: String,
}

impl PatientInfo {
    /// Missing or blank fields are reported as `N/A`.
    pub fn new(name: Option<&str>, id: Option<&str>, study_date: Option<&str>) -> Self {
        let field = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(NOT_AVAILABLE)
                .to_string()
        };
        Self {
            name: field(name),
            id: field(id),
            study_date: field(study_date),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementReport {
    #[serde(rename = "PatientInfo")]
    pub patient: Option<PatientInfo>,
    #[serde(rename = "Measurements")]
    pub measurements: Vec<MeasurementRecord>,
    #[serde(rename = "ExportDate")]
    pub export_date: String,
}

impl MeasurementReport {
    /// Snapshot `measurements` with the current local time.
    pub fn new(patient: Option<PatientInfo>, measurements: &[MeasurementRecord]) -> Self {
        Self::at(patient, measurements, Local::now().naive_local())
    }

    pub fn at(
        patient: Option<PatientInfo>,
        measurements: &[MeasurementRecord],
        when: NaiveDateTime,
    ) -> Self {
        Self {
            patient,
            measurements: measurements.to_vec(),
            export_date: when.format(EXPORT_DATE_FORMAT).to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let mut text = format!(
            "DICOM Measurement Report\nGenerated: {}\n\nMeasurements:\n",
            self.export_date
        );
        let lines: Vec<String> = self
            .measurements
            .iter()
            .map(MeasurementRecord::report_line)
            .collect();
        text.push_str(&lines.join("\n"));
        text
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => self.to_json(),
            ReportFormat::Text => Ok(self.to_text()),
        }
    }

    /// Write the report in the format implied by `path`. Nothing is written
    /// if rendering fails.
    pub fn write(&self, path: &Path) -> Result<ReportFormat> {
        let format = ReportFormat::from_path(path);
        let body = self.render(format)?;
        fs::write(path, body)?;
        info!(
            path = %path.display(),
            ?format,
            measurements = self.measurements.len(),
            "Report saved"
        );
        Ok(format)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Text,
}

impl ReportFormat {
    /// JSON for `*.json` targets, plain text for everything else.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ReportFormat::Json,
            _ => ReportFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_patient_fields_become_na() {
        let p = PatientInfo::new(Some("DOE^JANE"), Some("  "), None);
        assert_eq!(p.name, "DOE^JANE");
        assert_eq!(p.id, "N/A");
        assert_eq!(p.study_date, "N/A");
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(ReportFormat::from_path(Path::new("a.json")), ReportFormat::Json);
        assert_eq!(ReportFormat::from_path(Path::new("a.txt")), ReportFormat::Text);
        assert_eq!(ReportFormat::from_path(Path::new("report")), ReportFormat::Text);
    }
}
