//! DICOM and synthetic slice sources standing in for the decoding service.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use byteorder::{ByteOrder, LittleEndian};
use dicom::core::Tag;
use dicom::object::{open_file, DefaultDicomObject};
use dicom_dictionary_std::tags;
use tracing::{debug, info};

use medview_core::calibration::Calibration;
use medview_core::error::MedviewError;
use medview_core::intensity::{Modality, Rescale, SampleGrid};
use medview_core::report::PatientInfo;
use medview_core::session::{DecodedSlice, SliceSource};

/// Tags shown by `medview info`, with their display names.
const METADATA_TAGS: [(Tag, &str); 15] = [
    (tags::PATIENT_NAME, "Patient Name"),
    (tags::PATIENT_ID, "Patient ID"),
    (tags::PATIENT_SEX, "Sex"),
    (tags::PATIENT_AGE, "Age"),
    (tags::PATIENT_BIRTH_DATE, "Birth Date"),
    (tags::STUDY_DATE, "Study Date"),
    (tags::STUDY_DESCRIPTION, "Study Description"),
    (tags::MODALITY, "Modality"),
    (tags::SERIES_NUMBER, "Series Number"),
    (tags::INSTANCE_NUMBER, "Instance Number"),
    (tags::SLICE_THICKNESS, "Slice Thickness"),
    (tags::PIXEL_SPACING, "Pixel Spacing"),
    (tags::IMAGE_POSITION_PATIENT, "Position"),
    (tags::WINDOW_WIDTH, "Window Width"),
    (tags::WINDOW_CENTER, "Window Center"),
];

/// One DICOM file reduced to what the viewer needs.
#[derive(Clone, Debug)]
pub struct DicomSlice {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub calibration: Calibration,
    pub modality: Modality,
    pub rescale: Rescale,
    pub pixels: Vec<i16>,
    pub patient: PatientInfo,
    /// Present tags from [`METADATA_TAGS`], in that order.
    pub metadata: Vec<(&'static str, String)>,
}

impl DicomSlice {
    pub fn open(path: &Path) -> Result<Self> {
        let obj = open_file(path)
            .with_context(|| format!("Failed to read DICOM file {}", path.display()))?;

        let rows = int_tag(&obj, tags::ROWS).context("Missing Rows")?;
        let columns = int_tag(&obj, tags::COLUMNS).context("Missing Columns")?;

        let calibration = obj
            .element(tags::PIXEL_SPACING)
            .ok()
            .and_then(|e| e.to_multi_float64().ok())
            .map(|values| Calibration::from_values(&values))
            .unwrap_or_default();

        let modality = Modality::from_code(&str_tag(&obj, tags::MODALITY).unwrap_or_default());
        let rescale = Rescale {
            slope: float_tag(&obj, tags::RESCALE_SLOPE).unwrap_or(1.0),
            intercept: float_tag(&obj, tags::RESCALE_INTERCEPT).unwrap_or(0.0),
        };

        let pixels = match obj.element(tags::PIXEL_DATA).ok().and_then(|e| e.to_bytes().ok()) {
            Some(bytes) => {
                let mut samples = vec![0i16; bytes.len() / 2];
                LittleEndian::read_i16_into(&bytes[..samples.len() * 2], &mut samples);
                samples
            }
            None => Vec::new(),
        };

        let patient = PatientInfo::new(
            str_tag(&obj, tags::PATIENT_NAME).as_deref(),
            str_tag(&obj, tags::PATIENT_ID).as_deref(),
            str_tag(&obj, tags::STUDY_DATE).as_deref(),
        );

        let metadata = METADATA_TAGS
            .iter()
            .filter_map(|(tag, name)| str_tag(&obj, *tag).map(|value| (*name, value)))
            .collect();

        debug!(
            path = %path.display(),
            rows,
            columns,
            samples = pixels.len(),
            %modality,
            "DICOM slice read"
        );

        Ok(Self {
            path: path.to_path_buf(),
            rows,
            columns,
            calibration,
            modality,
            rescale,
            pixels,
            patient,
            metadata,
        })
    }

    pub fn sample_grid(&self) -> Option<SampleGrid> {
        if self.pixels.is_empty() {
            return None;
        }
        SampleGrid::new(
            self.columns,
            self.rows,
            self.pixels.clone(),
            self.modality.clone(),
            self.rescale,
        )
        .ok()
    }

    pub fn decoded(&self) -> DecodedSlice {
        DecodedSlice {
            width: self.columns,
            height: self.rows,
            calibration: self.calibration,
            samples: self.sample_grid(),
            patient: Some(self.patient.clone()),
        }
    }
}

fn str_tag(obj: &DefaultDicomObject, tag: Tag) -> Option<String> {
    let value = obj.element(tag).ok()?.to_str().ok()?;
    let value = value.trim_end_matches('\0').trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn float_tag(obj: &DefaultDicomObject, tag: Tag) -> Option<f64> {
    obj.element(tag).ok()?.to_float64().ok()
}

fn int_tag(obj: &DefaultDicomObject, tag: Tag) -> Option<usize> {
    obj.element(tag).ok()?.to_int::<u16>().ok().map(usize::from)
}

/// A series of DICOM files, ordered by path and read up front.
pub struct DicomSeries {
    slices: Vec<DicomSlice>,
}

impl DicomSeries {
    pub fn open(paths: &[PathBuf]) -> Result<Self> {
        if paths.is_empty() {
            return Err(MedviewError::EmptySeries.into());
        }
        let mut sorted = paths.to_vec();
        sorted.sort();
        let slices = sorted
            .iter()
            .map(|p| DicomSlice::open(p))
            .collect::<Result<Vec<_>>>()?;
        info!(slices = slices.len(), "DICOM series loaded");
        Ok(Self { slices })
    }
}

impl SliceSource for DicomSeries {
    fn len(&self) -> usize {
        self.slices.len()
    }

    fn decode(&mut self, index: usize) -> medview_core::error::Result<DecodedSlice> {
        self.slices
            .get(index)
            .map(DicomSlice::decoded)
            .ok_or(MedviewError::SliceIndexOutOfRange {
                index,
                total: self.slices.len(),
            })
    }
}

/// Generated CT-like slices for scripted sessions without data files. The raw
/// value at `(x, y)` is `x + y + 100 * index`.
pub struct SyntheticSeries {
    pub len: usize,
    pub width: usize,
    pub height: usize,
    pub calibration: Calibration,
    pub modality: Modality,
    pub rescale: Rescale,
}

impl SliceSource for SyntheticSeries {
    fn len(&self) -> usize {
        self.len
    }

    fn decode(&mut self, index: usize) -> medview_core::error::Result<DecodedSlice> {
        if index >= self.len {
            return Err(MedviewError::SliceIndexOutOfRange {
                index,
                total: self.len,
            });
        }
        let base = 100 * index;
        let pixels = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x + y + base) as i16))
            .collect();
        let samples = SampleGrid::new(
            self.width,
            self.height,
            pixels,
            self.modality.clone(),
            self.rescale,
        )?;
        Ok(DecodedSlice {
            width: self.width,
            height: self.height,
            calibration: self.calibration,
            samples: Some(samples),
            patient: None,
        })
    }
}
