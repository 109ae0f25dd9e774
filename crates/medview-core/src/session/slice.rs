use crate::calibration::Calibration;
use crate::error::Result;
use crate::intensity::SampleGrid;
use crate::report::PatientInfo;

/// What the decoding service reports about the slice it just decoded.
#[derive(Clone, Debug)]
pub struct DecodedSlice {
    /// Rendered size in pixels. The overlay surface has the same size.
    pub width: usize,
    pub height: usize,
    pub calibration: Calibration,
    /// Raw samples for the intensity readout, if the slice has any.
    pub samples: Option<SampleGrid>,
    pub patient: Option<PatientInfo>,
}

impl DecodedSlice {
    /// A slice with no calibration metadata and no sample buffer.
    pub fn bare(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            calibration: Calibration::default(),
            samples: None,
            patient: None,
        }
    }
}

/// The external image decoding service.
pub trait SliceSource {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn decode(&mut self, index: usize) -> Result<DecodedSlice>;
}
