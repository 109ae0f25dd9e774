use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use medview_core::geometry::Point;
use medview_core::intensity::sample;
use medview_core::session::CursorReadout;

use crate::source::DicomSlice;

#[derive(Args)]
pub struct ProbeArgs {
    /// Input DICOM file
    pub file: PathBuf,

    /// Column in image pixels
    #[arg(long)]
    pub x: f64,

    /// Row in image pixels
    #[arg(long)]
    pub y: f64,
}

pub fn run(args: &ProbeArgs) -> Result<()> {
    let slice = DicomSlice::open(&args.file)?;
    let at = Point::new(args.x, args.y);
    let reading = sample(
        &slice.pixels,
        slice.columns,
        slice.rows,
        &slice.modality,
        slice.rescale,
        at,
    );
    let readout = CursorReadout {
        position: at,
        intensity: Some(reading),
    };
    println!("{}", readout);
    Ok(())
}
