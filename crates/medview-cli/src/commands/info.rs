use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::source::DicomSlice;

#[derive(Args)]
pub struct InfoArgs {
    /// Input DICOM file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let slice = DicomSlice::open(&args.file)?;

    println!("File:        {}", slice.path.display());
    println!("Dimensions:  {}x{}", slice.columns, slice.rows);
    println!(
        "Spacing:     {:.4} x {:.4} mm{}",
        slice.calibration.spacing_x,
        slice.calibration.spacing_y,
        if slice.calibration.is_default() {
            " (default)"
        } else {
            ""
        }
    );
    println!("Modality:    {}", slice.modality);
    println!(
        "Rescale:     slope {} intercept {}",
        slice.rescale.slope, slice.rescale.intercept
    );
    println!("Samples:     {}", slice.pixels.len());

    if !slice.metadata.is_empty() {
        println!();
        for (name, value) in &slice.metadata {
            println!("{}: {}", name, value);
        }
    }

    Ok(())
}
