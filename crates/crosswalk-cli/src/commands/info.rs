use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use crosswalk_core::frame::Image;
use crosswalk_core::io::load_image;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let bit_depth = match &image {
        Image::Gray(frame) => frame.original_bit_depth,
        Image::Color(color) => color.red.original_bit_depth,
    };

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", image.columns(), image.rows());
    println!("Channels:    {}", image.channels());
    println!("Bit depth:   {}", bit_depth);

    Ok(())
}
