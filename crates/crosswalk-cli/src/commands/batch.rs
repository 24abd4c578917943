use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use crosswalk_core::analysis::analyze_batch;
use crosswalk_core::io::load_image;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use super::analyze::{read_batch_file, save_rectified, RegionOutput};
use crate::summary::{print_config_summary, print_region_error, print_region_report};

#[derive(Args)]
pub struct BatchArgs {
    /// Input image file
    pub file: PathBuf,

    /// Batch file (TOML) with a [config] table and [[boxes]] entries
    pub boxes: PathBuf,

    /// Directory for rectified regions, saved as box_<n>.png
    #[arg(long, conflicts_with = "json")]
    pub save_rectified: Option<PathBuf>,

    /// Include raw, normalized and smoothed signals in JSON output
    #[arg(long)]
    pub trace: bool,

    /// Print JSON instead of styled reports
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &BatchArgs) -> Result<()> {
    let batch = read_batch_file(&args.boxes)?;
    batch.config.validate()?;
    if batch.boxes.is_empty() {
        anyhow::bail!("No boxes listed in {}", args.boxes.display());
    }

    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let pb = if args.json {
        ProgressBar::hidden()
    } else {
        println!(
            "Analyzing {} box(es) in {}x{} image",
            batch.boxes.len(),
            image.columns(),
            image.rows()
        );
        print_config_summary(&batch.config);
        ProgressBar::new(batch.boxes.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Analyzing [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let results = analyze_batch(&image, &batch.boxes, &batch.config, |done, _total| {
        pb.set_position(done as u64);
    });
    pb.finish_and_clear();

    if args.json {
        let outputs: Vec<RegionOutput> = results
            .iter()
            .zip(&batch.boxes)
            .enumerate()
            .map(|(i, (result, region))| RegionOutput::new(i, *region, result, args.trace))
            .collect();
        println!("{}", serde_json::to_string_pretty(&outputs)?);
        return Ok(());
    }

    if let Some(ref dir) = args.save_rectified {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    for (i, (result, region)) in results.iter().zip(&batch.boxes).enumerate() {
        match result {
            Ok(analysis) => {
                print_region_report(Some(i), region, analysis);
                if let Some(ref dir) = args.save_rectified {
                    save_rectified(analysis, &dir.join(format!("box_{}.png", i + 1)))?;
                }
            }
            Err(e) => {
                warn!(index = i, error = %e, "Box analysis failed");
                print_region_error(Some(i), region, &e.to_string());
            }
        }
    }

    Ok(())
}
