use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use crosswalk_core::analysis::{
    analyze_stripes_reported, AnalysisConfig, AnalysisStage, BatchFile, ProgressReporter,
    SignalTrace, StripeAnalysis, ThresholdBasis,
};
use crosswalk_core::geometry::OrientedBox;
use crosswalk_core::io::{load_image, save_image_png};
use crosswalk_core::signal::{PeakReport, ScanAxis};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::summary::{print_config_summary, print_region_report};

#[derive(Clone, Copy, ValueEnum)]
pub enum AxisArg {
    Columns,
    Rows,
}

impl From<AxisArg> for ScanAxis {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::Columns => ScanAxis::Columns,
            AxisArg::Rows => ScanAxis::Rows,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BasisArg {
    Signal,
    Region,
}

impl From<BasisArg> for ThresholdBasis {
    fn from(arg: BasisArg) -> Self {
        match arg {
            BasisArg::Signal => ThresholdBasis::Signal,
            BasisArg::Region => ThresholdBasis::Region,
        }
    }
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input image file
    pub file: PathBuf,

    /// Box center, x (pixels)
    #[arg(long, allow_hyphen_values = true)]
    pub cx: f64,

    /// Box center, y (pixels)
    #[arg(long, allow_hyphen_values = true)]
    pub cy: f64,

    /// Box width (pixels, along the scan)
    #[arg(long)]
    pub width: f64,

    /// Box height (pixels, across the scan)
    #[arg(long)]
    pub height: f64,

    /// Box rotation in radians, as reported by the detector
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub rotation: f64,

    /// Batch file (TOML) whose [config] table supplies defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scan direction in the rectified box
    #[arg(long, value_enum)]
    pub axis: Option<AxisArg>,

    /// Low-pass cutoff frequency
    #[arg(long)]
    pub threshold: Option<f64>,

    /// What the cutoff frequency is measured against
    #[arg(long, value_enum)]
    pub basis: Option<BasisArg>,

    /// Minimum distance between peaks (samples)
    #[arg(long)]
    pub min_separation: Option<usize>,

    /// Half-width of the amplitude window (samples)
    #[arg(long)]
    pub window_radius: Option<usize>,

    /// Save the rectified region as PNG
    #[arg(long)]
    pub save_rectified: Option<PathBuf>,

    /// Include raw, normalized and smoothed signals in JSON output
    #[arg(long)]
    pub trace: bool,

    /// Print JSON instead of a styled report
    #[arg(long)]
    pub json: bool,
}

/// One analyzed box as printed by `--json`.
#[derive(Serialize)]
pub struct RegionOutput {
    pub index: usize,
    pub region: OrientedBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PeakReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<SignalTrace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegionOutput {
    pub fn new(
        index: usize,
        region: OrientedBox,
        result: &crosswalk_core::error::Result<StripeAnalysis>,
        with_trace: bool,
    ) -> Self {
        match result {
            Ok(analysis) => Self {
                index,
                region,
                effective_threshold: Some(analysis.effective_threshold),
                report: Some(analysis.report.clone()),
                trace: with_trace.then(|| analysis.trace.clone()),
                error: None,
            },
            Err(e) => Self {
                index,
                region,
                effective_threshold: None,
                report: None,
                trace: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Progress bar driven by analysis stages.
struct StageProgress {
    pb: ProgressBar,
}

impl ProgressReporter for StageProgress {
    fn begin_stage(&self, stage: AnalysisStage) {
        self.pb.set_message(stage.to_string());
    }

    fn finish_stage(&self) {
        self.pb.inc(1);
    }
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let config = build_config(args)?;
    let region = region_from_args(args)?;

    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let pb = if args.json {
        ProgressBar::hidden()
    } else {
        println!(
            "Loaded {}x{} image ({} channel(s))",
            image.columns(),
            image.rows(),
            image.channels()
        );
        print_config_summary(&config);
        ProgressBar::new(5)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = StageProgress { pb };

    let result = analyze_stripes_reported(&image, &region, &config, &reporter);
    reporter.pb.finish_and_clear();

    if args.json {
        let output = RegionOutput::new(0, region, &result, args.trace);
        println!("{}", serde_json::to_string_pretty(&output)?);
        result?;
        return Ok(());
    }

    let analysis = result.context("Stripe analysis failed")?;
    print_region_report(None, &region, &analysis);

    if let Some(ref path) = args.save_rectified {
        save_rectified(&analysis, path)?;
    }

    Ok(())
}

fn region_from_args(args: &AnalyzeArgs) -> Result<OrientedBox> {
    let region = OrientedBox::new(args.cx, args.cy, args.width, args.height, args.rotation)?;
    Ok(region)
}

fn build_config(args: &AnalyzeArgs) -> Result<AnalysisConfig> {
    let mut config = match args.config {
        Some(ref path) => read_batch_file(path)?.config,
        None => AnalysisConfig::default(),
    };

    if let Some(axis) = args.axis {
        config.axis = axis.into();
    }
    if let Some(threshold) = args.threshold {
        config.frequency_threshold = threshold;
    }
    if let Some(basis) = args.basis {
        config.threshold_basis = basis.into();
    }
    if let Some(sep) = args.min_separation {
        config.min_separation = sep;
    }
    if let Some(radius) = args.window_radius {
        config.window_radius = radius;
    }

    config.validate()?;
    Ok(config)
}

pub fn read_batch_file(path: &Path) -> Result<BatchFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file {}", path.display()))?;
    toml::from_str(&contents).context("Invalid batch file")
}

pub fn save_rectified(analysis: &StripeAnalysis, path: &Path) -> Result<()> {
    save_image_png(&analysis.rectified, path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    println!("Rectified region saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: AnalyzeArgs,
    }

    fn parse(extra: &[&str]) -> AnalyzeArgs {
        let mut argv = vec![
            "analyze", "tile.png", "--cx", "320", "--cy", "300", "--width", "600", "--height",
            "200",
        ];
        argv.extend_from_slice(extra);
        TestCli::parse_from(argv).args
    }

    #[test]
    fn rotation_is_taken_in_radians() {
        let region = region_from_args(&parse(&["--rotation", "0.542"])).unwrap();
        assert_eq!(region.rotation_radians, 0.542);
        assert!((region.rotation_degrees() - 31.05).abs() < 0.01);
    }

    #[test]
    fn negative_rotation_parses() {
        let region = region_from_args(&parse(&["--rotation", "-1.2"])).unwrap();
        assert_eq!(region.rotation_radians, -1.2);
    }

    #[test]
    fn cli_overrides_config_defaults() {
        let config = build_config(&parse(&["--axis", "rows", "--min-separation", "12"])).unwrap();
        assert_eq!(config.axis, ScanAxis::Rows);
        assert_eq!(config.min_separation, 12);
        assert_eq!(config.window_radius, AnalysisConfig::default().window_radius);
    }
}
