use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use crosswalk_core::filters::gaussian_blur::gaussian_blur;
use crosswalk_core::filters::{
    bilateral_filter, clahe, correct_shadows, equalize_histogram, local_contrast_enhance,
    BilateralParams, ClaheParams, LocalContrastParams, ShadowParams,
};
use crosswalk_core::frequency::{ideal_low_pass, square_high_pass};
use crosswalk_core::geometry::resample::resample_scale;
use crosswalk_core::io::{load_gray, save_image};

#[derive(Clone, Copy, ValueEnum)]
pub enum EnhanceMethod {
    Equalize,
    LocalContrast,
    Clahe,
    Shadow,
    Bilateral,
    Gaussian,
    LowPass,
    HighPass,
}

#[derive(Args)]
pub struct EnhanceArgs {
    /// Input image file (converted to grayscale)
    pub file: PathBuf,

    /// Filter to apply
    #[arg(long, value_enum)]
    pub method: EnhanceMethod,

    /// Neighbourhood size for local contrast (pixels)
    #[arg(long, default_value = "25")]
    pub window: usize,

    /// Local contrast gain for selected pixels
    #[arg(long, default_value = "7.0")]
    pub gain: f32,

    /// CLAHE clip limit
    #[arg(long, default_value = "2.0")]
    pub clip_limit: f32,

    /// CLAHE tiles per side
    #[arg(long, default_value = "8")]
    pub grid: usize,

    /// Shadow detection offset (0-255 intensity levels)
    #[arg(long, default_value = "10")]
    pub offset: f32,

    /// Skip the high-pass step after shadow correction
    #[arg(long)]
    pub no_high_pass: bool,

    /// Gaussian sigma, or bilateral spatial sigma (pixels)
    #[arg(long, default_value = "2.0")]
    pub sigma: f32,

    /// Bilateral range sigma (0-255 intensity levels)
    #[arg(long, default_value = "50")]
    pub sigma_range: f32,

    /// Bilateral window size (pixels)
    #[arg(long, default_value = "5")]
    pub kernel: usize,

    /// Low-pass cutoff radius (frequency bins)
    #[arg(long, default_value = "60")]
    pub cutoff: f64,

    /// High-pass block half-size (frequency bins)
    #[arg(long, default_value = "20")]
    pub half_size: usize,

    /// Resize the result by this factor
    #[arg(long)]
    pub scale: Option<f32>,

    /// Output file path
    #[arg(short, long, default_value = "enhanced.png")]
    pub output: PathBuf,
}

pub fn run(args: &EnhanceArgs) -> Result<()> {
    let frame = load_gray(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    println!("Loaded {}x{} image", frame.width(), frame.height());

    let mut frame = match args.method {
        EnhanceMethod::Equalize => {
            println!("Applying histogram equalization");
            equalize_histogram(&frame)
        }
        EnhanceMethod::LocalContrast => {
            println!(
                "Applying local contrast enhancement: window={}, gain={}",
                args.window, args.gain
            );
            let params = LocalContrastParams {
                window_size: args.window,
                gain: args.gain,
                ..Default::default()
            };
            local_contrast_enhance(&frame, &params)?
        }
        EnhanceMethod::Clahe => {
            println!(
                "Applying CLAHE: clip={}, grid={}x{}",
                args.clip_limit, args.grid, args.grid
            );
            clahe(&frame, &clahe_params(args))?
        }
        EnhanceMethod::Shadow => {
            println!("Applying shadow correction: offset={}", args.offset);
            let params = ShadowParams {
                offset: args.offset / 255.0,
                clahe: clahe_params(args),
                high_pass: (!args.no_high_pass).then_some(args.half_size),
            };
            correct_shadows(&frame, &params)?
        }
        EnhanceMethod::Bilateral => {
            println!(
                "Applying bilateral filter: sigma={}, range={}, kernel={}",
                args.sigma, args.sigma_range, args.kernel
            );
            let params = BilateralParams {
                sigma_spatial: args.sigma,
                sigma_range: args.sigma_range / 255.0,
                kernel_size: args.kernel,
            };
            bilateral_filter(&frame, &params)?
        }
        EnhanceMethod::Gaussian => {
            println!("Applying Gaussian blur: sigma={}", args.sigma);
            gaussian_blur(&frame, args.sigma)
        }
        EnhanceMethod::LowPass => {
            println!("Applying ideal low-pass: cutoff={}", args.cutoff);
            ideal_low_pass(&frame, args.cutoff)?
        }
        EnhanceMethod::HighPass => {
            println!("Applying square high-pass: half-size={}", args.half_size);
            square_high_pass(&frame, args.half_size)?
        }
    };

    if let Some(scale) = args.scale {
        frame = resample_scale(&frame, scale)?;
        println!("Resized to {}x{}", frame.width(), frame.height());
    }

    save_image(&frame, &args.output)?;
    println!("Saved to {}", args.output.display());

    Ok(())
}

fn clahe_params(args: &EnhanceArgs) -> ClaheParams {
    ClaheParams {
        clip_limit: args.clip_limit,
        grid_cols: args.grid,
        grid_rows: args.grid,
    }
}
