use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use crosswalk_core::analysis::{AnalysisConfig, BatchFile};
use crosswalk_core::geometry::OrientedBox;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a default batch file with one example box.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let batch = BatchFile {
        config: AnalysisConfig::default(),
        boxes: vec![OrientedBox::new(320.0, 320.0, 600.0, 200.0, 0.0)?],
    };
    let toml_str = toml::to_string_pretty(&batch)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default batch file saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
