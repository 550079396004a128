//! stormtide-ann - run the pretrained two-layer network over a batch of samples.
//!
//! ```bash
//! # fixed-size text files in the current directory
//! stormtide-ann run --preset txt
//!
//! # CSV files in ./data, bipolar sigmoid on the output layer too
//! stormtide-ann run --preset csv --dir data --output-activation
//!
//! # edit a preset and run it
//! stormtide-ann init-config model.json --preset csv
//! stormtide-ann run --config model.json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use stormtide_ann::{Network, PipelineConfig};

#[derive(Parser)]
#[command(name = "stormtide-ann", version, about = "Offline inference for a pretrained two-layer network")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the model files, run inference and write the prediction CSV
    Run {
        /// JSON config file (takes precedence over --preset)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Built-in file layout to use when no config is given
        #[arg(long, value_enum, default_value_t = Preset::Txt)]
        preset: Preset,

        /// Apply the bipolar sigmoid to the output layer as well
        #[arg(long)]
        output_activation: bool,

        /// Directory that relative file names are resolved against
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Run the built-in 3-3-3 demonstration network on [1, 2, 3]
    Demo,
    /// Write a preset config as JSON
    InitConfig {
        path: PathBuf,

        #[arg(long, value_enum, default_value_t = Preset::Txt)]
        preset: Preset,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Whitespace-separated .txt files with fixed dimensions
    Txt,
    /// Comma-separated .csv files, dimensions read from the files
    Csv,
}

impl Preset {
    fn config(self) -> PipelineConfig {
        match self {
            Preset::Txt => PipelineConfig::fixed_txt(),
            Preset::Csv => PipelineConfig::csv(),
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    let cli = Cli::parse();

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {e:#}");
            ExitCode::from(1)
        }
    }
}

fn execute(command: Command) -> Result<()> {
    match command {
        Command::Run { config, preset, output_activation, dir } => {
            let mut cfg = match &config {
                Some(path) => PipelineConfig::load_json(path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => preset.config(),
            };
            cfg.output_activation |= output_activation;
            if let Some(dir) = &dir {
                cfg.files = cfg.files.relative_to(dir);
            }

            let report = stormtide_ann::run(&cfg)?;
            println!(
                "[OK] N={}, F={}, HN={}, OUT={}",
                report.samples, report.features, report.hidden, report.outputs
            );
            if !report.degenerate_features.is_empty() {
                println!("[WARN] degenerate feature bounds: {:?}", report.degenerate_features);
            }
            if report.degenerate_output_range {
                println!("[WARN] raw predictions are constant; new_O is 0 for every sample");
            }
            println!("[OK] Saved: {}", report.output_path.display());
        }
        Command::Demo => {
            let pred = Network::demo()?.predict(&[1.0, 2.0, 3.0])?;
            let text: Vec<String> = pred.iter().map(|v| v.to_string()).collect();
            println!("Prediction: {}", text.join(" "));
        }
        Command::InitConfig { path, preset } => {
            write_config(&path, preset)?;
            println!("[OK] Saved: {}", path.display());
        }
    }
    Ok(())
}

fn write_config(path: &Path, preset: Preset) -> Result<()> {
    preset.config()
        .save_json(path)
        .with_context(|| format!("writing config {}", path.display()))
}
