use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};

use stack2d::generator::HeterostructureGenerator;
use stack2d::io::{StackOptions, write_xyz};

#[derive(Parser)]
#[command(name = "stack2d")]
#[command(about = "Stack lattice-matched 2D layers into a periodic heterostructure")]
#[command(version)]
struct Cli {
    /// Options file (YAML, or JSON with a .json extension) listing base layers and the stacking sequence
    options: PathBuf,

    /// Path to save the final heterostructure
    #[arg(short, long, default_value = "output.xyz")]
    output: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("Starting stack2d v{}", stack2d::VERSION);

    let options = StackOptions::from_file(&cli.options)
        .with_context(|| format!("failed to load options from {}", cli.options.display()))?;
    let root = cli.options.parent().unwrap_or(Path::new("."));
    let base_layers = options
        .load_base_layers(root)
        .context("failed to read base layers")?;
    info!("Loaded {} base layers", base_layers.len());

    let settings = options.settings();
    debug!("Generator settings: {:?}", settings);
    let generator = HeterostructureGenerator::new(&base_layers, settings);
    let report = generator
        .generate_with_report(&options.layer_specs())
        .context("failed to generate heterostructure")?;

    write_xyz(&cli.output, &report.structure)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(
        "Wrote {} atoms ({} interfaces) to {}",
        report.structure.len(),
        report.interfaces.len(),
        cli.output.display()
    );
    Ok(())
}
