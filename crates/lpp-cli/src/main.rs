use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use lpp_core::to_canonical_json_bytes;
use lpp_lattice::{estimate, EstimatorParameters};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::{CliConfig, OutputFormat};

mod config;

#[derive(Parser, Debug)]
#[command(
    name = "pair-compute",
    version,
    about = "Probability that a randomly C-13 doped diamond lattice contains a Larmor pair"
)]
struct Cli {
    /// Hyperfine cutoff in kHz.
    #[arg(allow_negative_numbers = true)]
    hyperfine_cutoff_khz: f64,
    /// C-13 abundance in percent; defaults to the natural abundance (1.07).
    #[arg(allow_negative_numbers = true)]
    c13_abundance_percent: Option<f64>,
    /// YAML file with execution defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Worker threads used to evaluate shells.
    #[arg(long)]
    threads: Option<usize>,
    /// Print the full JSON report instead of the bare probability.
    #[arg(long)]
    json: bool,
    /// Skip the scan for qualifying sites just outside the search bound.
    #[arg(long)]
    no_verify_bound: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<CliConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    if let Some(threads) = cli.threads {
        config.estimate.threads = threads.max(1);
    }
    if cli.no_verify_bound {
        config.estimate.verify_bound = false;
    }
    if cli.json {
        config.format = OutputFormat::Json;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    debug!(?config, "resolved configuration");

    let params =
        EstimatorParameters::from_cli_units(cli.hyperfine_cutoff_khz, cli.c13_abundance_percent)?;
    let report = estimate(&params, &config.estimate)?;

    match config.format {
        OutputFormat::Plain => println!("{}", report.probability),
        OutputFormat::Json => println!("{}", String::from_utf8(to_canonical_json_bytes(&report)?)?),
    }
    Ok(())
}
