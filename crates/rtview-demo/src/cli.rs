use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Parser;
use rtview::{ModelConfig, TriangleModel};
use rtview_harness::Session;
use tracing_subscriber::EnvFilter;

use crate::error::{DemoError, Result};

/// A session that exercises the binding without any script: type into both
/// fields, tab through, and show the result after each commit.
const DEFAULT_SCRIPT: &str = "\
show
focus base
type 6
tab
show
clear
blur
show
";

#[derive(Debug, Parser)]
#[command(
    name = "rtview-demo",
    about = "Drive a numeric right-triangle view from a session script",
    version
)]
pub struct Cli {
    /// TOML file with `min_side`, `max_side`, `base` and `height`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Session script to run; `-` reads stdin. Runs a built-in session when omitted.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Initial base (overrides the config file).
    #[arg(long)]
    pub base: Option<f64>,

    /// Initial height (overrides the config file).
    #[arg(long)]
    pub height: Option<f64>,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build the model, run the session and write the transcript to `out`.
///
/// The transcript recorded before a failing step is still written.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = model_config(&cli)?;
    let model = TriangleModel::from_config(&config)?;
    tracing::info!(
        message = "demo.start",
        base = config.base,
        height = config.height,
        max_side = config.max_side
    );

    let script = read_script(cli.script.as_ref())?;
    let mut session = Session::new(&model);
    let outcome = session.run_script(&script);

    for line in session.transcript() {
        writeln!(out, "{line}")?;
    }
    outcome?;
    Ok(())
}

fn model_config(cli: &Cli) -> Result<ModelConfig> {
    let mut config = match &cli.config {
        Some(path) => ModelConfig::load(path)?,
        None => ModelConfig::default(),
    };
    if let Some(base) = cli.base {
        config.base = base;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    config.validate()?;
    Ok(config)
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path {
        None => Ok(DEFAULT_SCRIPT.to_owned()),
        Some(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(path) => {
            if !path.is_file() {
                return Err(DemoError::invalid(format!(
                    "script is not a file: {}",
                    path.display()
                )));
            }
            Ok(std::fs::read_to_string(path)?)
        }
    }
}
