use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zcalc::calculator::parse_key;
use zcalc::{Config, Session};

/// Press calculator buttons and print the display.
#[derive(Parser, Debug)]
#[command(name = "zcalc", version, about)]
struct Cli {
    /// Button labels to press in order, e.g. `12 + 3 =`.
    /// Digits, `.`, `+ - * / × ÷`, `=`, `AC`, `DEL`.
    #[arg(allow_hyphen_values = true)]
    keys: Vec<String>,

    /// Print the display after every button.
    #[arg(long)]
    steps: bool,

    /// Print the final calculator state as JSON instead of the display.
    #[arg(long)]
    json: bool,

    /// Config file to use instead of ~/.config/zcalc/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_default().context("Failed to load config")?,
    };

    init_logging(&config.logging.level);

    let mut session = Session::with_grouping(config.grouping());
    for key in &cli.keys {
        let intents = parse_key(key).with_context(|| format!("Cannot press {key:?}"))?;
        session.dispatch_all(intents);

        if cli.steps && !cli.json {
            println!("[{key}]");
            println!("{}", session.display());
        }
    }

    if cli.json {
        let json = serde_json::to_string_pretty(session.state())
            .context("Failed to serialize calculator state")?;
        println!("{json}");
    } else if !cli.steps {
        println!("{}", session.display());
    }

    Ok(())
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
