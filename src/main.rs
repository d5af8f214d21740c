//! Configuration inspection CLI.
//!
//! ```text
//! safe-config check   <file>                         validate a TOML file
//! safe-config get     <file> <Dotted.Path> [--kind]  read one value, never fails on absent paths
//! safe-config summary <file>                         log the configuration summary
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand, ValueEnum};

use safe_config::config::{load_config, read_config, validate_config, ConfigError};
use safe_config::observability::formatter::global_formatter;
use safe_config::observability::{
    force_log_config_change, init_logging, ChangeEvent, Environment, EventKind,
};

#[derive(Parser)]
#[command(name = "safe-config")]
#[command(about = "Inspect and validate application configuration files", long_about = None)]
struct Cli {
    /// Default log level when RUST_LOG is unset
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a configuration file
    Check { file: PathBuf },
    /// Read a single value by dotted field path (e.g. Monitoring.Metrics.Endpoint)
    Get {
        file: PathBuf,
        path: String,

        /// Value printed when the path is absent or of another kind
        #[arg(short, long)]
        default: Option<String>,

        #[arg(short, long, value_enum, default_value_t = Kind::String)]
        kind: Kind,
    },
    /// Print the configuration summary through the change logger
    Summary { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Bool,
    Int,
    Float,
    String,
    DurationMs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Check { file } => {
            let config = read_config(&file)?;
            let started = Instant::now();
            let result = validate_config(&config);
            global_formatter().log_validation(&result, started.elapsed());
            result.map_err(ConfigError::Validation)?;
            println!("{}: ok ({} {})", file.display(), config.name, config.environment);
        }
        Commands::Get { file, path, default, kind } => {
            let config = load_config(&file)?;
            let node = config.safe().path(&path);
            let raw = default.as_deref();

            let rendered = match kind {
                Kind::Bool => node.bool(parse_default(raw)?).to_string(),
                Kind::Int => node.int(parse_default(raw)?).to_string(),
                Kind::Float => node.float(parse_default(raw)?).to_string(),
                Kind::String => node.string(raw.unwrap_or_default()).to_string(),
                Kind::DurationMs => {
                    let fallback = Duration::from_millis(parse_default(raw)?);
                    node.duration(fallback).as_millis().to_string()
                }
            };
            println!("{}", rendered);
        }
        Commands::Summary { file } => {
            let config = load_config(&file)?;
            let event = ChangeEvent::new(EventKind::Started, file.display().to_string())
                .with_environment(config.environment)
                .with_config_path(file.display().to_string());
            force_log_config_change(&event, &config);

            let safe = config.safe();
            if safe.server().is_present() {
                let endpoint = format!("{}:{}", safe.server().host(""), safe.get_server_port(0));
                global_formatter().log_service_startup(
                    &config.name,
                    &endpoint,
                    Environment::detect(),
                    &config.version,
                );
            }
        }
    }

    Ok(())
}

/// Parse `--default` for the requested kind; absent means the type's zero value.
fn parse_default<T>(raw: Option<&str>) -> Result<T, Box<dyn Error>>
where
    T: FromStr + Default,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(T::default()),
        Some(text) => text
            .parse()
            .map_err(|e| format!("invalid --default {:?}: {}", text, e).into()),
    }
}
