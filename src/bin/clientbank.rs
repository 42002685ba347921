//! Command-line interface for clientbank
//!
//! Parses a 1C client bank exchange file (or, with `--properties`, a sectioned
//! properties file) and prints it in the requested format.
//!
//! Usage:
//!   clientbank `<path>` [--format `<format>`] [--config `<file>`]
//!   clientbank --properties `<path>` [--format `<format>`]
//!
//! Settings come from the built-in defaults, then `clientbank.toml` in the
//! working directory, then `--config`, then `--format`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use clientbank::config::{ClientbankConfig, Loader};
use clientbank::location::SourceLocation;
use clientbank::{exchange, properties, Error, OutputFormat, Result};
use tracing_subscriber::prelude::*;

fn main() {
    let matches = Command::new("clientbank")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse 1C client bank exchange files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the file to parse")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(OutputFormat::ALL.map(|format| format.name())),
        )
        .arg(
            Arg::new("properties")
                .long("properties")
                .short('p')
                .help("Parse the file as sectioned properties")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in settings"),
        )
        .get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    init_logging(&config);

    match run(&matches, &config) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(path) = matches.get_one::<String>("path") {
                print_source_line(path, &e);
            }
            std::process::exit(1);
        }
    }
}

/// Show the line a parse error points at, with a marker under the column
fn print_source_line(path: &str, error: &Error) {
    let Some(parse_error) = error.as_parse_error() else {
        return;
    };
    let Ok(source) = std::fs::read_to_string(path) else {
        return;
    };
    let position = parse_error.position;
    if let Some(line) = SourceLocation::new(&source).line_text(position.line) {
        let line = line.trim_start_matches('\u{feff}');
        eprintln!("{:>5} | {}", position.line, line);
        eprintln!("{:>5} | {}^", "", " ".repeat(position.column.saturating_sub(1)));
    }
}

fn load_config(matches: &ArgMatches) -> Result<ClientbankConfig> {
    let mut loader = Loader::new().with_directory(".");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    let format = matches
        .get_one::<String>("format")
        .and_then(|name| name.parse::<OutputFormat>().ok());
    if let Some(format) = format {
        loader = loader.with_output_format(format)?;
    }
    Ok(loader.build()?)
}

/// Logs go to stderr; `RUST_LOG` wins over the configured level
fn init_logging(config: &ClientbankConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(matches: &ArgMatches, config: &ClientbankConfig) -> Result<String> {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default();
    let format = config.output.format;
    tracing::debug!(path, %format, "running");

    if matches.get_flag("properties") {
        format.write(&properties::parse_file(path)?)
    } else {
        format.write(&exchange::parse_file(path)?)
    }
}
