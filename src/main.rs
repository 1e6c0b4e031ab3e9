mod commands;
mod error;

use std::env;
use std::path::PathBuf;
use std::process;

use chrono::Local;
use praise::Config;
use tracing_subscriber::EnvFilter;

use commands::Command;
use error::CliError;

fn load_config(path: Option<PathBuf>) -> Result<Config, CliError> {
    let path = path.or_else(|| env::var_os("PRAISE_CONFIG").map(PathBuf::from));
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::default()),
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let mut args: Vec<String> = env::args().skip(1).collect();

    // Parse flags
    let mut config_path = None;
    if args.first().map(String::as_str) == Some("--config") {
        if args.len() < 2 {
            eprintln!("Usage: praise --config <file> <command> [args...]");
            process::exit(1);
        }
        config_path = Some(PathBuf::from(args[1].clone()));
        args.drain(..2);
    }

    if args.is_empty() || args[0] == "--help" || args[0] == "-h" {
        eprintln!("{}", commands::USAGE);
        process::exit(if args.is_empty() { 1 } else { 0 });
    }

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    init_logging(&config);

    let result = Command::parse(&args)
        .and_then(|command| commands::run(&config, command, Local::now().date_naive()));

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(CliError::Usage(usage)) => {
            eprintln!("{}", usage);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
