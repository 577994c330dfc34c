use clap::{Arg, ArgAction, Command as ClapCommand};
use log::{error, LevelFilter};
use std::process;

use stripkit::commands::{CommandFactory, StripkitCommandFactory};
use stripkit::config::ReaderConfig;
use stripkit::utils::logger::Logger;

fn build_cli() -> ClapCommand {
    ClapCommand::new("stripkit")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Inspect TIFF/BigTIFF structure and decode LZW strips")
        .arg(
            Arg::new("input")
                .help("Input TIFF file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print every directory entry and enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strip")
                .short('s')
                .long("strip")
                .help("Decode the strip with this index")
                .value_name("INDEX")
                .required(false),
        )
        .arg(
            Arg::new("all-strips")
                .short('a')
                .long("all-strips")
                .help("Decode every strip")
                .action(ArgAction::SetTrue)
                .conflicts_with("strip"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write decoded sample bytes to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write log output to this file instead of the console")
                .value_name("FILE")
                .required(false),
        )
}

fn init_logging(level: LevelFilter, log_file: Option<&String>) {
    match log_file {
        Some(path) => {
            if let Err(e) = Logger::init_global_logger(path, level) {
                eprintln!("Error setting up log file {}: {}", path, e);
                process::exit(1);
            }
        }
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .init();
        }
    }
}

fn main() {
    let matches = build_cli().get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => match ReaderConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading configuration: {}", e);
                process::exit(1);
            }
        },
        None => ReaderConfig::default(),
    };

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        config.log_level.as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Warn)
    };
    init_logging(level, matches.get_one::<String>("log-file"));

    let factory = StripkitCommandFactory::new();
    let command = match factory.create_command(&matches, &config) {
        Ok(command) => command,
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = command.execute() {
        error!("Command execution error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
