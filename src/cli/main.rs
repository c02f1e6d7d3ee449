//! Command-line interface entry point for the grade book

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use grade_book::config::Config;
use grade_book::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use grade_book::{error, info};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command.unwrap_or(Command::Menu) {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Menu => run_menu(&config),
        command => commands::roster::run(command, &config),
    }
}

/// Load, run the interactive menu, then save on exit
fn run_menu(config: &Config) {
    let mut book = match commands::load_book(config) {
        Ok(book) => book,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = commands::menu::run_interactive(&mut book) {
        error!("Menu aborted: {e}");
        eprintln!("✗ Menu aborted: {e}");
    }

    if let Err(e) = commands::save_book(&book, config) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
