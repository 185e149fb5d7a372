use std::io;

use when4meet::storage::Config;

mod cli;
use cli::{CliMode, USAGE, parse_cli_mode, run_create_mode, run_users_mode, run_week_mode};
mod tui;
use tui::run_tui;

fn main() -> Result<(), io::Error> {
    setup_logging();

    let cli_mode = match parse_cli_mode() {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    if cli_mode == CliMode::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = match Config::load_or_create() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            tracing::error!("Loading config failed: {}", e);
            return Ok(());
        }
    };

    match cli_mode {
        CliMode::Create { name, dates } => run_create_mode(&config, &name, &dates),
        CliMode::Users => run_users_mode(&config),
        CliMode::Week { user, date } => run_week_mode(&config, &user, date),
        CliMode::Session { user, event } => run_tui(config, user, event),
        CliMode::Help => Ok(()),
    }
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "when4meet.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("when4meet started");
}
