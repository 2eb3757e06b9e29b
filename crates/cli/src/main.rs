use std::{fs::File, io::stderr};

use clap::{ArgAction, Parser};
use commands::Commands;
use peacock_options::OptionsError;
use peacock_telemetry::TelemetryConfig;
use tracing::{debug, info};

mod commands;
mod config;
mod logs;
pub mod output;

pub use self::config::Options;
use crate::{
    config::{Config, KnownDirs},
    logs::LogsDb,
};

#[derive(Parser)]
#[command(
    name = "peacock-launcher",
    version,
    about = "Starts the Peacock patcher, the Peacock server and HITMAN in one go",
    propagate_version = true,
    flatten_help = true
)]
struct Cli {
    #[clap(flatten)]
    config: Options,

    /// Don't show warnings and errors on the console.
    #[clap(short, long, global = true, action = ArgAction::SetTrue)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn open_log_file(config: &Config) -> Option<File> {
    let log_dir = config.log_dir()?;
    let log_file_path = LogsDb::new(log_dir)
        .create_log_file()
        .inspect_err(|error| eprintln!("couldn't prepare log folder: {error}"))
        .ok()?;

    File::create(&log_file_path)
        .inspect_err(|error| eprintln!("couldn't create {log_file_path:?}: {error}"))
        .ok()
}

/// Process exit status for a failed command.
fn exit_code(error: &color_eyre::Report) -> i32 {
    error
        .downcast_ref::<OptionsError>()
        .map_or(1, OptionsError::exit_code)
}

fn main() {
    peacock_telemetry::install_error_handler();

    let cli = Cli::parse();

    let config = Config {
        known_dirs: KnownDirs::discover(),
        options: cli.config,
    };

    let mut telemetry_config = TelemetryConfig::default();

    if !cli.quiet {
        telemetry_config = telemetry_config.with_console_writer(stderr);
    }

    if let Some(log_file) = open_log_file(&config) {
        telemetry_config = telemetry_config.with_file_writer(log_file);
    }

    let telemetry_guard = peacock_telemetry::install(telemetry_config);

    info!(version = env!("CARGO_PKG_VERSION"));
    debug!(known_dirs = ?config.known_dirs);

    let pause_on_error = config.pause_on_error();
    let command = cli.command.unwrap_or_default();

    let result =
        peacock_telemetry::with_root_span("peacock-launcher", "run command", || match command {
            Commands::Launch(args) => commands::launch::launch(config, args),
            Commands::Info => commands::info::info(config),
            Commands::Schema => commands::schema::schema(),
        });

    if let Err(error) = result {
        let message = format!("{error:#}");
        info!(%message, "command failed");
        println!("Error: {message}");
        output::acknowledge(pause_on_error);

        let code = exit_code(&error);
        drop(telemetry_guard);
        std::process::exit(code);
    }
}
