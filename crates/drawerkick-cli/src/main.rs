// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// drawerkick — open a receipt printer's cash drawer.
//
// Entry point. Loads settings, initialises logging, creates the data
// directory, then runs one command against the platform's print subsystem.
//
// Exit status: 0 success, 1 the drawer (or the command) failed, 2 invalid
// arguments.

mod output;
mod services;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use drawerkick_core::error::Result;
use drawerkick_core::human_errors::humanize_error;
use drawerkick_core::{DrawerError, DrawerOptions};
use serde::Serialize;

use services::app_services::{AppServices, load_settings};
use services::data_dir;

const EXIT_FAILED: u8 = 1;
const EXIT_USAGE: u8 = 2;

/// Open a receipt printer's cash drawer.
#[derive(Parser)]
#[command(name = "drawerkick", version, about = "drawerkick — cash drawer kick for receipt printers")]
struct Cli {
    /// Settings directory (defaults to the per-user data directory).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send the drawer pulse to a printer.
    Open(OpenArgs),
    /// List installed printers with status and connection type.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print the error-code table.
    Codes {
        #[arg(long)]
        json: bool,
    },
    /// Show or change saved settings.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args)]
struct OpenArgs {
    /// Printer name exactly as installed.
    printer: String,

    /// Drawer connector pin (0 = pin 2, 1 = pin 5).
    #[arg(long, allow_negative_numbers = true)]
    pin: Option<i64>,

    /// Pulse on time, in units of 2 ms.
    #[arg(long = "pulse-on", allow_negative_numbers = true)]
    pulse_on: Option<i64>,

    /// Pulse off time, in units of 2 ms.
    #[arg(long = "pulse-off", allow_negative_numbers = true)]
    pulse_off: Option<i64>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective settings as JSON.
    Show,
    /// Update saved settings; omitted flags keep their current value.
    Set(ConfigSetArgs),
}

#[derive(Args)]
struct ConfigSetArgs {
    #[arg(long, allow_negative_numbers = true)]
    pin: Option<i64>,
    #[arg(long = "pulse-on", allow_negative_numbers = true)]
    pulse_on: Option<i64>,
    #[arg(long = "pulse-off", allow_negative_numbers = true)]
    pulse_off: Option<i64>,
    /// Directory for CUPS spool files.
    #[arg(long)]
    spool_dir: Option<PathBuf>,
    /// Default log filter (overridden by RUST_LOG).
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let dir = cli.data_dir.clone().unwrap_or_else(data_dir::data_dir);
    let config = load_settings(&dir);

    // Logs go to stderr so `--json` output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(data_dir = %dir.display(), "drawerkick starting");
    if let Err(e) = data_dir::ensure(&dir) {
        tracing::warn!(path = %dir.display(), error = %e, "could not create data directory");
    }

    let mut svc = AppServices::with_config(dir, config);
    match run(cli.command, &mut svc).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            let human = humanize_error(&e);
            eprintln!("error: {e}\n{}\n{}", human.message, human.suggestion);
            if matches!(e, DrawerError::Usage(_)) {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::from(EXIT_FAILED)
            }
        }
    }
}

async fn run(command: Commands, svc: &mut AppServices) -> Result<ExitCode> {
    match command {
        Commands::Open(args) => open(args, svc).await,
        Commands::List { json } => {
            let printers = svc.drawer().get_available_printers().await;
            if json {
                print_json(&printers)?;
            } else {
                print!("{}", output::render_printers(&printers));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Codes { json } => {
            if json {
                print_json(&output::code_rows())?;
            } else {
                print!("{}", output::render_codes());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config(ConfigCommand::Show) => {
            print_json(svc.config())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config(ConfigCommand::Set(args)) => {
            let mut config = svc.config().clone();
            let options = DrawerOptions {
                pin: args.pin,
                pulse_on_time: args.pulse_on,
                pulse_off_time: args.pulse_off,
            };
            config.drawer = options.resolve(config.drawer)?;
            if let Some(dir) = args.spool_dir {
                config.spool_dir = Some(dir);
            }
            if let Some(filter) = args.log_filter {
                config.log_filter = filter;
            }
            svc.save_config(config)?;
            tracing::info!(path = %svc.config_path().display(), "settings saved");
            print_json(svc.config())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn open(args: OpenArgs, svc: &AppServices) -> Result<ExitCode> {
    let options = DrawerOptions {
        pin: args.pin,
        pulse_on_time: args.pulse_on,
        pulse_off_time: args.pulse_off,
    };

    let result = match svc.drawer().open_cash_drawer(&args.printer, Some(options)).await {
        Ok(result) => result,
        Err(usage) if args.json => {
            // Hosts reading JSON always get a result object.
            print_json(&usage.to_operation_result())?;
            return Ok(ExitCode::from(EXIT_USAGE));
        }
        Err(usage) => return Err(usage.into()),
    };

    if args.json {
        print_json(&result)?;
    } else if result.success {
        print!("{}", output::render_result(&args.printer, &result));
    } else {
        eprint!("{}", output::render_result(&args.printer, &result));
    }

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILED)
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
