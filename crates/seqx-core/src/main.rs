//! seqx: export SEQ[100] tags from a controller into a ZIP archive.
//!
//! Connection parameters resolve CLI flag → settings file → hard failure.
//! Exit codes: 0 success, 1 export failed after all retries, 2 unusable
//! configuration (never retried).

use clap::Parser;
use seqx_core::error::ExportError;
use seqx_core::export::{run_export, ExportOptions, ExportSummary};
use seqx_core::logging::init_logging;
use seqx_driver::{ConnectionParams, RouteConnector};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Export SEQ[100] tags to JSON documents bundled into a ZIP archive.
#[derive(Parser, Debug)]
#[command(name = "seqx", version, about)]
struct Cli {
    /// Controller IP address.
    #[arg(long)]
    ip: Option<String>,

    /// Ethernet module slot number.
    #[arg(long)]
    eth_slot: Option<u16>,

    /// CPU module slot number.
    #[arg(long)]
    cpu_slot: Option<u16>,

    /// Output directory for the archive and diagnostics.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Include program-scoped tags (Program:*.Tag).
    #[arg(long)]
    include_program_tags: bool,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn resolve_options(cli: &Cli) -> Result<ExportOptions, ExportError> {
    let settings_path = seqx_config::default_settings_path();
    let settings = seqx_config::load_or_init(&settings_path)
        .map_err(|err| ExportError::Configuration(format!("cannot load settings: {err}")))?;

    let ip = cli
        .ip
        .clone()
        .filter(|ip| !ip.is_empty())
        .or_else(|| Some(settings.ip.clone()).filter(|ip| !ip.is_empty()))
        .ok_or_else(|| {
            ExportError::Configuration(
                "missing connection settings: set ip in settings.json or pass --ip".to_string(),
            )
        })?;
    let eth_slot = cli.eth_slot.unwrap_or(settings.eth_slot);
    let cpu_slot = cli.cpu_slot.unwrap_or(settings.cpu_slot);

    // From the CLI the output directory is taken as given; from settings it
    // resolves relative to the settings file's directory.
    let out_dir = match &cli.out_dir {
        Some(dir) => dir.clone(),
        None => settings_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(&settings.out_dir),
    };

    Ok(ExportOptions {
        params: ConnectionParams {
            ip,
            eth_slot,
            cpu_slot,
        },
        out_dir,
        chunk_size: settings.chunk_size,
        pretty_json: settings.pretty_json,
        include_program_tags: cli.include_program_tags,
    })
}

fn run(cli: &Cli) -> Result<ExportSummary, ExportError> {
    let options = resolve_options(cli)?;
    run_export(&RouteConnector, &options)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(summary) => {
            println!("Exported {} tag(s).", summary.exported);
            println!("ZIP file: {}", summary.archive_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("export failed: {err}");
            match err {
                ExportError::Configuration(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
