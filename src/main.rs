use imgsort::cli::{AppConfig, Args};
use imgsort::{ImgSortError, Session, TerminalViewer};

use std::io;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse command line arguments
    let config: AppConfig = Args::parse_args().into();

    init_tracing(&config);

    if config.dry_run {
        println!("[DRY RUN] No files will be moved or copied");
    }

    match run_app_with_config(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ImgSortError::Interrupted) => {
            println!();
            ExitCode::from(130)
        }
        Err(e) => {
            error!(error = %e, "aborting");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up stderr logging; RUST_LOG overrides the verbosity flags
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs the prompt/sort loop on the real console.
///
/// The viewer is dropped before returning, which restores the terminal if an
/// error left the image window open.
pub fn run_app_with_config(config: &AppConfig) -> imgsort::Result<()> {
    let stdin = io::stdin();
    let mut session = Session::new(
        stdin.lock(),
        io::stdout(),
        TerminalViewer::new(),
        config.action_options(),
    );

    session.run()
}
