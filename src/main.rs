//! storagewiz - Main entry point
//!
//! Launches the interactive wizard or runs one of the headless commands.

use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use storagewiz::app::App;
use storagewiz::cli::{Cli, Commands};
use storagewiz::error::WizardError;
use storagewiz::headless::{self, CheckReport};
use storagewiz::providers::ProviderCatalog;
use storagewiz::remote::MockBackend;
use storagewiz::settings::WizardSettings;
use storagewiz::wizard::WizardController;

/// Where log output goes
enum LogTarget {
    Stderr,
    File(PathBuf),
    /// TUI without a log file: output would corrupt the alternate screen
    Discard,
}

/// Initializes tracing with environment-based filtering (`RUST_LOG`, default `info`).
fn init_tracing(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match target {
        LogTarget::Stderr => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogTarget::File(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init()
        }
        LogTarget::Discard => registry
            .with(fmt::layer().with_writer(std::io::sink))
            .init(),
    }
    Ok(())
}

fn load_settings(cli: &Cli, catalog: &ProviderCatalog) -> Result<WizardSettings> {
    let mut settings = match &cli.settings {
        Some(path) => WizardSettings::load_from_file(path)?,
        None => WizardSettings::default(),
    };
    cli.apply_overrides(&mut settings);
    settings.validate(catalog).context("Invalid settings")?;
    Ok(settings)
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let interactive = matches!(cli.command, None | Some(Commands::Wizard));
    let log_target = match (&cli.log_file, interactive) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => LogTarget::Discard,
        (None, false) => LogTarget::Stderr,
    };
    init_tracing(log_target)?;
    info!(version = env!("CARGO_PKG_VERSION"), "storagewiz starting up");

    // A malformed catalog is a programming error; refuse to start
    let catalog = ProviderCatalog::standard().context("Provider catalog is misconfigured")?;

    let settings = load_settings(&cli, &catalog)?;
    debug!(?settings, "settings loaded");

    match cli.command {
        None | Some(Commands::Wizard) => run_tui(catalog, settings)?,
        Some(Commands::Check { values }) => run_check(&values, &catalog, &settings)?,
        Some(Commands::Providers { provider }) => {
            println!("{}", headless::catalog_json(&catalog, provider)?);
        }
    }

    Ok(())
}

/// Run the interactive wizard
fn run_tui(catalog: ProviderCatalog, settings: WizardSettings) -> Result<()> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| WizardError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| WizardError::terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| WizardError::terminal(format!("Failed to create terminal: {}", e)))?;

    let validator = Arc::new(MockBackend::new(settings.remote_delay()));
    let mut app = App::new(WizardController::new(catalog, validator, settings));
    let result = app.run(&mut terminal);

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result.map_err(Into::into)
}

/// Validate a values file and print the destination JSON
fn run_check(path: &Path, catalog: &ProviderCatalog, settings: &WizardSettings) -> Result<()> {
    info!("Checking form values from {:?}", path);
    let values = headless::load_values(path)?;
    let validator = Arc::new(MockBackend::new(settings.remote_delay()));

    match headless::check_values(&values, catalog, validator, settings.remote_timeout())? {
        CheckReport::Accepted(descriptor) => {
            println!("{}", descriptor.to_json()?);
            Ok(())
        }
        CheckReport::Rejected { source, errors } => {
            warn!(?source, fields = errors.len(), "form values rejected");
            for (field, message) in &errors {
                eprintln!("✗ {}: {}", field, message);
            }
            Err(WizardError::validation(format!("{} field(s) rejected", errors.len())).into())
        }
    }
}
