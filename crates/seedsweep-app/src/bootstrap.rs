//! Boot sequence for the sweep agent: load settings, install logging, wire
//! the remote console, and run one sweep cycle.

use std::path::Path;

use seedsweep_config::AppSettings;
use seedsweep_telemetry::{LogFormat, LoggingConfig};
use seedsweep_transmission::{ConnectProfile, ShellRunner, TransmissionConsole};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::sweep::{SweepEngine, SweepSettings};

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Entry point for the sweep agent.
///
/// # Errors
///
/// Returns an error when configuration loading, logging installation, or
/// the sweep itself fails.
pub async fn run_app(config_path: Option<&Path>) -> AppResult<()> {
    let settings =
        seedsweep_config::load(config_path).map_err(|err| AppError::config("config.load", err))?;
    run_app_with(&settings).await
}

/// Boot sequence over already-loaded settings to simplify testing.
pub(crate) async fn run_app_with(settings: &AppSettings) -> AppResult<()> {
    seedsweep_telemetry::init_logging(&logging_config(settings))
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;

    info!(
        host = %settings.ip_address,
        port = settings.port,
        "sweep agent configured"
    );

    let media_gate = settings
        .media_gate()
        .map_err(|err| AppError::config("config.media_gate", err))?;
    let console = TransmissionConsole::new(ShellRunner::new(), &connect_profile(settings));
    let engine = SweepEngine::new(
        console,
        SweepSettings {
            thresholds: settings.thresholds(),
            policy: settings.error_policy,
            media_gate,
            app_version: APP_VERSION,
        },
    );
    let report = engine.run().await?;
    if report.failures.is_empty() {
        Ok(())
    } else {
        Err(AppError::SweepIncomplete {
            failed: report.failures.len(),
        })
    }
}

fn connect_profile(settings: &AppSettings) -> ConnectProfile {
    ConnectProfile {
        host: settings.ip_address.clone(),
        port: settings.port,
        login: settings.login.clone(),
        password: settings.password.clone(),
    }
}

fn logging_config(settings: &AppSettings) -> LoggingConfig<'_> {
    LoggingConfig {
        level: &settings.log_level,
        format: LogFormat::infer(),
        log_file: settings.log_file_path.as_deref(),
    }
}
