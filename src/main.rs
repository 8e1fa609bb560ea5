//! Reportero CLI entrypoint for survey report generation.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;
use ortho_config::OrthoConfig;
use reportero::telemetry::{
    NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink, init_tracing,
};
use reportero::{OperationMode, ReportError, ReporteroConfig};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ReportError> {
    let config = load_config()?;
    let mode = config.operation_mode();

    // The TUI owns the terminal, so log lines would corrupt the screen.
    if mode == OperationMode::Generate {
        init_tracing();
    }

    let telemetry: Arc<dyn TelemetrySink> = if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    };
    let filters = config.initial_filters(Local::now().date_naive())?;

    match mode {
        OperationMode::Generate => cli::generate::run(&config, filters, telemetry).await,
        OperationMode::Tui => cli::report_tui::run(&config, filters, telemetry).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ReportError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ReporteroConfig, ReportError> {
    ReporteroConfig::load().map_err(|error| ReportError::Configuration {
        message: error.to_string(),
    })
}
