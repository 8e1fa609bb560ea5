//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.reportero.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `REPORTERO_API_URL`, `REPORTERO_TOKEN`, ...
//! 4. **Command-line arguments** – `--api-url`/`-a`, `--start-date`/`-s`, ...
//!
//! # Configuration File
//!
//! ```toml
//! api_url = "https://encuestas.example.com/api"
//! token = "eyJhbGciOi..."
//! start_date = "2024-01-01"
//! end_date = "2024-01-31"
//! filters = "surveyStatus=successful,city=Barranquilla"
//! output = "reportes"
//! ```

use std::time::Duration;

use chrono::NaiveDate;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::report::{
    DEFAULT_PER_PAGE, DEFAULT_REPORT_PATH, FilterField, FilterState, HttpGatewayConfig,
    ReportError,
};

/// Expected format of `start_date` and `end_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Fetch one page, print it, and optionally export it.
    Generate,
    /// Interactive terminal UI.
    Tui,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use reportero::ReporteroConfig;
///
/// let config = ReporteroConfig::load().expect("failed to load configuration");
/// let api_url = config.require_api_url().expect("API URL required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "REPORTERO",
    discovery(
        dotfile_name = ".reportero.toml",
        config_file_name = "reportero.toml",
        app_name = "reportero"
    )
)]
pub struct ReporteroConfig {
    /// Base URL of the survey backend API.
    ///
    /// Can be provided via:
    /// - CLI: `--api-url <URL>` or `-a <URL>`
    /// - Environment: `REPORTERO_API_URL`
    /// - Config file: `api_url = "..."`
    #[ortho_config(cli_short = 'a')]
    pub api_url: Option<String>,

    /// Report endpoint path appended to `api_url`.
    #[ortho_config()]
    pub report_path: String,

    /// Bearer token forwarded to the backend.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `REPORTERO_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Start of the date range (`YYYY-MM-DD`). Defaults to today.
    #[ortho_config(cli_short = 's')]
    pub start_date: Option<String>,

    /// End of the date range (`YYYY-MM-DD`). Defaults to today.
    #[ortho_config(cli_short = 'e')]
    pub end_date: Option<String>,

    /// Extra filters as `key=value` pairs separated by commas, e.g.
    /// `surveyStatus=successful,willingToRespond=true`.
    #[ortho_config(cli_short = 'f')]
    pub filters: Option<String>,

    /// Page to fetch in generate mode (1-based).
    #[ortho_config(cli_short = 'p')]
    pub page: u32,

    /// Rows per page for the session.
    #[ortho_config()]
    pub per_page: u32,

    /// Writes the fetched page to CSV in generate mode.
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so use `--export` or `export = true`.
    #[ortho_config(cli_short = 'x')]
    pub export: bool,

    /// Directory that receives CSV exports. Defaults to the current
    /// directory.
    #[ortho_config(cli_short = 'o')]
    pub output: Option<String>,

    /// Launches the interactive terminal UI.
    #[ortho_config(cli_short = 'T')]
    pub tui: bool,

    /// Writes telemetry events to stderr as JSON lines.
    #[ortho_config()]
    pub telemetry: bool,

    /// Transport timeout for report requests, in seconds. Unset waits
    /// indefinitely.
    #[ortho_config()]
    pub request_timeout_seconds: Option<u64>,
}

const DEFAULT_PAGE: u32 = 1;

impl Default for ReporteroConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            report_path: DEFAULT_REPORT_PATH.to_owned(),
            token: None,
            start_date: None,
            end_date: None,
            filters: None,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            export: false,
            output: None,
            tui: false,
            telemetry: false,
            request_timeout_seconds: None,
        }
    }
}

impl ReporteroConfig {
    /// Returns the API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] when no URL is configured.
    pub fn require_api_url(&self) -> Result<&str, ReportError> {
        self.api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ReportError::Configuration {
                message: "report API URL is required (use --api-url or REPORTERO_API_URL)"
                    .to_owned(),
            })
    }

    /// Determines the operation mode based on configuration.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.tui {
            OperationMode::Tui
        } else {
            OperationMode::Generate
        }
    }

    /// Returns the transport timeout, if one is configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }

    /// Returns the page to fetch, treating zero as the first page.
    #[must_use]
    pub fn start_page(&self) -> u32 {
        self.page.max(1)
    }

    /// Returns the directory that receives CSV exports.
    #[must_use]
    pub fn output_dir(&self) -> &str {
        self.output
            .as_deref()
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or(".")
    }

    /// Builds the gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] when no API URL is configured.
    pub fn gateway_config(&self) -> Result<HttpGatewayConfig, ReportError> {
        Ok(HttpGatewayConfig::new(self.require_api_url()?)
            .with_report_path(self.report_path.as_str())
            .with_token(self.token.clone())
            .with_timeout(self.request_timeout()))
    }

    /// Builds the filters the session starts with.
    ///
    /// Unset dates default to `today`. An explicitly empty date stays empty.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] when a date is not
    /// `YYYY-MM-DD`, and the errors of [`FilterState::apply_assignments`]
    /// when `filters` is malformed.
    pub fn initial_filters(&self, today: NaiveDate) -> Result<FilterState, ReportError> {
        let today_text = today.format(DATE_FORMAT).to_string();
        let start_date = self.start_date.clone().unwrap_or_else(|| today_text.clone());
        let end_date = self.end_date.clone().unwrap_or(today_text);

        let mut filters = FilterState::with_date_range(start_date, end_date);
        if let Some(assignments) = &self.filters {
            filters.apply_assignments(assignments)?;
        }

        for field in [FilterField::StartDate, FilterField::EndDate] {
            let value = filters.get(field);
            if !value.is_empty() && NaiveDate::parse_from_str(value, DATE_FORMAT).is_err() {
                return Err(ReportError::Configuration {
                    message: format!("{field} must be a YYYY-MM-DD date, got '{value}'"),
                });
            }
        }
        Ok(filters)
    }
}

#[cfg(test)]
mod tests;
