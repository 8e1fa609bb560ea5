//! Tests for API URL resolution, operation mode, and initial filters.

use std::time::Duration;

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use crate::ReporteroConfig;
use crate::config::OperationMode;
use crate::report::{FilterField, ReportError};

#[fixture]
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 8).expect("date should be valid")
}

#[rstest]
fn require_api_url_returns_value_when_present() {
    let config = ReporteroConfig {
        api_url: Some("http://localhost:3000/api".to_owned()),
        ..Default::default()
    };

    assert_eq!(config.require_api_url().ok(), Some("http://localhost:3000/api"));
}

#[rstest]
#[case::missing(None)]
#[case::blank(Some("  "))]
fn require_api_url_rejects_missing_url(#[case] api_url: Option<&str>) {
    let config = ReporteroConfig {
        api_url: api_url.map(ToOwned::to_owned),
        ..Default::default()
    };

    assert!(matches!(
        config.require_api_url(),
        Err(ReportError::Configuration { .. })
    ));
}

#[rstest]
#[case::generate(false, OperationMode::Generate)]
#[case::tui(true, OperationMode::Tui)]
fn operation_mode_follows_tui_flag(#[case] tui: bool, #[case] expected: OperationMode) {
    let config = ReporteroConfig {
        tui,
        ..Default::default()
    };

    assert_eq!(config.operation_mode(), expected);
}

#[rstest]
#[case::unset(None, None)]
#[case::zero(Some(0), None)]
#[case::thirty(Some(30), Some(Duration::from_secs(30)))]
fn request_timeout_ignores_zero(#[case] seconds: Option<u64>, #[case] expected: Option<Duration>) {
    let config = ReporteroConfig {
        request_timeout_seconds: seconds,
        ..Default::default()
    };

    assert_eq!(config.request_timeout(), expected);
}

#[rstest]
fn unset_dates_default_to_today(today: NaiveDate) {
    let filters = ReporteroConfig::default()
        .initial_filters(today)
        .expect("filters should build");

    assert_eq!(filters.date_range(), ("2024-03-08", "2024-03-08"));
    assert_eq!(filters.active_count(), 2);
}

#[rstest]
fn explicit_empty_date_stays_empty(today: NaiveDate) {
    let config = ReporteroConfig {
        end_date: Some(String::new()),
        ..Default::default()
    };

    let filters = config.initial_filters(today).expect("filters should build");

    assert!(!filters.has_date_range());
}

#[rstest]
fn invalid_date_is_configuration_error(today: NaiveDate) {
    let config = ReporteroConfig {
        start_date: Some("01/03/2024".to_owned()),
        ..Default::default()
    };

    assert!(matches!(
        config.initial_filters(today),
        Err(ReportError::Configuration { .. })
    ));
}

#[rstest]
#[case::garbage_start("startDate=garbage")]
#[case::path_in_end("endDate=../x")]
fn invalid_date_assignment_is_configuration_error(today: NaiveDate, #[case] assignments: &str) {
    let config = ReporteroConfig {
        filters: Some(assignments.to_owned()),
        ..Default::default()
    };

    assert!(matches!(
        config.initial_filters(today),
        Err(ReportError::Configuration { .. })
    ));
}

#[rstest]
fn valid_date_assignment_overrides_default(today: NaiveDate) {
    let config = ReporteroConfig {
        filters: Some("startDate=2024-02-01".to_owned()),
        ..Default::default()
    };

    let filters = config.initial_filters(today).expect("filters should build");

    assert_eq!(filters.date_range(), ("2024-02-01", "2024-03-08"));
}

#[rstest]
fn filter_assignments_are_applied(today: NaiveDate) {
    let config = ReporteroConfig {
        filters: Some("surveyStatus=successful,age_range=25-34".to_owned()),
        ..Default::default()
    };

    let filters = config.initial_filters(today).expect("filters should build");

    assert_eq!(filters.get(FilterField::SurveyStatus), "successful");
    assert_eq!(filters.get(FilterField::AgeRange), "25-34");
}

#[rstest]
fn gateway_config_carries_connection_settings() {
    let config = ReporteroConfig {
        api_url: Some("http://localhost:3000/api".to_owned()),
        token: Some("jwt".to_owned()),
        request_timeout_seconds: Some(5),
        ..Default::default()
    };

    let gateway = config.gateway_config().expect("gateway config should build");

    assert_eq!(gateway.base_url, "http://localhost:3000/api");
    assert_eq!(gateway.token.as_deref(), Some("jwt"));
    assert_eq!(gateway.timeout, Some(Duration::from_secs(5)));
}

#[rstest]
#[case::default(None, ".")]
#[case::blank(Some(" "), ".")]
#[case::set(Some("reportes"), "reportes")]
fn output_dir_defaults_to_current_directory(#[case] output: Option<&str>, #[case] expected: &str) {
    let config = ReporteroConfig {
        output: output.map(ToOwned::to_owned),
        ..Default::default()
    };

    assert_eq!(config.output_dir(), expected);
}
