//! End-to-end CSV export against a mock report service.

use std::sync::Arc;

use camino::Utf8PathBuf;
use reportero::export::{CSV_HEADERS, NOTHING_TO_EXPORT};
use reportero::{
    FetchOutcome, FilterState, HttpGatewayConfig, HttpReportGateway, NotificationLevel,
    NotificationLog, ReportController, save_csv,
};
use rstest::rstest;
use wiremock::MockServer;

mod support;

use support::report_service::mount_report;

fn controller_for(server: &MockServer) -> ReportController {
    let gateway = HttpReportGateway::new(&HttpGatewayConfig::new(server.uri()))
        .expect("gateway should build");
    ReportController::new(
        Arc::new(gateway),
        FilterState::with_date_range("2024-01-01", "2024-01-31"),
    )
    .with_per_page(50)
}

fn temp_output_dir() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 temp path");
    (dir, path)
}

#[rstest]
#[tokio::test]
async fn exports_second_page_with_page_relative_numbering() {
    let server = MockServer::start().await;
    mount_report(&server, 50, 60).await;
    let mut controller = controller_for(&server);
    let log = NotificationLog::new();

    assert_eq!(
        controller.generate(1, &log).await,
        FetchOutcome::Loaded { total_items: 60 }
    );
    assert_eq!(
        controller.change_page(2, &log).await,
        FetchOutcome::Loaded { total_items: 60 }
    );
    let export = controller.export_csv(&log).expect("rows to export");
    let (_guard, dir) = temp_output_dir();
    let path = save_csv(&export, &dir).expect("CSV should be saved");

    assert_eq!(path.file_name(), Some("reporte_encuestas_2024-01-01_2024-01-31.csv"));
    let content = std::fs::read_to_string(&path).expect("read CSV");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 11);
    let header = lines.first().expect("header line");
    assert_eq!(header.split(',').count(), CSV_HEADERS.len());
    assert!(header.starts_with("\"N°\",\"Nombre Completo\""));
    let first = lines.get(1).expect("first data line");
    assert!(first.starts_with("\"1\","));
    assert!(first.contains("\"Persona 51\""));
    assert!(first.contains("\"Barranquilla\""));
    let latest = log.latest().expect("a notification");
    assert_eq!(latest.level, NotificationLevel::Success);
    assert!(latest.message.contains("(10 registros)"));
}

#[rstest]
#[tokio::test]
async fn empty_report_is_not_exported() {
    let server = MockServer::start().await;
    mount_report(&server, 50, 0).await;
    let mut controller = controller_for(&server);
    let log = NotificationLog::new();

    assert_eq!(
        controller.generate(1, &log).await,
        FetchOutcome::Loaded { total_items: 0 }
    );

    assert!(controller.export_csv(&log).is_none());
    assert_eq!(log.count(NotificationLevel::Warning), 1);
    assert_eq!(
        log.latest().map(|entry| entry.message),
        Some(NOTHING_TO_EXPORT.to_owned())
    );
}
