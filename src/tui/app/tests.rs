//! Tests for the report TUI application model.

use std::sync::Arc;

use bubbletea_rs::Model;
use crossterm::event::{KeyCode, KeyModifiers};
use rstest::{fixture, rstest};

use super::*;
use crate::export::NOTHING_TO_EXPORT;
use crate::notify::NotificationLevel;
use crate::report::gateway::MockReportGateway;
use crate::report::models::test_support::{numbered_rows, page_of};
use crate::report::{FilterState, ReportError, SELECT_DATE_RANGE};
use crate::tui::app::filter_handlers::INVALID_DATE;
use crate::tui::messages::AppMsg;

fn key_msg(key: KeyCode) -> bubbletea_rs::event::KeyMsg {
    bubbletea_rs::event::KeyMsg {
        key,
        modifiers: KeyModifiers::empty(),
    }
}

#[fixture]
fn january() -> FilterState {
    FilterState::with_date_range("2024-01-01", "2024-01-31")
}

/// Three pages of 120 items, answering with the requested page.
fn paged_gateway() -> MockReportGateway {
    let mut gateway = MockReportGateway::new();
    gateway.expect_fetch_report().returning(|query| {
        let rows = if query.page == 3 {
            numbered_rows(20)
        } else {
            numbered_rows(50)
        };
        Ok(page_of(query.page, 50, 120, rows))
    });
    gateway
}

fn app_with(gateway: MockReportGateway, filters: FilterState) -> ReportApp {
    let controller = ReportController::new(Arc::new(gateway), filters);
    ReportApp::with_dimensions(controller, "reports", 120, 30)
}

/// Runs `msg`, awaits the command it returns, and feeds the result back.
async fn run_fetch(app: &mut ReportApp, msg: &AppMsg) {
    let cmd = app.handle_message(msg).expect("a fetch command");
    let finished = cmd.await.expect("the fetch should produce a message");
    assert!(app.update(finished).is_none());
}

async fn loaded_app(filters: FilterState) -> ReportApp {
    let mut app = app_with(paged_gateway(), filters);
    run_fetch(&mut app, &AppMsg::Generate).await;
    app
}

#[rstest]
fn starts_on_filter_panel(january: FilterState) {
    let app = app_with(MockReportGateway::new(), january);

    assert_eq!(app.focus(), Focus::Filters);
    assert_eq!(app.selected_field(), FilterField::StartDate);
    assert!(app.toast().is_none());
    assert!(app.controller().result().is_none());
}

#[rstest]
fn toggle_filter_panel_switches_focus(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);

    app.handle_message(&AppMsg::ToggleFilterPanel);
    assert_eq!(app.focus(), Focus::Table);

    app.handle_message(&AppMsg::ToggleFilterPanel);
    assert_eq!(app.focus(), Focus::Filters);
}

#[rstest]
fn escape_returns_to_table(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);

    app.update(Box::new(key_msg(KeyCode::Esc)));

    assert_eq!(app.focus(), Focus::Table);
}

#[rstest]
fn field_selection_wraps_in_both_directions(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);

    app.handle_message(&AppMsg::PreviousField);
    assert_eq!(app.selected_field(), FilterField::SortOrder);

    app.handle_message(&AppMsg::NextField);
    assert_eq!(app.selected_field(), FilterField::StartDate);

    app.handle_message(&AppMsg::NextField);
    assert_eq!(app.selected_field(), FilterField::EndDate);
}

#[rstest]
fn cycling_options_wraps_around(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);
    for _ in 0..3 {
        app.handle_message(&AppMsg::NextField);
    }
    assert_eq!(app.selected_field(), FilterField::SurveyStatus);

    app.handle_message(&AppMsg::NextOption);
    assert_eq!(app.controller().filters().get(FilterField::SurveyStatus), "successful");

    app.handle_message(&AppMsg::NextOption);
    app.handle_message(&AppMsg::NextOption);
    assert_eq!(app.controller().filters().get(FilterField::SurveyStatus), "");

    app.handle_message(&AppMsg::PreviousOption);
    assert_eq!(
        app.controller().filters().get(FilterField::SurveyStatus),
        "unsuccessful"
    );
}

#[rstest]
fn cycling_a_text_field_does_nothing(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);
    app.handle_message(&AppMsg::NextField);
    app.handle_message(&AppMsg::NextField);
    assert_eq!(app.selected_field(), FilterField::Search);

    app.handle_message(&AppMsg::NextOption);

    assert_eq!(app.controller().filters().get(FilterField::Search), "");
}

#[rstest]
fn typed_search_text_is_stored_on_enter(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);
    app.handle_message(&AppMsg::NextField);
    app.handle_message(&AppMsg::NextField);

    app.update(Box::new(key_msg(KeyCode::Enter)));
    assert_eq!(app.edit_buffer(), Some(""));
    for ch in "Ana x".chars() {
        app.update(Box::new(key_msg(KeyCode::Char(ch))));
    }
    app.update(Box::new(key_msg(KeyCode::Backspace)));
    app.update(Box::new(key_msg(KeyCode::Backspace)));
    app.update(Box::new(key_msg(KeyCode::Enter)));

    assert!(app.edit_buffer().is_none());
    assert_eq!(app.controller().filters().get(FilterField::Search), "Ana");
}

#[rstest]
fn editing_keys_do_not_trigger_shortcuts(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);
    app.handle_message(&AppMsg::StartEdit);

    assert!(app.update(Box::new(key_msg(KeyCode::Char('q')))).is_none());

    assert_eq!(app.edit_buffer(), Some("2024-01-01q"));
}

#[rstest]
fn invalid_date_warns_and_keeps_editing(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);
    app.handle_message(&AppMsg::StartEdit);
    app.handle_message(&AppMsg::EditBackspace);

    app.handle_message(&AppMsg::CommitEdit);

    assert_eq!(app.edit_buffer(), Some("2024-01-0"));
    assert_eq!(app.controller().filters().get(FilterField::StartDate), "2024-01-01");
    let toast = app.toast().expect("a warning toast");
    assert_eq!(toast.level, NotificationLevel::Warning);
    assert_eq!(toast.message, INVALID_DATE);
}

#[rstest]
fn cancel_edit_discards_buffer(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);
    app.handle_message(&AppMsg::StartEdit);
    app.handle_message(&AppMsg::EditInput('9'));

    app.update(Box::new(key_msg(KeyCode::Esc)));

    assert!(app.edit_buffer().is_none());
    assert_eq!(app.focus(), Focus::Filters);
    assert_eq!(app.controller().filters().get(FilterField::StartDate), "2024-01-01");
}

#[rstest]
fn generate_without_dates_warns_without_fetching() {
    let mut gateway = MockReportGateway::new();
    gateway.expect_fetch_report().times(0);
    let mut app = app_with(gateway, FilterState::default());

    let cmd = app.handle_message(&AppMsg::Generate);

    assert!(cmd.is_none());
    assert_eq!(app.focus(), Focus::Filters);
    let toast = app.toast().expect("a warning toast");
    assert_eq!(toast.message, SELECT_DATE_RANGE);
}

#[rstest]
#[tokio::test]
async fn generate_loads_first_page_and_shows_table(january: FilterState) {
    let mut app = app_with(paged_gateway(), january);

    let cmd = app.handle_message(&AppMsg::Generate);
    assert!(cmd.is_some());
    assert!(app.controller().is_loading());
    assert_eq!(app.focus(), Focus::Table);
    assert!(app.view().contains("[Generando...]"));

    let finished = cmd
        .expect("a fetch command")
        .await
        .expect("the fetch should produce a message");
    app.update(finished);

    assert!(!app.controller().is_loading());
    assert_eq!(app.controller().rows().len(), 50);
    let toast = app.toast().expect("a success toast");
    assert_eq!(toast.level, NotificationLevel::Success);
    assert_eq!(toast.message, "Reporte generado: 120 registros");
}

#[rstest]
#[tokio::test]
async fn second_generate_is_ignored_while_loading(january: FilterState) {
    let mut app = app_with(paged_gateway(), january);

    let first = app.handle_message(&AppMsg::Generate);
    let second = app.handle_message(&AppMsg::Generate);

    assert!(first.is_some());
    assert!(second.is_none());
}

#[rstest]
#[tokio::test]
async fn failed_fetch_shows_error_toast(january: FilterState) {
    let mut gateway = MockReportGateway::new();
    gateway.expect_fetch_report().returning(|_| {
        Err(ReportError::Api {
            status: 500,
            message: Some("Servicio no disponible".to_owned()),
        })
    });
    let mut app = app_with(gateway, january);

    run_fetch(&mut app, &AppMsg::Generate).await;

    let toast = app.toast().expect("an error toast");
    assert_eq!(toast.level, NotificationLevel::Error);
    assert_eq!(toast.message, "Servicio no disponible");
    assert_eq!(app.controller().error_message(), Some("Servicio no disponible"));
}

#[rstest]
#[tokio::test]
async fn cursor_moves_within_loaded_page(january: FilterState) {
    let mut app = loaded_app(january).await;

    app.handle_message(&AppMsg::CursorDown);
    app.handle_message(&AppMsg::CursorDown);
    assert_eq!(app.cursor_position(), 2);

    app.handle_message(&AppMsg::CursorUp);
    assert_eq!(app.cursor_position(), 1);

    app.handle_message(&AppMsg::End);
    assert_eq!(app.cursor_position(), 49);
    assert_eq!(
        app.selected_row().map(|row| row.full_name.as_str()),
        Some("Persona 50")
    );

    app.handle_message(&AppMsg::CursorDown);
    assert_eq!(app.cursor_position(), 49);

    app.handle_message(&AppMsg::Home);
    assert_eq!(app.cursor_position(), 0);
}

#[rstest]
#[tokio::test]
async fn navigation_is_ignored_on_filter_panel(january: FilterState) {
    let mut app = loaded_app(january).await;
    app.handle_message(&AppMsg::ToggleFilterPanel);

    app.handle_message(&AppMsg::CursorDown);

    assert_eq!(app.cursor_position(), 0);
}

#[rstest]
#[tokio::test]
async fn next_page_fetches_and_resets_cursor(january: FilterState) {
    let mut app = loaded_app(january).await;
    app.handle_message(&AppMsg::End);

    run_fetch(&mut app, &AppMsg::NextPage).await;

    assert_eq!(app.controller().current_page(), 2);
    assert_eq!(app.cursor_position(), 0);
}

#[rstest]
#[tokio::test]
async fn page_changes_outside_range_are_ignored(january: FilterState) {
    let mut app = loaded_app(january).await;

    assert!(app.handle_message(&AppMsg::PreviousPage).is_none());
    assert!(app.handle_message(&AppMsg::GoToPage(4)).is_none());
    assert!(!app.controller().is_loading());

    run_fetch(&mut app, &AppMsg::GoToPage(3)).await;
    assert_eq!(app.controller().current_page(), 3);
    assert_eq!(app.controller().rows().len(), 20);
    assert!(app.handle_message(&AppMsg::NextPage).is_none());
}

#[rstest]
#[tokio::test]
async fn number_keys_jump_to_page(january: FilterState) {
    let mut app = loaded_app(january).await;

    let cmd = app.update(Box::new(key_msg(KeyCode::Char('2'))));

    assert!(cmd.is_some());
    assert!(app.controller().is_loading());
}

#[rstest]
#[tokio::test]
async fn clear_filters_discards_report(january: FilterState) {
    let mut app = loaded_app(january).await;
    app.handle_message(&AppMsg::CursorDown);

    app.handle_message(&AppMsg::ClearFilters);

    assert!(app.controller().result().is_none());
    assert_eq!(app.controller().active_filter_count(), 0);
    assert_eq!(app.cursor_position(), 0);
}

#[rstest]
#[tokio::test]
async fn export_writes_csv_to_output_dir(january: FilterState) {
    let dir = tempfile::tempdir().expect("temp dir");
    let output_dir =
        camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 temp path");
    let controller = ReportController::new(Arc::new(paged_gateway()), january);
    let mut app = ReportApp::with_dimensions(controller, output_dir.clone(), 120, 30);
    run_fetch(&mut app, &AppMsg::Generate).await;

    app.update(Box::new(key_msg(KeyCode::Char('e'))));

    let path = app.last_export().expect("an export path");
    assert_eq!(
        path,
        &output_dir.join("reporte_encuestas_2024-01-01_2024-01-31.csv")
    );
    let content = std::fs::read_to_string(path).expect("read CSV");
    assert_eq!(content.lines().count(), 51);
    let toast = app.toast().expect("a success toast");
    assert_eq!(toast.level, NotificationLevel::Success);
    assert!(toast.message.starts_with("CSV generado:"));
}

#[rstest]
fn export_without_rows_warns(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);

    app.handle_message(&AppMsg::ExportCsv);

    assert!(app.last_export().is_none());
    let toast = app.toast().expect("a warning toast");
    assert_eq!(toast.message, NOTHING_TO_EXPORT);
}

#[rstest]
fn key_press_clears_previous_toast() {
    let mut app = app_with(MockReportGateway::new(), FilterState::default());
    app.handle_message(&AppMsg::Generate);
    assert!(app.toast().is_some());

    app.update(Box::new(key_msg(KeyCode::Char('j'))));

    assert!(app.toast().is_none());
}

#[rstest]
fn help_overlay_swallows_next_key(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);
    app.update(Box::new(key_msg(KeyCode::Char('?'))));
    assert!(app.view().contains("Atajos de teclado"));

    let cmd = app.update(Box::new(key_msg(KeyCode::Char('q'))));

    assert!(cmd.is_none());
    assert!(!app.view().contains("Atajos de teclado"));
}

#[rstest]
fn quit_key_returns_command(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);

    assert!(app.update(Box::new(key_msg(KeyCode::Char('q')))).is_some());
}

#[rstest]
fn view_shows_filter_panel_at_startup(january: FilterState) {
    let app = app_with(MockReportGateway::new(), january);

    let view = app.view();

    assert!(view.contains("Reportes - Generar Reporte Tabular"));
    assert!(view.contains("Filtros de Reporte (2 activos)"));
    assert!(view.contains("2024-01-31"));
}

#[rstest]
#[tokio::test]
async fn view_shows_table_and_pagination_after_generate(january: FilterState) {
    let app = loaded_app(january).await;

    let view = app.view();

    assert!(view.contains("Resultados del Reporte  120 registros  Pág. 1/3"));
    assert!(view.contains("Persona 1"));
    assert!(view.contains("Página 1 de 3"));
}

#[rstest]
fn view_fills_terminal_exactly(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);
    app.handle_message(&AppMsg::WindowResized {
        width: 40,
        height: 10,
    });

    let view = app.view();

    assert_eq!(view.lines().count(), 10);
    assert!(
        view.lines()
            .all(|line| unicode_width::UnicodeWidthStr::width(line) == 39)
    );
}

#[rstest]
fn resize_keeps_table_height_positive(january: FilterState) {
    let mut app = app_with(MockReportGateway::new(), january);

    app.handle_message(&AppMsg::WindowResized {
        width: 20,
        height: 2,
    });

    assert_eq!(app.table.visible_height(), MIN_TABLE_HEIGHT);
}
