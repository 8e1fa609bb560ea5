//! Input handling for the TUI application.
//!
//! Maps terminal key events to application messages. The same key means
//! different things depending on whether the table or the filter panel has
//! focus, and every printable key is text while a field is being edited.

use crossterm::event::KeyCode;

use super::messages::AppMsg;

/// Which part of the screen receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// The results table has focus.
    Table,
    /// The filter panel has focus.
    Filters,
    /// A filter field is being edited.
    Editing,
}

/// Maps a key event to an application message for the given context.
///
/// Returns `None` for unrecognised key events, allowing them to be ignored.
#[must_use]
pub fn map_key_to_message(key: &bubbletea_rs::event::KeyMsg, context: InputContext) -> Option<AppMsg> {
    match context {
        InputContext::Editing => map_editing_key(key.key),
        InputContext::Filters => map_filter_key(key.key),
        InputContext::Table => map_table_key(key.key),
    }
}

const fn map_editing_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Enter => Some(AppMsg::CommitEdit),
        KeyCode::Esc => Some(AppMsg::CancelEdit),
        KeyCode::Backspace => Some(AppMsg::EditBackspace),
        KeyCode::Char(ch) => Some(AppMsg::EditInput(ch)),
        _ => None,
    }
}

const fn map_filter_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::NextField),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::PreviousField),
        KeyCode::Char('l') | KeyCode::Right => Some(AppMsg::NextOption),
        KeyCode::Char('h') | KeyCode::Left => Some(AppMsg::PreviousOption),
        KeyCode::Enter => Some(AppMsg::StartEdit),
        other => map_global_key(other),
    }
}

fn map_table_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::CursorUp),
        KeyCode::Home | KeyCode::Char('g') => Some(AppMsg::Home),
        KeyCode::End | KeyCode::Char('G') => Some(AppMsg::End),
        KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => Some(AppMsg::NextPage),
        KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => Some(AppMsg::PreviousPage),
        KeyCode::Char('e') => Some(AppMsg::ExportCsv),
        KeyCode::Char(digit @ '1'..='9') => digit.to_digit(10).map(AppMsg::GoToPage),
        other => map_global_key(other),
    }
}

const fn map_global_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        KeyCode::Char('r') => Some(AppMsg::Generate),
        KeyCode::Char('c') => Some(AppMsg::ClearFilters),
        KeyCode::Tab | KeyCode::Char('f') => Some(AppMsg::ToggleFilterPanel),
        KeyCode::Esc => Some(AppMsg::EscapePressed),
        _ => None,
    }
}
