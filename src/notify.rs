//! Operator notifications raised by report generation and export.
//!
//! The controller never renders messages itself. It reports through a
//! [`Notifier`], which the CLI backs with `tracing` and the terminal UI backs
//! with an in-memory [`NotificationLog`] shown as a status line.

use std::sync::{Mutex, PoisonError};

use crate::report::ReportError;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// A precondition was not met; nothing happened.
    Warning,
    /// An operation completed.
    Success,
    /// An operation failed.
    Error,
}

/// A message raised for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Text shown to the operator.
    pub message: String,
}

/// Fire-and-forget sink for operator notifications.
pub trait Notifier: Send + Sync {
    /// Raises a warning.
    fn warn(&self, message: &str);

    /// Raises a success message.
    fn success(&self, message: &str);

    /// Raises an error, preferring the backend's own message over `fallback`.
    fn report_error(&self, error: &ReportError, fallback: &str);
}

/// Returns the text shown for `error`: the backend message when present,
/// otherwise `fallback`.
#[must_use]
pub fn error_text(error: &ReportError, fallback: &str) -> String {
    error.backend_message().unwrap_or(fallback).to_owned()
}

/// Notifier that writes to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn success(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn report_error(&self, error: &ReportError, fallback: &str) {
        tracing::error!(%error, "{}", error_text(error, fallback));
    }
}

/// Notifier that records every notification in memory.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: NotificationLevel, message: String) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification { level, message });
    }

    /// Returns a copy of every recorded notification.
    #[must_use]
    pub fn entries(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent notification.
    #[must_use]
    pub fn latest(&self) -> Option<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Removes and returns every recorded notification.
    pub fn take(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    /// Counts notifications at `level`.
    #[must_use]
    pub fn count(&self, level: NotificationLevel) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|entry| entry.level == level)
            .count()
    }
}

impl Notifier for NotificationLog {
    fn warn(&self, message: &str) {
        self.push(NotificationLevel::Warning, message.to_owned());
    }

    fn success(&self, message: &str) {
        self.push(NotificationLevel::Success, message.to_owned());
    }

    fn report_error(&self, error: &ReportError, fallback: &str) {
        self.push(NotificationLevel::Error, error_text(error, fallback));
    }
}
