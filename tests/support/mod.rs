//! Shared test utilities.

pub mod report_service;
pub mod runtime;
