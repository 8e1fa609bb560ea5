//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence and environment/CLI loading tests
//! - `resolution`: API URL, operation mode, and initial filter tests

mod helpers;
mod resolution;
