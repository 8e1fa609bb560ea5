//! CLI operation mode handlers.
//!
//! - [`generate`]: fetch one report page, print it, and optionally export it
//! - [`report_tui`]: interactive terminal UI
//!
//! Output formatting utilities are in [`output`].

pub mod generate;
pub mod output;
pub mod report_tui;
