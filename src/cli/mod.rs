// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Command-line interface for the annotator.

/// Annotate command implementation.
pub mod annotate;
/// Argument definitions.
pub mod args;
/// Logging macros and verbosity control.
pub mod logging;
