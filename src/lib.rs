//! layer-tour - a step-by-step terminal walkthrough of one transformer layer
//!
//! The library exposes the step catalog and navigator, the configuration and
//! logging setup, and the terminal UI used by the `layer-tour` binary.

pub mod app;
pub mod config;
pub mod logging;
pub mod steps;
pub mod ui;
