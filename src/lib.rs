// Library surface for the binary and headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod language;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod word_generator;

pub use error::{Error, Result};
