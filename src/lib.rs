//! salute - a configurable login banner (MOTD) generator
//!
//! A configuration file lists widgets; each widget runs once per invocation
//! on its own task, and their outputs concatenate, in configuration order,
//! into the login message. The library exposes the widget registry, the
//! dispatch engine, and the banner rendering pipeline; the binary in
//! `main.rs` adds the command-line surface.

pub mod color;
pub mod config;
pub mod figlet;
pub mod widget;

use std::sync::Arc;

use thiserror::Error;

pub use config::{Config, ConfigError};
pub use widget::dispatch::DispatchError;
pub use widget::registry::Registry;
pub use widget::{RunContext, WidgetError, WidgetResult};

/// Errors that can occur over a whole run
#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to load config: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to execute widgets: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("widget error: {0}")]
    Widget(#[from] WidgetError),
}

/// Run every configured widget and assemble the login message.
///
/// The full pipeline: eager validation, parallel execution, ordered
/// collection, assembly. Nothing is printed here; the caller owns stdout.
pub async fn run(
    config: &Config,
    registry: &Registry,
    ctx: Arc<RunContext>,
) -> Result<String, RunError> {
    let results = widget::dispatch::execute(&config.widgets, registry, ctx).await?;
    Ok(widget::dispatch::assemble(results)?)
}
