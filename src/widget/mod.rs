//! Widgets: independent units of login-message output
//!
//! Every widget kind implements [`Widget`]: a `type` name plus a binding
//! step that turns one configuration entry into a runnable [`WidgetTask`].
//! Binding happens for the whole batch before anything runs, so option
//! mistakes abort the run up front; task failures stay confined to their
//! own output slot.

pub mod dispatch;
pub mod handlers;
pub mod registry;
pub mod source;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::color::ColorError;
use crate::config::WidgetSpec;
use crate::figlet::FontError;

/// Shared read-only context handed to every widget task.
///
/// This is the one value that travels across the fan-out boundary, so a
/// future deadline or cancellation token can be added here without touching
/// the dispatch contract.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Whether ANSI color output is enabled
    pub color: bool,
}

impl Default for RunContext {
    fn default() -> Self {
        RunContext { color: true }
    }
}

/// A failure confined to a single widget's output slot
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error("failed to run command '{command}': {source}")]
    Command {
        command: String,
        source: std::io::Error,
    },

    #[error("command '{command}' exited with {status}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
    },

    #[error("widget task ended without producing a result")]
    Aborted,
}

/// What one widget produced: its text, or its own isolated failure
pub type WidgetResult = Result<String, WidgetError>;

/// Errors binding a spec's options to a widget's typed options struct
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error(transparent)]
    Invalid(#[from] toml::de::Error),

    #[error("either text or command must be set")]
    MissingTextSource,

    #[error("text and command are mutually exclusive")]
    ConflictingTextSource,
}

/// One widget kind, registered under its `type` name
pub trait Widget: Send + Sync {
    /// The `type` value this widget answers to
    fn name(&self) -> &'static str;

    /// Bind a spec's options into a runnable task.
    ///
    /// Called during the eager validation pass, before any task launches;
    /// an error here is a configuration error for the whole run.
    fn prepare(&self, spec: &WidgetSpec) -> Result<Box<dyn WidgetTask>, OptionsError>;
}

/// A bound widget invocation, run once on its own task
#[async_trait]
pub trait WidgetTask: Send {
    async fn run(self: Box<Self>, ctx: Arc<RunContext>) -> WidgetResult;
}
