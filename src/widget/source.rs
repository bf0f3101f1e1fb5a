//! Shared text acquisition for the print and banner widgets
//!
//! Both widgets take their message from exactly one of two places: a `text`
//! literal, or the captured standard output of a `command`.

use serde::Deserialize;

use super::{OptionsError, WidgetError};

/// The `text`/`command` option pair, flattened into widget options
#[derive(Debug, Clone, Deserialize)]
pub struct TextSourceOptions {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
}

/// Where a widget's message comes from
#[derive(Debug, Clone)]
pub enum TextSource {
    Literal(String),
    Command(String),
}

impl TextSource {
    /// Enforce the text-XOR-command contract at the validation boundary
    pub fn from_options(options: &TextSourceOptions) -> Result<Self, OptionsError> {
        match (&options.text, &options.command) {
            (Some(_), Some(_)) => Err(OptionsError::ConflictingTextSource),
            (Some(text), None) => Ok(TextSource::Literal(text.clone())),
            (None, Some(command)) => Ok(TextSource::Command(command.clone())),
            (None, None) => Err(OptionsError::MissingTextSource),
        }
    }

    /// Produce the message, running the external command if configured
    pub async fn resolve(&self) -> Result<String, WidgetError> {
        match self {
            TextSource::Literal(text) => Ok(text.clone()),
            TextSource::Command(command) => {
                let output = tokio::process::Command::new("sh")
                    .arg("-c")
                    .arg(command)
                    .output()
                    .await
                    .map_err(|source| WidgetError::Command {
                        command: command.clone(),
                        source,
                    })?;
                if !output.status.success() {
                    return Err(WidgetError::CommandFailed {
                        command: command.clone(),
                        status: output.status,
                    });
                }
                let stdout = String::from_utf8_lossy(&output.stdout);
                Ok(stdout.trim_end_matches('\n').to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(text: Option<&str>, command: Option<&str>) -> TextSourceOptions {
        TextSourceOptions {
            text: text.map(String::from),
            command: command.map(String::from),
        }
    }

    #[test]
    fn test_exactly_one_source_required() {
        assert!(matches!(
            TextSource::from_options(&options(None, None)),
            Err(OptionsError::MissingTextSource)
        ));
        assert!(matches!(
            TextSource::from_options(&options(Some("a"), Some("b"))),
            Err(OptionsError::ConflictingTextSource)
        ));
        assert!(TextSource::from_options(&options(Some("a"), None)).is_ok());
        assert!(TextSource::from_options(&options(None, Some("b"))).is_ok());
    }

    #[tokio::test]
    async fn test_literal_passes_through() {
        let source = TextSource::Literal("hello".to_string());
        assert_eq!(source.resolve().await.expect("literal"), "hello");
    }

    #[tokio::test]
    async fn test_command_output_captured() {
        let source = TextSource::Command("printf 'from command'".to_string());
        assert_eq!(source.resolve().await.expect("command"), "from command");
    }

    #[tokio::test]
    async fn test_failing_command_is_a_widget_failure() {
        let source = TextSource::Command("exit 3".to_string());
        let err = source.resolve().await.unwrap_err();
        assert!(matches!(err, WidgetError::CommandFailed { .. }));
    }
}
