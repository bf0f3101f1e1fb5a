//! Configuration loading
//!
//! The config file is a TOML document holding an ordered `[[widget]]` list.
//! Every entry must carry a `type` key naming a registered widget; all other
//! keys belong to that widget and are bound to its typed options before any
//! widget runs.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config path used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/salute/config.toml";

/// Errors that can occur when loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{path} not found; please refer to the documentation")]
    NotFound { path: String },

    #[error("error reading config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("error parsing config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// The parsed configuration: an ordered widget list
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default, rename = "widget")]
    pub widgets: Vec<WidgetSpec>,
}

impl Config {
    /// Load and parse the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::NotFound { path: display });
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// One widget entry: an opaque key/value table with a `type` discriminator.
///
/// Immutable once parsed; the dispatch engine and handlers only ever borrow
/// it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct WidgetSpec(toml::Table);

impl WidgetSpec {
    /// The raw `type` value, if any
    pub fn raw_type(&self) -> Option<&toml::Value> {
        self.0.get("type")
    }

    /// The `type` value when it is present and a string
    pub fn widget_type(&self) -> Option<&str> {
        self.raw_type().and_then(|v| v.as_str())
    }

    /// Bind everything except `type` to a widget's typed options struct
    pub fn parse_options<T: serde::de::DeserializeOwned>(&self) -> Result<T, toml::de::Error> {
        let mut table = self.0.clone();
        table.remove("type");
        toml::Value::Table(table).try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_widget_list_preserves_order() {
        let config = Config::parse(
            r#"
            [[widget]]
            type = "banner"
            text = "Welcome"
            color = "cyan"

            [[widget]]
            type = "load"
            "#,
        )
        .expect("should parse");

        assert_eq!(config.widgets.len(), 2);
        assert_eq!(config.widgets[0].widget_type(), Some("banner"));
        assert_eq!(config.widgets[1].widget_type(), Some("load"));
    }

    #[test]
    fn test_empty_config() {
        let config = Config::parse("").expect("empty config is valid");
        assert!(config.widgets.is_empty());
    }

    #[test]
    fn test_missing_and_invalid_type() {
        let config = Config::parse(
            r#"
            [[widget]]
            text = "no type here"

            [[widget]]
            type = 3
            "#,
        )
        .expect("shape is valid TOML");

        assert!(config.widgets[0].raw_type().is_none());
        assert!(config.widgets[1].raw_type().is_some());
        assert_eq!(config.widgets[1].widget_type(), None);
    }

    #[test]
    fn test_parse_options_excludes_type() {
        #[derive(serde::Deserialize)]
        struct Options {
            text: String,
        }

        let config = Config::parse(
            r#"
            [[widget]]
            type = "print"
            text = "hi"
            "#,
        )
        .expect("should parse");

        let options: Options = config.widgets[0].parse_options().expect("typed bind");
        assert_eq!(options.text, "hi");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/salute.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }
}
