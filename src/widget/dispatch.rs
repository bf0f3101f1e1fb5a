//! The dispatch engine: eager validation, parallel fan-out, ordered
//! collection
//!
//! Every configured widget runs on its own task and reports through its own
//! single-slot channel, indexed by configuration position. Output order is
//! therefore input order no matter when each task finishes. There is no
//! timeout or cancellation at any level: a handler that never completes
//! blocks the whole run, which is acceptable for a one-shot CLI tool.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;

use super::registry::Registry;
use super::{OptionsError, RunContext, WidgetError, WidgetResult, WidgetTask};
use crate::config::WidgetSpec;

/// Configuration errors found before any widget work starts.
///
/// Indexes are 1-based, matching the order of `[[widget]]` entries in the
/// configuration file.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("widget {index} is missing a type attribute")]
    MissingType { index: usize },

    #[error("widget {index} has an invalid type attribute")]
    InvalidType { index: usize },

    #[error("widget {index} uses unknown type {name}")]
    UnknownType { index: usize, name: String },

    #[error("widget {index} ({name}) has invalid options: {source}")]
    InvalidOptions {
        index: usize,
        name: String,
        source: OptionsError,
    },
}

/// Validate the whole batch and bind every spec to a runnable task.
///
/// Nothing is launched here; the first violation aborts with the offending
/// widget's index and no partial execution ever happens.
pub fn validate(
    specs: &[WidgetSpec],
    registry: &Registry,
) -> Result<Vec<Box<dyn WidgetTask>>, DispatchError> {
    let mut tasks = Vec::with_capacity(specs.len());
    for (position, spec) in specs.iter().enumerate() {
        let index = position + 1;
        let raw = spec
            .raw_type()
            .ok_or(DispatchError::MissingType { index })?;
        let name = raw.as_str().ok_or(DispatchError::InvalidType { index })?;
        let widget = registry
            .get(name)
            .ok_or_else(|| DispatchError::UnknownType {
                index,
                name: name.to_string(),
            })?;
        let task = widget
            .prepare(spec)
            .map_err(|source| DispatchError::InvalidOptions {
                index,
                name: name.to_string(),
                source,
            })?;
        tasks.push(task);
    }
    Ok(tasks)
}

/// Run all configured widgets concurrently and collect their results in
/// configuration order.
pub async fn execute(
    specs: &[WidgetSpec],
    registry: &Registry,
    ctx: Arc<RunContext>,
) -> Result<Vec<WidgetResult>, DispatchError> {
    let tasks = validate(specs, registry)?;

    let mut slots = Vec::with_capacity(tasks.len());
    for task in tasks {
        let (tx, rx) = oneshot::channel();
        let ctx = Arc::clone(&ctx);
        tokio::spawn(async move {
            // Receiver side may only be gone if the whole run was dropped.
            let _ = tx.send(task.run(ctx).await);
        });
        slots.push(rx);
    }

    // Completion barrier: await every slot in index order. A task that
    // dropped its sender (i.e. panicked) fails only its own slot.
    let mut results = Vec::with_capacity(slots.len());
    for rx in slots {
        results.push(rx.await.unwrap_or(Err(WidgetError::Aborted)));
    }
    Ok(results)
}

/// Concatenate successful results into the final message, or fail on the
/// first widget failure in configuration order. No partial output survives
/// a failed run.
pub fn assemble(results: Vec<WidgetResult>) -> Result<String, WidgetError> {
    let mut message = String::new();
    for result in results {
        message.push_str(result?.trim_matches('\n'));
        message.push('\n');
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::widget::{OptionsError, Widget};
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Test widget: echoes `text` after an optional delay, counting runs
    struct Echo {
        runs: Arc<AtomicUsize>,
    }

    #[derive(Deserialize)]
    struct EchoOptions {
        text: String,
        #[serde(default)]
        delay_ms: u64,
    }

    struct EchoTask {
        options: EchoOptions,
        runs: Arc<AtomicUsize>,
    }

    impl Widget for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn prepare(&self, spec: &WidgetSpec) -> Result<Box<dyn WidgetTask>, OptionsError> {
            Ok(Box::new(EchoTask {
                options: spec.parse_options()?,
                runs: Arc::clone(&self.runs),
            }))
        }
    }

    #[async_trait]
    impl WidgetTask for EchoTask {
        async fn run(self: Box<Self>, _ctx: Arc<RunContext>) -> WidgetResult {
            self.runs.fetch_add(1, Ordering::SeqCst);
            if self.options.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.options.delay_ms)).await;
            }
            Ok(self.options.text)
        }
    }

    fn echo_registry() -> (Registry, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut registry = Registry::new();
        registry
            .register(Arc::new(Echo {
                runs: Arc::clone(&runs),
            }))
            .expect("register echo");
        (registry, runs)
    }

    fn specs(toml: &str) -> Vec<WidgetSpec> {
        Config::parse(toml).expect("test config parses").widgets
    }

    #[tokio::test]
    async fn test_order_is_stable_under_any_completion_order() {
        let (registry, _) = echo_registry();
        let specs = specs(
            r#"
            [[widget]]
            type = "echo"
            text = "first"
            delay_ms = 40

            [[widget]]
            type = "echo"
            text = "second"
            delay_ms = 5

            [[widget]]
            type = "echo"
            text = "third"
            "#,
        );

        let results = execute(&specs, &registry, Arc::new(RunContext::default()))
            .await
            .expect("valid batch");
        let texts: Vec<String> = results.into_iter().map(|r| r.expect("ok")).collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_missing_type_aborts_without_running_anything() {
        let (registry, runs) = echo_registry();
        let specs = specs(
            r#"
            [[widget]]
            type = "echo"
            text = "fine"

            [[widget]]
            text = "no type"
            "#,
        );

        let err = execute(&specs, &registry, Arc::new(RunContext::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::MissingType { index: 2 }));
        assert_eq!(err.to_string(), "widget 2 is missing a type attribute");
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_string_type_aborts() {
        let (registry, runs) = echo_registry();
        let specs = specs(
            r#"
            [[widget]]
            type = 7
            "#,
        );

        let err = execute(&specs, &registry, Arc::new(RunContext::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidType { index: 1 }));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_type_aborts_with_name() {
        let (registry, runs) = echo_registry();
        let specs = specs(
            r#"
            [[widget]]
            type = "echo"
            text = "fine"

            [[widget]]
            type = "mystery"
            "#,
        );

        let err = execute(&specs, &registry, Arc::new(RunContext::default()))
            .await
            .unwrap_err();
        match &err {
            DispatchError::UnknownType { index, name } => {
                assert_eq!(*index, 2);
                assert_eq!(name, "mystery");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_options_abort_before_launch() {
        let (registry, runs) = echo_registry();
        let specs = specs(
            r#"
            [[widget]]
            type = "echo"
            text = 42
            "#,
        );

        let err = execute(&specs, &registry, Arc::new(RunContext::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidOptions { index: 1, .. }));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_result_count_matches_spec_count() {
        let (registry, runs) = echo_registry();
        let specs = specs(
            r#"
            [[widget]]
            type = "echo"
            text = "a"

            [[widget]]
            type = "echo"
            text = "b"
            delay_ms = 10
            "#,
        );

        let results = execute(&specs, &registry, Arc::new(RunContext::default()))
            .await
            .expect("valid batch");
        assert_eq!(results.len(), 2);
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_assemble_joins_and_trims() {
        let results = vec![Ok("hello\n".to_string()), Ok(" ".to_string())];
        let message = assemble(results).expect("all ok");
        assert_eq!(message, "hello\n \n");
    }

    #[test]
    fn test_assemble_fails_on_first_failure() {
        let results = vec![
            Ok("fine".to_string()),
            Err(WidgetError::Aborted),
            Ok("never reached".to_string()),
        ];
        assert!(assemble(results).is_err());
    }
}
