//! Widget registry: `type` name to handler
//!
//! Built once by an explicit assembly step before dispatch begins and only
//! read concurrently afterwards. Registering the same name twice is an
//! error, not an override.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::handlers;
use super::Widget;

/// Errors that can occur while assembling the registry
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("duplicate widget registration: {name}")]
    Duplicate { name: String },
}

/// Registry of all known widget kinds
#[derive(Default)]
pub struct Registry {
    widgets: HashMap<&'static str, Arc<dyn Widget>>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in widget
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for widget in handlers::builtin() {
            registry
                .register(widget)
                .expect("built-in widget names are unique");
        }
        registry
    }

    /// Register a widget under its name
    pub fn register(&mut self, widget: Arc<dyn Widget>) -> Result<(), RegistryError> {
        let name = widget.name();
        if self.widgets.contains_key(name) {
            return Err(RegistryError::Duplicate {
                name: name.to_string(),
            });
        }
        self.widgets.insert(name, widget);
        Ok(())
    }

    /// Look up a widget by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Widget>> {
        self.widgets.get(name)
    }

    /// Check whether a widget name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.widgets.contains_key(name)
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.widgets.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetSpec;
    use crate::widget::{OptionsError, WidgetTask};

    struct Dummy(&'static str);

    impl Widget for Dummy {
        fn name(&self) -> &'static str {
            self.0
        }

        fn prepare(&self, _spec: &WidgetSpec) -> Result<Box<dyn WidgetTask>, OptionsError> {
            unimplemented!("never dispatched in these tests")
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = Registry::new();
        registry.register(Arc::new(Dummy("dummy"))).expect("first");
        assert!(registry.contains("dummy"));
        assert!(registry.get("dummy").is_some());
        assert!(registry.get("other").is_none());
    }

    #[test]
    fn test_duplicate_registration_is_an_error() {
        let mut registry = Registry::new();
        registry.register(Arc::new(Dummy("dummy"))).expect("first");
        let result = registry.register(Arc::new(Dummy("dummy")));
        assert!(matches!(result, Err(RegistryError::Duplicate { .. })));
    }

    #[test]
    fn test_builtin_set() {
        let registry = Registry::builtin();
        for name in ["banner", "blank", "disks", "load", "print", "systemd-services", "uptime"] {
            assert!(registry.contains(name), "missing builtin: {}", name);
        }
    }
}
