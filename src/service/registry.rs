//! Name-keyed table of services

use std::collections::HashMap;
use std::sync::Arc;

use crate::service::hello::HelloService;

/// Failure of a service to interpret its input.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("malformed service input: {0}")]
    MalformedServiceInput(String),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("service `{0}` is already registered")]
    DuplicateService(String),
}

/// A dynamic handler behind `/app/<name>`.
pub trait Service: Send + Sync {
    /// Produces the response body for `target`, the request target with the
    /// `/app` prefix removed (query string included).
    fn handle(&self, target: &str) -> Result<String, ServiceError>;
}

/// Registered services, looked up by name.
#[derive(Default)]
pub struct ServiceRegistry {
    services: HashMap<String, Arc<dyn Service>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the bundled services.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let registered = registry.register("hello", HelloService);
        debug_assert!(registered.is_ok());
        registry
    }

    /// Adds a service under a name that must not be taken yet.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        service: impl Service + 'static,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.services.contains_key(&name) {
            return Err(RegistryError::DuplicateService(name));
        }

        tracing::debug!(service = %name, "Service registered");
        self.services.insert(name, Arc::new(service));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Service>> {
        self.services.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.services.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
