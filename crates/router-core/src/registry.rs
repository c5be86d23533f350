//! Route registry
//!
//! The registry is the single mapping from route name to definition.
//! Populated once at startup, then shared read-only (typically as an
//! `Arc<RouteRegistry>`) by every router and navigator for the process
//! lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::route::RouteDefinition;

/// Registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A route with the same name is already registered.
    #[error("duplicate route: {0}")]
    DuplicateRoute(String),
    /// No route is registered under the requested name.
    #[error("unknown route: {0}")]
    UnknownRoute(String),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Mapping from unique route name to shared definition.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: HashMap<String, Arc<RouteDefinition>>,
}

impl RouteRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under its name.
    ///
    /// Names are unique for the registry's lifetime; a second registration
    /// under the same name is rejected rather than silently replacing the
    /// first.
    pub fn register(&mut self, route: RouteDefinition) -> Result<()> {
        let name = route.name().to_string();
        if self.routes.contains_key(&name) {
            return Err(RegistryError::DuplicateRoute(name));
        }
        tracing::debug!(route = %name, "route registered");
        self.routes.insert(name, Arc::new(route));
        Ok(())
    }

    /// Look up a definition by name.
    pub fn resolve(&self, name: &str) -> Result<Arc<RouteDefinition>> {
        self.routes
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownRoute(name.to_string()))
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> Vec<&str> {
        self.routes.keys().map(String::as_str).collect()
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
