//! Navigation state persistence
//!
//! Captures the part of a router worth keeping across process restarts:
//! route names, invocation data props, and the selected marker. Everything
//! else (descriptor keys, render closures, callbacks, nested child stacks)
//! is transient and rebuilds from the registry on restore.

use serde::{Deserialize, Serialize};

use router_core::registry::RouteRegistry;
use router_core::route::Props;
use router_core::scene::{SceneDescriptor, SceneProps};

use crate::machine::{Result, Router};

/// One persisted stack entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedScene {
    /// Route name, re-resolved through the registry on restore.
    pub name: String,
    /// Invocation data props. Capability overrides do not persist.
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,
}

/// Serializable snapshot of one router's own stack.
///
/// Nested child stacks are deliberately absent; a restored wrapping scene
/// recreates its child at its root, exactly like a first visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedStack {
    /// Entries, root first.
    pub scenes: Vec<PersistedScene>,
    /// Selected-name marker.
    pub selected: String,
}

impl Router {
    /// Capture this router's stack for persistence.
    pub fn persist(&self) -> PersistedStack {
        PersistedStack {
            scenes: self
                .current_routes()
                .iter()
                .map(|scene| PersistedScene {
                    name: scene.name().to_string(),
                    props: scene.invocation_props().clone(),
                })
                .collect(),
            selected: self.selected().to_string(),
        }
    }

    /// Rebuild a router from a persisted stack.
    ///
    /// Every saved name must still resolve; descriptors get fresh keys, so
    /// the render boundary treats restored scenes as new containers.
    pub fn restore(registry: &RouteRegistry, saved: &PersistedStack) -> Result<Self> {
        let mut initial = Vec::with_capacity(saved.scenes.len());
        for scene in &saved.scenes {
            let route = registry.resolve(&scene.name)?;
            initial.push(SceneDescriptor::adapt(
                &route,
                SceneProps::from(scene.props.clone()),
            )?);
        }
        let mut router = Self::new(initial)?;
        router.restore_selected(&saved.selected);
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::RouterError;
    use router_core::component::StaticComponent;
    use router_core::route::RouteDefinition;
    use serde_json::json;
    use std::sync::Arc;

    fn registry(names: &[&str]) -> RouteRegistry {
        let mut registry = RouteRegistry::new();
        for name in names {
            registry
                .register(RouteDefinition::new(
                    *name,
                    Arc::new(StaticComponent::new()),
                ))
                .unwrap();
        }
        registry
    }

    fn sample_router(registry: &RouteRegistry) -> Router {
        let mut router = Router::from_registry(registry, &["home"]).unwrap();
        router
            .push(
                &registry.resolve("detail").unwrap(),
                SceneProps::new().with_value("id", json!(42)),
            )
            .unwrap();
        router
            .jump(&registry.resolve("home").unwrap(), SceneProps::new())
            .unwrap();
        router
    }

    #[test]
    fn test_persist_captures_names_props_selection() {
        let registry = registry(&["home", "detail"]);
        let router = sample_router(&registry);

        let saved = router.persist();
        assert_eq!(saved.scenes.len(), 2);
        assert_eq!(saved.scenes[0].name, "home");
        assert_eq!(saved.scenes[1].name, "detail");
        assert_eq!(saved.scenes[1].props.get("id"), Some(&json!(42)));
        assert_eq!(saved.selected, "home");
    }

    #[test]
    fn test_persisted_stack_round_trips_through_json() {
        let registry = registry(&["home", "detail"]);
        let saved = sample_router(&registry).persist();

        let json = serde_json::to_string(&saved).unwrap();
        let parsed: PersistedStack = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, saved);

        // empty props are elided from the wire form
        assert!(!json.contains("\"home\",\"props\""));
    }

    #[test]
    fn test_restore_rebuilds_stack() {
        let registry = registry(&["home", "detail"]);
        let original = sample_router(&registry);
        let saved = original.persist();

        let restored = Router::restore(&registry, &saved).unwrap();

        assert_eq!(restored.depth(), 2);
        assert_eq!(restored.active_local().name(), "detail");
        assert_eq!(restored.active_local().prop("id"), Some(&json!(42)));
        assert_eq!(restored.selected(), "home");

        // fresh descriptor keys on restore
        assert_ne!(
            restored.active_local().key(),
            original.active_local().key()
        );
    }

    #[test]
    fn test_restore_fails_on_unknown_route() {
        let registry = registry(&["home"]);
        let saved = PersistedStack {
            scenes: vec![PersistedScene {
                name: "gone".into(),
                props: Props::new(),
            }],
            selected: "gone".into(),
        };

        let err = Router::restore(&registry, &saved).unwrap_err();
        assert!(matches!(err, RouterError::Registry(_)));
    }

    #[test]
    fn test_restore_rejects_empty_stack() {
        let registry = registry(&["home"]);
        let saved = PersistedStack {
            scenes: Vec::new(),
            selected: String::new(),
        };

        let err = Router::restore(&registry, &saved).unwrap_err();
        assert!(matches!(err, RouterError::EmptyStack));
    }

    #[test]
    fn test_restore_ignores_stale_selected() {
        let registry = registry(&["home"]);
        let saved = PersistedStack {
            scenes: vec![PersistedScene {
                name: "home".into(),
                props: Props::new(),
            }],
            selected: "gone".into(),
        };

        let restored = Router::restore(&registry, &saved).unwrap();
        assert_eq!(restored.selected(), "home");
    }
}
