//! Core data model for the scene router
//!
//! This crate provides the routing vocabulary shared by the state machine
//! and the chrome layer: route definitions and the registry they live in,
//! the adapter turning definitions into per-invocation scene descriptors,
//! the serializable chrome widget model, and the type-erased component
//! seam the render boundary plugs into.
//!
//! # Precedence
//!
//! Chrome configuration can be declared at four levels. The adapter settles
//! the first three when a scene is created; the resolver adds the last:
//!
//! 1. Invocation props ([`scene::SceneProps`])
//! 2. Route definition ([`route::RouteDefinition`])
//! 3. Component statics ([`component::SceneComponent`])
//! 4. Stack-level defaults (applied by the chrome resolver)
//!
//! # Modules
//!
//! - [`route`] - Route definitions, props, transitions
//! - [`registry`] - Name to definition mapping
//! - [`scene`] - Scene descriptors and the route adapter
//! - [`chrome`] - Chrome widget model and render capabilities
//! - [`component`] - Type-erased scene component seam
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use router_core::component::StaticComponent;
//! use router_core::registry::RouteRegistry;
//! use router_core::route::RouteDefinition;
//! use router_core::scene::{SceneDescriptor, SceneProps};
//!
//! let mut registry = RouteRegistry::new();
//! registry
//!     .register(
//!         RouteDefinition::new("home", Arc::new(StaticComponent::new())).with_title("Home"),
//!     )
//!     .unwrap();
//!
//! let route = registry.resolve("home").unwrap();
//! let scene = SceneDescriptor::adapt(&route, SceneProps::new()).unwrap();
//! assert_eq!(scene.title(), "Home");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chrome;
pub mod component;
pub mod registry;
pub mod route;
pub mod scene;

// Re-export commonly used types
pub use chrome::{
    render_fn, ChromeAction, ChromeContext, ChromeNode, ChromeOverrides, ChromeSlot, RenderFn,
    BACK_ICON,
};

pub use component::{SceneComponent, StaticComponent};

pub use registry::{RegistryError, RouteRegistry};

pub use route::{
    prop_keys, NavBarVisibility, Props, RouteDefinition, SceneCallback, SceneTransition,
};

pub use scene::{SceneDescriptor, SceneError, SceneProps, MAX_BACK_LABEL_CHARS};
