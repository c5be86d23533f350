//! Chrome resolution and render-boundary glue for the scene router
//!
//! This crate sits between the state machine and the embedder's rendering:
//! it resolves the navigation bar's widgets for whatever scene is active
//! and drives a [`host::RenderBoundary`] once per committed stack change.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod host;
pub mod resolver;

// Re-export commonly used types
pub use host::{NavigationHost, RenderBoundary};
pub use resolver::{resolve_chrome, ChromeBar};
