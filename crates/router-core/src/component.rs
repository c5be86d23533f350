//! Type-erased scene component seam
//!
//! The routing core never draws a scene. A [`SceneComponent`] is the handle
//! it carries from registration to the render boundary, plus the
//! component-level static chrome configuration the adapter consults as the
//! lowest override precedence.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::chrome::ChromeOverrides;
use crate::route::{Props, SceneCallback};

/// Render capability attached to a route.
///
/// Implementations live on the embedder's side of the boundary; the core
/// only reads the static chrome configuration and forwards the handle. All
/// methods default to "nothing declared".
pub trait SceneComponent: Send + Sync + 'static {
    /// Component-level static title.
    fn title(&self) -> Option<&str> {
        None
    }

    /// Component-level chrome overrides, consulted after invocation and
    /// route-level overrides.
    fn chrome(&self) -> ChromeOverrides {
        ChromeOverrides::default()
    }

    /// Component-level back-press handler.
    fn on_back(&self) -> Option<SceneCallback> {
        None
    }

    /// Downcast support for render boundaries that know their concrete
    /// component types.
    fn as_any(&self) -> &dyn Any;
}

/// Component carrying static configuration and nothing else.
///
/// Covers scenes whose visual the render boundary derives from the scene
/// name, and keeps tests free of embedder machinery.
#[derive(Clone, Default)]
pub struct StaticComponent {
    title: Option<String>,
    chrome: ChromeOverrides,
    on_back: Option<SceneCallback>,
}

impl StaticComponent {
    /// A component declaring nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a static title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Declare component-level chrome overrides.
    pub fn with_chrome(mut self, chrome: ChromeOverrides) -> Self {
        self.chrome = chrome;
        self
    }

    /// Declare a component-level back-press handler.
    pub fn with_on_back<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Props) + Send + Sync + 'static,
    {
        self.on_back = Some(Arc::new(callback));
        self
    }
}

impl SceneComponent for StaticComponent {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn chrome(&self) -> ChromeOverrides {
        self.chrome.clone()
    }

    fn on_back(&self) -> Option<SceneCallback> {
        self.on_back.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for StaticComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticComponent")
            .field("title", &self.title)
            .field("chrome", &self.chrome)
            .field("on_back", &self.on_back.is_some())
            .finish()
    }
}
