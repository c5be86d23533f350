//! Route definitions and navigation props
//!
//! A [`RouteDefinition`] is the immutable, registry-owned description of one
//! navigable destination: which component renders it, its default props, and
//! any chrome configuration declared at registration time. Definitions are
//! built once at startup with the consuming `with_*` methods and never
//! mutated afterwards; per-invocation state lives in scene descriptors, not
//! here.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chrome::{ChromeContext, ChromeNode, ChromeOverrides};
use crate::component::SceneComponent;

/// Loosely typed data props attached to a route or a navigation call.
pub type Props = HashMap<String, Value>;

/// Callback invoked by a chrome affordance, receiving the scene's merged
/// props.
pub type SceneCallback = Arc<dyn Fn(&Props) + Send + Sync>;

/// Prop keys with adapter-level meaning.
///
/// Any of these may be supplied per invocation to override what the route
/// definition declares.
pub mod prop_keys {
    /// Overrides the resolved title for one invocation.
    pub const TITLE: &str = "title";
    /// Nav-bar visibility override: `true` hides the bar, `false` shows it
    /// even when an ancestor hides it.
    pub const HIDE_NAV_BAR: &str = "hide_nav_bar";
    /// Label for the default right button.
    pub const RIGHT_TITLE: &str = "right_title";
    /// Label for the default left button.
    pub const LEFT_TITLE: &str = "left_title";
    /// Explicit label for the default back button, bypassing the
    /// previous-scene title lookup.
    pub const BACK_TITLE: &str = "back_title";
}

/// Transition token forwarded to the render boundary when a scene enters or
/// leaves the stack.
///
/// The routing core never animates anything itself; it only records which
/// token a scene was registered with and hands it across the boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneTransition {
    /// Appear instantly.
    #[default]
    None,
    /// Slide in from the right edge.
    PushFromRight,
    /// Float up from the bottom edge.
    FloatFromBottom,
    /// Cross-fade.
    Fade,
}

/// Tri-state navigation-bar visibility declared by a route or scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavBarVisibility {
    /// No declaration; ancestors and stack-level defaults decide.
    #[default]
    Inherit,
    /// Hide the bar while this scene is active.
    Hidden,
    /// Show the bar even when an ancestor or the stack hides it.
    Visible,
}

impl NavBarVisibility {
    /// Whether this value is an explicit declaration rather than `Inherit`.
    pub fn is_explicit(self) -> bool {
        !matches!(self, NavBarVisibility::Inherit)
    }
}

/// Immutable description of a navigable route.
///
/// Registered once under a unique name and shared read-only afterwards. The
/// adapter combines a definition with per-invocation [`SceneProps`] to
/// produce the descriptor that actually sits on a stack.
///
/// [`SceneProps`]: crate::scene::SceneProps
#[derive(Clone)]
pub struct RouteDefinition {
    name: String,
    component: Arc<dyn SceneComponent>,
    default_props: Props,
    wrap_router: bool,
    transition: SceneTransition,
    hide_nav_bar: NavBarVisibility,
    title: Option<String>,
    chrome: ChromeOverrides,
    on_right: Option<SceneCallback>,
    right_title: Option<String>,
    on_left: Option<SceneCallback>,
    left_title: Option<String>,
    on_back: Option<SceneCallback>,
    back_title: Option<String>,
}

impl RouteDefinition {
    /// Create a definition for `name` rendered by `component`.
    pub fn new(name: impl Into<String>, component: Arc<dyn SceneComponent>) -> Self {
        Self {
            name: name.into(),
            component,
            default_props: Props::new(),
            wrap_router: false,
            transition: SceneTransition::default(),
            hide_nav_bar: NavBarVisibility::default(),
            title: None,
            chrome: ChromeOverrides::default(),
            on_right: None,
            right_title: None,
            on_left: None,
            left_title: None,
            on_back: None,
            back_title: None,
        }
    }

    /// Set the static title shown while a scene of this route is active.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the transition token used when scenes of this route enter or
    /// leave a stack.
    pub fn with_transition(mut self, transition: SceneTransition) -> Self {
        self.transition = transition;
        self
    }

    /// Declare nav-bar visibility for scenes of this route.
    pub fn with_hide_nav_bar(mut self, visibility: NavBarVisibility) -> Self {
        self.hide_nav_bar = visibility;
        self
    }

    /// Mark this route as wrapping a private nested router.
    ///
    /// A scene created from a wrapping route owns a child router whose root
    /// is this same route under the `_`-prefixed name.
    pub fn with_wrap_router(mut self, wrap: bool) -> Self {
        self.wrap_router = wrap;
        self
    }

    /// Replace the default data props.
    pub fn with_default_props(mut self, props: Props) -> Self {
        self.default_props = props;
        self
    }

    /// Set one default data prop.
    pub fn with_default_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_props.insert(key.into(), value.into());
        self
    }

    /// Install a route-level title renderer.
    pub fn with_render_title<F>(mut self, render: F) -> Self
    where
        F: Fn(&ChromeContext<'_>) -> Option<ChromeNode> + Send + Sync + 'static,
    {
        self.chrome.title = Some(Arc::new(render));
        self
    }

    /// Install a route-level back-button renderer.
    pub fn with_render_back_button<F>(mut self, render: F) -> Self
    where
        F: Fn(&ChromeContext<'_>) -> Option<ChromeNode> + Send + Sync + 'static,
    {
        self.chrome.back = Some(Arc::new(render));
        self
    }

    /// Install a route-level left-button renderer.
    pub fn with_render_left_button<F>(mut self, render: F) -> Self
    where
        F: Fn(&ChromeContext<'_>) -> Option<ChromeNode> + Send + Sync + 'static,
    {
        self.chrome.left = Some(Arc::new(render));
        self
    }

    /// Install a route-level right-button renderer.
    pub fn with_render_right_button<F>(mut self, render: F) -> Self
    where
        F: Fn(&ChromeContext<'_>) -> Option<ChromeNode> + Send + Sync + 'static,
    {
        self.chrome.right = Some(Arc::new(render));
        self
    }

    /// Replace the whole route-level chrome override bundle.
    pub fn with_chrome(mut self, chrome: ChromeOverrides) -> Self {
        self.chrome = chrome;
        self
    }

    /// Bind the right-button callback.
    ///
    /// The default right button renders only when a label is paired with
    /// this callback; see [`with_right_title`](Self::with_right_title).
    pub fn with_on_right<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Props) + Send + Sync + 'static,
    {
        self.on_right = Some(Arc::new(callback));
        self
    }

    /// Set the label for the default right button.
    pub fn with_right_title(mut self, title: impl Into<String>) -> Self {
        self.right_title = Some(title.into());
        self
    }

    /// Bind the left-button callback.
    pub fn with_on_left<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Props) + Send + Sync + 'static,
    {
        self.on_left = Some(Arc::new(callback));
        self
    }

    /// Set the label for the default left button.
    pub fn with_left_title(mut self, title: impl Into<String>) -> Self {
        self.left_title = Some(title.into());
        self
    }

    /// Bind a back-press callback, replacing the automatic pop wiring.
    pub fn with_on_back<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Props) + Send + Sync + 'static,
    {
        self.on_back = Some(Arc::new(callback));
        self
    }

    /// Set an explicit back-button label.
    ///
    /// Rendered verbatim regardless of length, unlike the computed label
    /// taken from the previous scene's title.
    pub fn with_back_title(mut self, title: impl Into<String>) -> Self {
        self.back_title = Some(title.into());
        self
    }

    /// Registered route name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Component rendering scenes of this route.
    pub fn component(&self) -> &Arc<dyn SceneComponent> {
        &self.component
    }

    /// Default data props merged under invocation props.
    pub fn default_props(&self) -> &Props {
        &self.default_props
    }

    /// Whether scenes of this route own a nested router.
    pub fn wraps_router(&self) -> bool {
        self.wrap_router
    }

    /// Transition token for scenes of this route.
    pub fn transition(&self) -> SceneTransition {
        self.transition
    }

    /// Declared nav-bar visibility.
    pub fn hide_nav_bar(&self) -> NavBarVisibility {
        self.hide_nav_bar
    }

    /// Static title, if declared.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Route-level chrome overrides.
    pub fn chrome(&self) -> &ChromeOverrides {
        &self.chrome
    }

    /// Route-level right-button callback.
    pub fn on_right(&self) -> Option<&SceneCallback> {
        self.on_right.as_ref()
    }

    /// Declared right-button label.
    pub fn right_title(&self) -> Option<&str> {
        self.right_title.as_deref()
    }

    /// Route-level left-button callback.
    pub fn on_left(&self) -> Option<&SceneCallback> {
        self.on_left.as_ref()
    }

    /// Declared left-button label.
    pub fn left_title(&self) -> Option<&str> {
        self.left_title.as_deref()
    }

    /// Route-level back-press callback.
    pub fn on_back(&self) -> Option<&SceneCallback> {
        self.on_back.as_ref()
    }

    /// Declared explicit back-button label.
    pub fn back_title(&self) -> Option<&str> {
        self.back_title.as_deref()
    }

    /// Derive the synthetic root definition mounted by a nested child
    /// router.
    ///
    /// The child root reuses this route's component and configuration under
    /// the `_`-prefixed name, so parent and child stacks can never collide
    /// on a name. The derived root never wraps a router itself.
    pub fn nested_root(&self) -> RouteDefinition {
        let mut root = self.clone();
        root.name = format!("_{}", self.name);
        root.wrap_router = false;
        root
    }
}

impl fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("name", &self.name)
            .field("wrap_router", &self.wrap_router)
            .field("transition", &self.transition)
            .field("hide_nav_bar", &self.hide_nav_bar)
            .field("title", &self.title)
            .field("default_props", &self.default_props)
            .finish()
    }
}
