//! Scene descriptors and the route adapter
//!
//! The adapter turns a registered [`RouteDefinition`] plus one invocation's
//! [`SceneProps`] into the [`SceneDescriptor`] that actually sits on a
//! router stack. All chrome precedence is settled here, once, at adapt
//! time: invocation overrides beat route-level configuration, which beats
//! component statics. Stack-level defaults stay out of the descriptor; the
//! resolver layers them in when the bar is drawn.
//!
//! Descriptors are immutable after creation and cheap to clone; every
//! mutation of a stack creates new descriptors rather than editing old
//! ones.

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::chrome::{
    ChromeAction, ChromeContext, ChromeNode, ChromeOverrides, ChromeSlot, RenderFn, BACK_ICON,
};
use crate::route::{
    prop_keys, NavBarVisibility, Props, RouteDefinition, SceneCallback, SceneTransition,
};

/// Longest computed back label rendered next to the chevron. Labels taken
/// from the previous scene's title and longer than this are dropped in
/// favor of the icon alone; explicit back titles are exempt.
pub const MAX_BACK_LABEL_CHARS: usize = 10;

/// Adapter errors.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The route's name is empty, so the scene could never be addressed.
    #[error("invalid route: name is empty")]
    InvalidRoute,
}

// ============================================================================
// Scene Props
// ============================================================================

/// Per-invocation props: data values plus capability overrides.
///
/// Render closures and callbacks cannot ride inside JSON values, so they
/// travel alongside the data map. The data map also carries the
/// adapter-level keys in [`prop_keys`].
#[derive(Clone, Default)]
pub struct SceneProps {
    /// Data props; override the route's default props key by key.
    pub values: Props,
    /// Per-invocation chrome renderers, the highest slot precedence.
    pub chrome: ChromeOverrides,
    /// Per-invocation right-button callback.
    pub on_right: Option<SceneCallback>,
    /// Per-invocation left-button callback.
    pub on_left: Option<SceneCallback>,
    /// Per-invocation back-press callback.
    pub on_back: Option<SceneCallback>,
}

impl SceneProps {
    /// Empty props.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one data value.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Replace the data map.
    pub fn with_values(mut self, values: Props) -> Self {
        self.values = values;
        self
    }

    /// Set the per-invocation chrome override bundle.
    pub fn with_chrome(mut self, chrome: ChromeOverrides) -> Self {
        self.chrome = chrome;
        self
    }

    /// Bind a per-invocation right-button callback.
    pub fn with_on_right<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Props) + Send + Sync + 'static,
    {
        self.on_right = Some(Arc::new(callback));
        self
    }

    /// Bind a per-invocation left-button callback.
    pub fn with_on_left<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Props) + Send + Sync + 'static,
    {
        self.on_left = Some(Arc::new(callback));
        self
    }

    /// Bind a per-invocation back-press callback.
    pub fn with_on_back<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Props) + Send + Sync + 'static,
    {
        self.on_back = Some(Arc::new(callback));
        self
    }
}

impl From<Props> for SceneProps {
    fn from(values: Props) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }
}

impl fmt::Debug for SceneProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneProps")
            .field("values", &self.values)
            .field("chrome", &self.chrome)
            .field("on_right", &self.on_right.is_some())
            .field("on_left", &self.on_left.is_some())
            .field("on_back", &self.on_back.is_some())
            .finish()
    }
}

// ============================================================================
// Scene Descriptor
// ============================================================================

/// One stack entry: a named, parameterized instance of a route.
///
/// Created by [`SceneDescriptor::adapt`] and immutable afterwards. Two
/// descriptors of the same route are distinct entries with distinct keys;
/// the key is what the render boundary uses to identify a scene's
/// container across stack changes.
#[derive(Clone)]
pub struct SceneDescriptor {
    name: String,
    key: String,
    route: Arc<RouteDefinition>,
    props: SceneProps,
    slots: ChromeOverrides,
    on_right: Option<SceneCallback>,
    on_left: Option<SceneCallback>,
    on_back: Option<SceneCallback>,
    right_title: Option<String>,
    left_title: Option<String>,
    back_title: Option<String>,
    hide_nav_bar: NavBarVisibility,
    transition: SceneTransition,
    wrap_router: bool,
    title: OnceLock<String>,
}

impl SceneDescriptor {
    /// Adapt a route definition plus invocation props into a stack entry.
    ///
    /// Resolves each chrome slot's renderer once (invocation, then route,
    /// then component static), binds button callbacks and labels the same
    /// way, and reads the adapter-level prop keys. The definition itself is
    /// never mutated. Fails when the route's name is empty.
    pub fn adapt(route: &Arc<RouteDefinition>, props: SceneProps) -> Result<Self, SceneError> {
        if route.name().is_empty() {
            return Err(SceneError::InvalidRoute);
        }

        let component = route.component();
        let component_chrome = component.chrome();
        let slots = ChromeOverrides {
            title: props
                .chrome
                .title
                .clone()
                .or_else(|| route.chrome().title.clone())
                .or(component_chrome.title),
            back: props
                .chrome
                .back
                .clone()
                .or_else(|| route.chrome().back.clone())
                .or(component_chrome.back),
            left: props
                .chrome
                .left
                .clone()
                .or_else(|| route.chrome().left.clone())
                .or(component_chrome.left),
            right: props
                .chrome
                .right
                .clone()
                .or_else(|| route.chrome().right.clone())
                .or(component_chrome.right),
        };

        let on_right = props.on_right.clone().or_else(|| route.on_right().cloned());
        let on_left = props.on_left.clone().or_else(|| route.on_left().cloned());
        let on_back = props
            .on_back
            .clone()
            .or_else(|| route.on_back().cloned())
            .or_else(|| component.on_back());

        let right_title = string_prop(&props.values, prop_keys::RIGHT_TITLE)
            .or_else(|| route.right_title().map(str::to_string));
        let left_title = string_prop(&props.values, prop_keys::LEFT_TITLE)
            .or_else(|| route.left_title().map(str::to_string));
        let back_title = string_prop(&props.values, prop_keys::BACK_TITLE)
            .or_else(|| route.back_title().map(str::to_string));

        let hide_nav_bar = match bool_prop(&props.values, prop_keys::HIDE_NAV_BAR) {
            Some(true) => NavBarVisibility::Hidden,
            Some(false) => NavBarVisibility::Visible,
            None => route.hide_nav_bar(),
        };

        Ok(Self {
            name: route.name().to_string(),
            key: Uuid::new_v4().to_string(),
            transition: route.transition(),
            wrap_router: route.wraps_router(),
            route: Arc::clone(route),
            props,
            slots,
            on_right,
            on_left,
            on_back,
            right_title,
            left_title,
            back_title,
            hide_nav_bar,
            title: OnceLock::new(),
        })
    }

    /// Route name this scene was created under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unique key identifying this entry across stack changes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The definition this scene was adapted from.
    pub fn route(&self) -> &Arc<RouteDefinition> {
        &self.route
    }

    /// The invocation props this scene was adapted with.
    pub fn scene_props(&self) -> &SceneProps {
        &self.props
    }

    /// Invocation data props only, without route defaults.
    pub fn invocation_props(&self) -> &Props {
        &self.props.values
    }

    /// Whether `name` addresses this scene. Jump and restore identity is by
    /// name, never by key.
    pub fn is_same_scene(&self, name: &str) -> bool {
        self.name == name
    }

    /// Transition token for this scene's enter and exit.
    pub fn transition(&self) -> SceneTransition {
        self.transition
    }

    /// Whether this scene owns a nested router.
    pub fn wraps_router(&self) -> bool {
        self.wrap_router
    }

    /// Nav-bar visibility resolved at adapt time.
    pub fn hide_nav_bar(&self) -> NavBarVisibility {
        self.hide_nav_bar
    }

    /// Resolved title, computed on first access and cached for the entry's
    /// lifetime.
    ///
    /// Precedence: invocation `title` prop, then route title, then
    /// component title, then empty.
    pub fn title(&self) -> &str {
        self.title.get_or_init(|| {
            string_prop(&self.props.values, prop_keys::TITLE)
                .or_else(|| self.route.title().map(str::to_string))
                .or_else(|| self.route.component().title().map(str::to_string))
                .unwrap_or_default()
        })
    }

    /// Merged view of route defaults and invocation props, invocation
    /// winning key by key. This is what chrome callbacks receive.
    pub fn merged_props(&self) -> Props {
        let mut merged = self.route.default_props().clone();
        merged.extend(
            self.props
                .values
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        merged
    }

    /// One prop, invocation first, then route defaults.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props
            .values
            .get(key)
            .or_else(|| self.route.default_props().get(key))
    }

    /// The custom renderer resolved for `slot` at adapt time, if any.
    pub fn custom_slot(&self, slot: ChromeSlot) -> Option<&RenderFn> {
        self.slots.get(slot)
    }

    /// The callback bound to a button slot.
    pub fn callback(&self, slot: ChromeSlot) -> Option<&SceneCallback> {
        match slot {
            ChromeSlot::Right => self.on_right.as_ref(),
            ChromeSlot::Left => self.on_left.as_ref(),
            ChromeSlot::Back => self.on_back.as_ref(),
            ChromeSlot::Title => None,
        }
    }

    /// Render `slot` through its custom renderer, falling back to the
    /// built-in default.
    pub fn render_slot(&self, slot: ChromeSlot, ctx: &ChromeContext<'_>) -> Option<ChromeNode> {
        match self.custom_slot(slot) {
            Some(render) => render(ctx),
            None => self.default_render(slot, ctx),
        }
    }

    /// The built-in renderer for `slot`.
    pub fn default_render(&self, slot: ChromeSlot, ctx: &ChromeContext<'_>) -> Option<ChromeNode> {
        match slot {
            ChromeSlot::Title => self.default_title(),
            ChromeSlot::Back => self.default_back(ctx),
            ChromeSlot::Left => self.default_left(),
            ChromeSlot::Right => self.default_right(),
        }
    }

    fn default_title(&self) -> Option<ChromeNode> {
        let title = self.title();
        if title.is_empty() {
            None
        } else {
            Some(ChromeNode::text(title))
        }
    }

    /// Back affordance: chevron plus an optional label, absent on root
    /// scenes.
    ///
    /// The label comes from an explicit back title verbatim, else from the
    /// previous scene's title when it fits [`MAX_BACK_LABEL_CHARS`]. A
    /// scene-bound back callback replaces the automatic pop action.
    fn default_back(&self, ctx: &ChromeContext<'_>) -> Option<ChromeNode> {
        if ctx.index == 0 {
            return None;
        }

        let label = match &self.back_title {
            Some(explicit) => Some(explicit.clone()),
            None => ctx
                .previous()
                .map(|previous| previous.title().to_string())
                .filter(|title| !title.is_empty() && title.chars().count() <= MAX_BACK_LABEL_CHARS),
        };

        let action = if self.on_back.is_some() {
            ChromeAction::Invoke {
                slot: ChromeSlot::Back,
            }
        } else {
            ChromeAction::Back
        };

        let mut children = vec![ChromeNode::icon(BACK_ICON)];
        if let Some(label) = label {
            children.push(ChromeNode::text(label));
        }
        Some(ChromeNode::button(action, children))
    }

    /// Left button: rendered only when a callback and a label are both
    /// bound.
    fn default_left(&self) -> Option<ChromeNode> {
        match (&self.on_left, &self.left_title) {
            (Some(_), Some(label)) => Some(ChromeNode::button(
                ChromeAction::Invoke {
                    slot: ChromeSlot::Left,
                },
                vec![ChromeNode::text(label.clone())],
            )),
            (None, None) => None,
            _ => {
                tracing::warn!(
                    scene = %self.name,
                    "left button needs both on_left and left_title; rendering nothing"
                );
                None
            }
        }
    }

    /// Right button: rendered only when a callback and a label are both
    /// bound.
    fn default_right(&self) -> Option<ChromeNode> {
        match (&self.on_right, &self.right_title) {
            (Some(_), Some(label)) => Some(ChromeNode::button(
                ChromeAction::Invoke {
                    slot: ChromeSlot::Right,
                },
                vec![ChromeNode::text(label.clone())],
            )),
            (None, None) => None,
            _ => {
                tracing::warn!(
                    scene = %self.name,
                    "right button needs both on_right and right_title; rendering nothing"
                );
                None
            }
        }
    }
}

impl fmt::Debug for SceneDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneDescriptor")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("wrap_router", &self.wrap_router)
            .field("transition", &self.transition)
            .field("hide_nav_bar", &self.hide_nav_bar)
            .finish()
    }
}

fn string_prop(values: &Props, key: &str) -> Option<String> {
    values.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_prop(values: &Props, key: &str) -> Option<bool> {
    values.get(key).and_then(Value::as_bool)
}
