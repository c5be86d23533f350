//! Router state machine
//!
//! A [`Router`] owns the ordered scene stack for one navigation context and
//! applies every stack mutation atomically: push, replace, reset, jump, and
//! pop either commit completely or leave the stack untouched. The stack is
//! never empty while a router is alive, and the root entry can never be
//! popped.
//!
//! Scenes created from a wrapping route own a private child [`Router`],
//! instantiated lazily on first access. Child stacks are addressed through
//! their parent entry; destroying the parent entry drops the whole subtree.

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use parking_lot::RwLock;
use thiserror::Error;
use uuid::Uuid;

use router_core::chrome::ChromeOverrides;
use router_core::registry::{RegistryError, RouteRegistry};
use router_core::route::{RouteDefinition, SceneTransition};
use router_core::scene::{SceneDescriptor, SceneError, SceneProps};

/// Shared handle to a router, used by the action bus, nested scenes, and
/// the navigation host.
pub type SharedRouter = Arc<RwLock<Router>>;

/// Weak counterpart of [`SharedRouter`]. The bus holds this so a
/// registration never keeps a dead router alive.
pub type WeakRouter = Weak<RwLock<Router>>;

/// Router errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A pop would remove the root entry.
    #[error("cannot pop {requested} scene(s): stack depth is {depth}")]
    Underflow {
        /// Number of scenes the pop asked for.
        requested: usize,
        /// Stack depth at the time of the request.
        depth: usize,
    },
    /// The stack is empty where at least one entry is required.
    #[error("scene stack is empty")]
    EmptyStack,
    /// Adapting a route into a descriptor failed.
    #[error(transparent)]
    Scene(#[from] SceneError),
    /// Resolving a route name failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result type for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;

/// Unique identity of one router instance, independent of its position in
/// the nesting tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouterId(String);

impl RouterId {
    /// Generate a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for RouterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RouterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stack-level chrome defaults, the outermost precedence layer.
#[derive(Clone, Default)]
pub struct StackConfig {
    /// Hide the nav bar for every scene on this stack unless a scene
    /// explicitly opts back in.
    pub hide_nav_bar: bool,
    /// Stack-level slot renderers, consulted after component statics.
    pub chrome: ChromeOverrides,
}

impl fmt::Debug for StackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackConfig")
            .field("hide_nav_bar", &self.hide_nav_bar)
            .field("chrome", &self.chrome)
            .finish()
    }
}

// ============================================================================
// Scene Nodes
// ============================================================================

/// One entry of a router's stack.
pub enum SceneNode {
    /// A plain scene.
    Leaf(SceneDescriptor),
    /// A scene owning a private nested router.
    Nested {
        /// The wrapping scene as it appears on the parent stack.
        descriptor: SceneDescriptor,
        /// Child router, created lazily on first access.
        child: OnceLock<SharedRouter>,
    },
}

impl SceneNode {
    fn from_descriptor(descriptor: SceneDescriptor) -> Self {
        if descriptor.wraps_router() {
            SceneNode::Nested {
                descriptor,
                child: OnceLock::new(),
            }
        } else {
            SceneNode::Leaf(descriptor)
        }
    }

    /// The scene backing this entry.
    pub fn descriptor(&self) -> &SceneDescriptor {
        match self {
            SceneNode::Leaf(descriptor) => descriptor,
            SceneNode::Nested { descriptor, .. } => descriptor,
        }
    }

    /// The nested child router, instantiated on first access.
    ///
    /// Returns `None` for leaf entries. The child mounts a single root
    /// scene: the parent's route under its `_`-prefixed name, carrying the
    /// parent's invocation props.
    pub fn child_router(&self) -> Option<&SharedRouter> {
        match self {
            SceneNode::Leaf(_) => None,
            SceneNode::Nested { descriptor, child } => Some(child.get_or_init(|| {
                let root = Arc::new(descriptor.route().nested_root());
                let scene = SceneDescriptor::adapt(&root, descriptor.scene_props().clone())
                    .expect("nested root adapts from an already validated parent");
                tracing::debug!(
                    parent = descriptor.name(),
                    root = scene.name(),
                    "child router created"
                );
                Router::new(vec![scene])
                    .expect("child router starts with its root scene")
                    .into_shared()
            })),
        }
    }

    /// Whether the child router has been instantiated yet.
    pub fn has_child(&self) -> bool {
        matches!(self, SceneNode::Nested { child, .. } if child.get().is_some())
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneNode::Leaf(descriptor) => f.debug_tuple("Leaf").field(descriptor).finish(),
            SceneNode::Nested { descriptor, child } => f
                .debug_struct("Nested")
                .field("descriptor", descriptor)
                .field("child", &child.get().is_some())
                .finish(),
        }
    }
}

// ============================================================================
// Stack Events and Snapshots
// ============================================================================

/// A committed stack mutation, returned to the caller so the render host
/// can reconcile exactly once per change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEvent {
    /// A scene was appended at the tail.
    Pushed {
        /// Name of the entering scene.
        name: String,
        /// Transition token for the enter animation.
        transition: SceneTransition,
    },
    /// The tail scene was substituted in place.
    Replaced {
        /// Name of the entering scene.
        name: String,
        /// Transition token for the swap animation.
        transition: SceneTransition,
    },
    /// The stack was rebuilt around a single scene. Structural; never
    /// animated.
    Reset {
        /// Name of the new root scene.
        name: String,
    },
    /// Focus moved to a scene by name.
    Jumped {
        /// Name of the focused scene.
        name: String,
        /// Whether the scene was created (the jump behaved like a push).
        created: bool,
    },
    /// Tail scenes were removed.
    Popped {
        /// Number of scenes removed.
        count: usize,
        /// Transition token of the departing tail scene.
        transition: SceneTransition,
    },
}

/// Point-in-time copy of one router's stack.
#[derive(Debug, Clone)]
pub struct StackSnapshot {
    /// Scene clones, root first.
    pub scenes: Vec<SceneDescriptor>,
    /// Selected-name marker.
    pub selected: String,
}

/// One level of the chain from outermost stack to innermost active scene.
#[derive(Debug, Clone)]
pub struct PathSegment {
    /// The active (tail) scene at this level.
    pub scene: SceneDescriptor,
    /// Index of `scene` in its owning stack.
    pub index: usize,
    /// Owning stack snapshot, root first.
    pub stack: Vec<SceneDescriptor>,
    /// Owning router's stack-level defaults.
    pub config: StackConfig,
    /// Owning router's id.
    pub router_id: RouterId,
}

/// Outermost-to-innermost chain ending at the active scene.
///
/// Each segment is the tail of one router's stack; the last segment is the
/// scene the user actually sees. The chrome resolver walks this chain for
/// visibility and slot resolution.
#[derive(Debug, Clone, Default)]
pub struct ActivePath {
    /// Segments, outermost first.
    pub segments: Vec<PathSegment>,
}

impl ActivePath {
    /// The innermost segment, if the path is non-empty.
    pub fn active(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Nesting depth of the active scene (1 for a top-level scene).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

// ============================================================================
// Router
// ============================================================================

/// State machine owning the ordered scene stack of one navigation context.
///
/// Mutations return the committed [`StackEvent`] so the caller can drive
/// rendering; queries never change state. A router starts with at least one
/// scene and keeps at least one for its whole life.
pub struct Router {
    id: RouterId,
    stack: Vec<SceneNode>,
    selected: String,
    config: StackConfig,
}

impl Router {
    /// Build a router from an ordered, non-empty list of initial scenes.
    ///
    /// The last entry becomes the active scene and the initial selected
    /// marker.
    pub fn new(initial: Vec<SceneDescriptor>) -> Result<Self> {
        let selected = initial
            .last()
            .map(|scene| scene.name().to_string())
            .ok_or(RouterError::EmptyStack)?;

        Ok(Self {
            id: RouterId::new(),
            stack: initial.into_iter().map(SceneNode::from_descriptor).collect(),
            selected,
            config: StackConfig::default(),
        })
    }

    /// Build a router by resolving route names through a registry, with
    /// empty invocation props.
    pub fn from_registry(registry: &RouteRegistry, names: &[&str]) -> Result<Self> {
        let mut initial = Vec::with_capacity(names.len());
        for name in names {
            let route = registry.resolve(name)?;
            initial.push(SceneDescriptor::adapt(&route, SceneProps::new())?);
        }
        Self::new(initial)
    }

    /// Wrap this router in the shared handle used by the bus and the host.
    pub fn into_shared(self) -> SharedRouter {
        Arc::new(RwLock::new(self))
    }

    /// This router's unique id.
    pub fn id(&self) -> &RouterId {
        &self.id
    }

    /// Stack-level chrome defaults.
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Replace the stack-level chrome defaults.
    pub fn set_config(&mut self, config: StackConfig) {
        self.config = config;
    }

    /// Number of scenes on this router's own stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Name marked as selected for focus highlighting. Moves on jump and
    /// reset, nothing else.
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Scenes on this router's own stack, root first.
    pub fn current_routes(&self) -> Vec<&SceneDescriptor> {
        self.stack.iter().map(SceneNode::descriptor).collect()
    }

    /// This router's own active (tail) scene.
    pub fn active_local(&self) -> &SceneDescriptor {
        self.tail().descriptor()
    }

    /// The innermost active scene, descending through nested children.
    pub fn active_route(&self) -> SceneDescriptor {
        let node = self.tail();
        match node.child_router() {
            Some(child) => child.read().active_route(),
            None => node.descriptor().clone(),
        }
    }

    /// The entry at `index`, root first.
    pub fn node_at(&self, index: usize) -> Option<&SceneNode> {
        self.stack.get(index)
    }

    /// Clone this router's stack and selected marker.
    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot {
            scenes: self
                .stack
                .iter()
                .map(|node| node.descriptor().clone())
                .collect(),
            selected: self.selected.clone(),
        }
    }

    /// The chain from this stack's tail down to the innermost active scene.
    ///
    /// Walking the chain instantiates nested child routers the same way
    /// first render would.
    pub fn active_path(&self) -> ActivePath {
        let mut path = ActivePath::default();
        self.extend_path(&mut path);
        path
    }

    fn extend_path(&self, path: &mut ActivePath) {
        let node = self.tail();
        path.segments.push(PathSegment {
            scene: node.descriptor().clone(),
            index: self.stack.len() - 1,
            stack: self
                .stack
                .iter()
                .map(|entry| entry.descriptor().clone())
                .collect(),
            config: self.config.clone(),
            router_id: self.id.clone(),
        });
        if let Some(child) = node.child_router() {
            child.read().extend_path(path);
        }
    }

    fn tail(&self) -> &SceneNode {
        self.stack.last().expect("stack is never empty while mounted")
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a new scene at the tail.
    pub fn push(&mut self, route: &Arc<RouteDefinition>, props: SceneProps) -> Result<StackEvent> {
        let scene = SceneDescriptor::adapt(route, props)?;
        let event = StackEvent::Pushed {
            name: scene.name().to_string(),
            transition: scene.transition(),
        };
        tracing::debug!(scene = scene.name(), depth = self.stack.len() + 1, "push");
        self.stack.push(SceneNode::from_descriptor(scene));
        Ok(event)
    }

    /// Substitute the tail scene in place. Stack depth is unchanged; the
    /// departing scene's subtree is dropped.
    pub fn replace(
        &mut self,
        route: &Arc<RouteDefinition>,
        props: SceneProps,
    ) -> Result<StackEvent> {
        let scene = SceneDescriptor::adapt(route, props)?;
        let tail = self.stack.last_mut().ok_or(RouterError::EmptyStack)?;
        let event = StackEvent::Replaced {
            name: scene.name().to_string(),
            transition: scene.transition(),
        };
        tracing::debug!(scene = scene.name(), "replace");
        *tail = SceneNode::from_descriptor(scene);
        Ok(event)
    }

    /// Discard the whole stack and install a single scene as the new root.
    ///
    /// The selected marker moves to the new root. Structural; the render
    /// boundary must not animate it.
    pub fn reset(&mut self, route: &Arc<RouteDefinition>, props: SceneProps) -> Result<StackEvent> {
        if self.stack.is_empty() {
            return Err(RouterError::EmptyStack);
        }
        let scene = SceneDescriptor::adapt(route, props)?;
        let name = scene.name().to_string();
        tracing::debug!(scene = %name, discarded = self.stack.len(), "reset");
        self.stack.clear();
        self.stack.push(SceneNode::from_descriptor(scene));
        self.selected = name.clone();
        Ok(StackEvent::Reset { name })
    }

    /// Move focus to the first scene named like `route`, pushing it first
    /// when absent.
    ///
    /// A hit moves the selected marker only; stack order and length are
    /// unchanged and no duplicate is created.
    pub fn jump(&mut self, route: &Arc<RouteDefinition>, props: SceneProps) -> Result<StackEvent> {
        let name = route.name().to_string();
        let exists = self
            .stack
            .iter()
            .any(|node| node.descriptor().is_same_scene(&name));

        if exists {
            tracing::debug!(scene = %name, "jump to existing scene");
            self.selected = name.clone();
            Ok(StackEvent::Jumped {
                name,
                created: false,
            })
        } else {
            self.push(route, props)?;
            self.selected = name.clone();
            Ok(StackEvent::Jumped {
                name,
                created: true,
            })
        }
    }

    /// Remove `count` scenes from the tail.
    ///
    /// The root entry can never be popped: a count reaching it fails with
    /// [`RouterError::Underflow`] and removes nothing. A count of zero
    /// commits as a no-op.
    pub fn pop(&mut self, count: usize) -> Result<StackEvent> {
        let depth = self.stack.len();
        if depth == 0 || count >= depth {
            return Err(RouterError::Underflow {
                requested: count,
                depth,
            });
        }

        let transition = self.active_local().transition();
        tracing::debug!(count, depth = depth - count, "pop");
        self.stack.truncate(depth - count);
        Ok(StackEvent::Popped { count, transition })
    }

    pub(crate) fn restore_selected(&mut self, name: &str) {
        if self
            .stack
            .iter()
            .any(|node| node.descriptor().is_same_scene(name))
        {
            self.selected = name.to_string();
        }
    }

    /// A router with an empty stack, bypassing the constructor guard.
    #[cfg(test)]
    pub(crate) fn corrupt_empty() -> Self {
        Self {
            id: RouterId::new(),
            stack: Vec::new(),
            selected: String::new(),
            config: StackConfig::default(),
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("id", &self.id)
            .field("depth", &self.stack.len())
            .field("selected", &self.selected)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use router_core::component::StaticComponent;
    use serde_json::json;

    fn route(name: &str) -> Arc<RouteDefinition> {
        Arc::new(RouteDefinition::new(
            name,
            Arc::new(StaticComponent::new()),
        ))
    }

    fn wrapping_route(name: &str) -> Arc<RouteDefinition> {
        Arc::new(
            RouteDefinition::new(name, Arc::new(StaticComponent::new())).with_wrap_router(true),
        )
    }

    fn scene(name: &str) -> SceneDescriptor {
        SceneDescriptor::adapt(&route(name), SceneProps::new()).unwrap()
    }

    fn router(names: &[&str]) -> Router {
        Router::new(names.iter().map(|name| scene(name)).collect()).unwrap()
    }

    fn names(router: &Router) -> Vec<String> {
        router
            .current_routes()
            .iter()
            .map(|scene| scene.name().to_string())
            .collect()
    }

    #[test]
    fn test_new_rejects_empty_initial() {
        let err = Router::new(Vec::new()).unwrap_err();
        assert!(matches!(err, RouterError::EmptyStack));
    }

    #[test]
    fn test_initial_stack_order_and_selection() {
        let router = router(&["home", "feed"]);

        assert_eq!(router.depth(), 2);
        assert_eq!(names(&router), ["home", "feed"]);
        assert_eq!(router.active_local().name(), "feed");
        assert_eq!(router.selected(), "feed");
    }

    #[test]
    fn test_push_appends_at_tail() {
        let mut router = router(&["home"]);
        let event = router.push(&route("detail"), SceneProps::new()).unwrap();

        assert_eq!(
            event,
            StackEvent::Pushed {
                name: "detail".into(),
                transition: SceneTransition::None,
            }
        );
        assert_eq!(names(&router), ["home", "detail"]);
        assert_eq!(router.active_local().name(), "detail");
        // push never moves the selected marker
        assert_eq!(router.selected(), "home");
    }

    #[test]
    fn test_push_then_pop_restores_previous_state() {
        let mut router = router(&["home"]);
        let before: Vec<String> = router
            .current_routes()
            .iter()
            .map(|scene| scene.key().to_string())
            .collect();

        router.push(&route("detail"), SceneProps::new()).unwrap();
        router.pop(1).unwrap();

        let after: Vec<String> = router
            .current_routes()
            .iter()
            .map(|scene| scene.key().to_string())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_replace_keeps_depth() {
        let mut router = router(&["home", "feed"]);
        let event = router.replace(&route("detail"), SceneProps::new()).unwrap();

        assert!(matches!(event, StackEvent::Replaced { ref name, .. } if name == "detail"));
        assert_eq!(router.depth(), 2);
        assert_eq!(names(&router), ["home", "detail"]);
    }

    #[test]
    fn test_replace_on_corrupt_empty_stack() {
        let mut router = Router::corrupt_empty();
        let err = router.replace(&route("detail"), SceneProps::new()).unwrap_err();
        assert!(matches!(err, RouterError::EmptyStack));
    }

    #[test]
    fn test_reset_rebuilds_single_scene() {
        let mut router = router(&["home", "feed", "detail"]);
        let event = router.reset(&route("login"), SceneProps::new()).unwrap();

        assert_eq!(event, StackEvent::Reset { name: "login".into() });
        assert_eq!(router.depth(), 1);
        assert_eq!(router.active_local().name(), "login");
        assert_eq!(router.selected(), "login");
    }

    #[test]
    fn test_reset_guard_on_corrupt_empty_stack() {
        let mut router = Router::corrupt_empty();
        let err = router.reset(&route("login"), SceneProps::new()).unwrap_err();
        assert!(matches!(err, RouterError::EmptyStack));
    }

    #[test]
    fn test_jump_to_existing_scene_moves_focus_only() {
        let mut router = router(&["home", "feed", "detail"]);
        let keys_before: Vec<String> = router
            .current_routes()
            .iter()
            .map(|scene| scene.key().to_string())
            .collect();

        let event = router.jump(&route("feed"), SceneProps::new()).unwrap();

        assert_eq!(
            event,
            StackEvent::Jumped {
                name: "feed".into(),
                created: false,
            }
        );
        assert_eq!(router.selected(), "feed");
        assert_eq!(router.depth(), 3);

        let keys_after: Vec<String> = router
            .current_routes()
            .iter()
            .map(|scene| scene.key().to_string())
            .collect();
        assert_eq!(keys_before, keys_after);
    }

    #[test]
    fn test_jump_to_missing_scene_pushes() {
        let mut router = router(&["home"]);
        let event = router.jump(&route("profile"), SceneProps::new()).unwrap();

        assert_eq!(
            event,
            StackEvent::Jumped {
                name: "profile".into(),
                created: true,
            }
        );
        assert_eq!(names(&router), ["home", "profile"]);
        assert_eq!(router.selected(), "profile");
    }

    #[test]
    fn test_pop_multiple() {
        let mut router = router(&["home", "feed", "detail"]);
        let event = router.pop(2).unwrap();

        assert!(matches!(event, StackEvent::Popped { count: 2, .. }));
        assert_eq!(names(&router), ["home"]);
    }

    #[test]
    fn test_pop_zero_is_a_committed_noop() {
        let mut router = router(&["home"]);
        let event = router.pop(0).unwrap();

        assert!(matches!(event, StackEvent::Popped { count: 0, .. }));
        assert_eq!(router.depth(), 1);
    }

    #[test]
    fn test_pop_never_removes_root() {
        let mut router = router(&["home", "feed"]);

        let err = router.pop(2).unwrap_err();
        assert!(matches!(
            err,
            RouterError::Underflow {
                requested: 2,
                depth: 2,
            }
        ));
        // failed pop removed nothing
        assert_eq!(router.depth(), 2);

        let err = router.pop(5).unwrap_err();
        assert!(matches!(err, RouterError::Underflow { requested: 5, .. }));
    }

    #[test]
    fn test_pop_reports_departing_transition() {
        let mut router = router(&["home"]);
        let animated = Arc::new(
            RouteDefinition::new("modal", Arc::new(StaticComponent::new()))
                .with_transition(SceneTransition::FloatFromBottom),
        );
        router.push(&animated, SceneProps::new()).unwrap();

        let event = router.pop(1).unwrap();
        assert_eq!(
            event,
            StackEvent::Popped {
                count: 1,
                transition: SceneTransition::FloatFromBottom,
            }
        );
    }

    #[test]
    fn test_from_registry() {
        let mut registry = RouteRegistry::new();
        registry
            .register(RouteDefinition::new("home", Arc::new(StaticComponent::new())))
            .unwrap();

        let router = Router::from_registry(&registry, &["home"]).unwrap();
        assert_eq!(router.depth(), 1);

        let err = Router::from_registry(&registry, &["missing"]).unwrap_err();
        assert!(matches!(err, RouterError::Registry(_)));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut router = router(&["home"]);
        let snapshot = router.snapshot();

        router.push(&route("detail"), SceneProps::new()).unwrap();

        assert_eq!(snapshot.scenes.len(), 1);
        assert_eq!(snapshot.selected, "home");
        assert_eq!(router.depth(), 2);
    }

    // ========================================================================
    // Nested routers
    // ========================================================================

    #[test]
    fn test_leaf_has_no_child() {
        let router = router(&["home"]);
        let node = router.node_at(0).unwrap();
        assert!(node.child_router().is_none());
        assert!(!node.has_child());
    }

    #[test]
    fn test_child_router_created_lazily_with_prefixed_root() {
        let mut router = router(&["home"]);
        router
            .push(
                &wrapping_route("feed"),
                SceneProps::new().with_value("tab", json!("hot")),
            )
            .unwrap();

        let node = router.node_at(1).unwrap();
        assert!(!node.has_child());

        let child = node.child_router().unwrap();
        assert!(node.has_child());

        let child = child.read();
        assert_eq!(child.depth(), 1);
        assert_eq!(child.active_local().name(), "_feed");
        // the synthetic root carries the parent's invocation props
        assert_eq!(child.active_local().prop("tab"), Some(&json!("hot")));
    }

    #[test]
    fn test_child_router_is_stable_across_accesses() {
        let mut router = router(&["home"]);
        router.push(&wrapping_route("feed"), SceneProps::new()).unwrap();

        let node = router.node_at(1).unwrap();
        let first = Arc::as_ptr(node.child_router().unwrap());
        let second = Arc::as_ptr(node.child_router().unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_child_stack_mutates_independently() {
        let mut router = router(&["home"]);
        router.push(&wrapping_route("feed"), SceneProps::new()).unwrap();

        let child = Arc::clone(router.node_at(1).unwrap().child_router().unwrap());
        child.write().push(&route("thread"), SceneProps::new()).unwrap();

        assert_eq!(router.depth(), 2);
        assert_eq!(child.read().depth(), 2);
        assert_eq!(child.read().active_local().name(), "thread");

        // child root obeys the same underflow rule
        child.write().pop(1).unwrap();
        let err = child.write().pop(1).unwrap_err();
        assert!(matches!(err, RouterError::Underflow { .. }));
    }

    #[test]
    fn test_active_route_descends_to_innermost() {
        let mut router = router(&["home"]);
        router.push(&wrapping_route("feed"), SceneProps::new()).unwrap();

        assert_eq!(router.active_route().name(), "_feed");

        let child = Arc::clone(router.node_at(1).unwrap().child_router().unwrap());
        child.write().push(&route("thread"), SceneProps::new()).unwrap();

        assert_eq!(router.active_local().name(), "feed");
        assert_eq!(router.active_route().name(), "thread");
    }

    #[test]
    fn test_active_path_walks_nesting_chain() {
        let mut router = router(&["home"]);
        router.push(&wrapping_route("feed"), SceneProps::new()).unwrap();

        let child = Arc::clone(router.node_at(1).unwrap().child_router().unwrap());
        child.write().push(&route("thread"), SceneProps::new()).unwrap();

        let path = router.active_path();
        assert_eq!(path.len(), 2);

        let outer = &path.segments[0];
        assert_eq!(outer.scene.name(), "feed");
        assert_eq!(outer.index, 1);
        assert_eq!(outer.stack.len(), 2);
        assert_eq!(outer.router_id, *router.id());

        let inner = path.active().unwrap();
        assert_eq!(inner.scene.name(), "thread");
        assert_eq!(inner.index, 1);
        assert_eq!(inner.stack.len(), 2);
        assert_ne!(inner.router_id, *router.id());
    }

    #[test]
    fn test_dropping_parent_entry_drops_subtree() {
        let mut router = router(&["home"]);
        router.push(&wrapping_route("feed"), SceneProps::new()).unwrap();

        let child = Arc::downgrade(router.node_at(1).unwrap().child_router().unwrap());
        assert!(child.upgrade().is_some());

        router.pop(1).unwrap();
        assert!(child.upgrade().is_none());
    }

    #[test]
    fn test_replace_drops_previous_subtree() {
        let mut router = router(&["home"]);
        router.push(&wrapping_route("feed"), SceneProps::new()).unwrap();

        let child = Arc::downgrade(router.node_at(1).unwrap().child_router().unwrap());
        router.replace(&route("detail"), SceneProps::new()).unwrap();

        assert!(child.upgrade().is_none());
    }
}
