//! Action bus and navigator facade
//!
//! The bus decouples navigation callers from whichever router currently
//! owns focus. It holds no stack of its own: one weak target registration
//! and the veto hooks. Exactly one router is targeted at a time; nested
//! routers take over by registering themselves and hand back by
//! deregistering. Requests issued while no live target is registered are
//! dropped, not queued.
//!
//! [`Navigator`] is the name-based surface application code actually calls:
//! it resolves names through the registry and forwards through the bus.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use router_core::registry::RouteRegistry;
use router_core::route::RouteDefinition;
use router_core::scene::SceneProps;

use crate::machine::{Result, Router, RouterId, SharedRouter, StackEvent, WeakRouter};

/// Veto hook for route-carrying actions. Returning `false` drops the
/// action before it reaches the target router.
pub type RouteHook = Box<dyn Fn(&RouteDefinition, &SceneProps) -> bool + Send + Sync>;

/// Veto hook for pop requests, receiving the requested count.
pub type PopHook = Box<dyn Fn(usize) -> bool + Send + Sync>;

/// Interception hooks installed by the embedding application.
///
/// Each hook runs before its action is dispatched; this is the only veto
/// point in the pipeline. Unset hooks allow everything.
#[derive(Default)]
pub struct NavigationHooks {
    on_push: Option<RouteHook>,
    on_replace: Option<RouteHook>,
    on_reset: Option<RouteHook>,
    on_jump: Option<RouteHook>,
    on_pop: Option<PopHook>,
}

impl NavigationHooks {
    /// Hooks that allow everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intercept push requests.
    pub fn on_push<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RouteDefinition, &SceneProps) -> bool + Send + Sync + 'static,
    {
        self.on_push = Some(Box::new(hook));
        self
    }

    /// Intercept replace requests.
    pub fn on_replace<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RouteDefinition, &SceneProps) -> bool + Send + Sync + 'static,
    {
        self.on_replace = Some(Box::new(hook));
        self
    }

    /// Intercept reset requests.
    pub fn on_reset<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RouteDefinition, &SceneProps) -> bool + Send + Sync + 'static,
    {
        self.on_reset = Some(Box::new(hook));
        self
    }

    /// Intercept jump requests.
    pub fn on_jump<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RouteDefinition, &SceneProps) -> bool + Send + Sync + 'static,
    {
        self.on_jump = Some(Box::new(hook));
        self
    }

    /// Intercept pop requests.
    pub fn on_pop<F>(mut self, hook: F) -> Self
    where
        F: Fn(usize) -> bool + Send + Sync + 'static,
    {
        self.on_pop = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for NavigationHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationHooks")
            .field("on_push", &self.on_push.is_some())
            .field("on_replace", &self.on_replace.is_some())
            .field("on_reset", &self.on_reset.is_some())
            .field("on_jump", &self.on_jump.is_some())
            .field("on_pop", &self.on_pop.is_some())
            .finish()
    }
}

struct BusTarget {
    id: RouterId,
    handle: WeakRouter,
}

/// Process-wide dispatch relay between navigation callers and the focused
/// router.
///
/// All request methods share one outcome contract: `Ok(true)` means the
/// mutation committed, `Ok(false)` means it was dropped (vetoed by a hook,
/// or no live target), and `Err` means the target rejected it as a
/// configuration or state error.
#[derive(Default)]
pub struct ActionBus {
    target: RwLock<Option<BusTarget>>,
    hooks: RwLock<NavigationHooks>,
}

impl ActionBus {
    /// A bus with no target and no hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the veto hooks, replacing any previous set.
    pub fn set_hooks(&self, hooks: NavigationHooks) {
        *self.hooks.write() = hooks;
    }

    /// Make `router` the dispatch target, replacing any previous one.
    ///
    /// The previous target is not notified; a nested router temporarily
    /// taking focus relies on exactly that.
    pub fn register_target(&self, router: &SharedRouter) {
        let id = router.read().id().clone();
        tracing::debug!(router = %id, "bus target registered");
        *self.target.write() = Some(BusTarget {
            id,
            handle: Arc::downgrade(router),
        });
    }

    /// Drop the registration if `id` is still the current target.
    ///
    /// Returns `false` when another router has replaced the registration in
    /// the meantime; the newer registration stays untouched.
    pub fn deregister_target(&self, id: &RouterId) -> bool {
        let mut target = self.target.write();
        match target.as_ref() {
            Some(current) if current.id == *id => {
                tracing::debug!(router = %id, "bus target deregistered");
                *target = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a live target is currently registered.
    pub fn has_target(&self) -> bool {
        self.target
            .read()
            .as_ref()
            .is_some_and(|target| target.handle.strong_count() > 0)
    }

    /// Request a push onto the focused stack.
    pub fn request_push(&self, route: &Arc<RouteDefinition>, props: SceneProps) -> Result<bool> {
        if self.route_vetoed(|hooks| hooks.on_push.as_ref(), route, &props) {
            tracing::debug!(route = route.name(), "push vetoed");
            return Ok(false);
        }
        self.dispatch(|router| router.push(route, props))
    }

    /// Request an in-place replace of the focused stack's tail.
    pub fn request_replace(&self, route: &Arc<RouteDefinition>, props: SceneProps) -> Result<bool> {
        if self.route_vetoed(|hooks| hooks.on_replace.as_ref(), route, &props) {
            tracing::debug!(route = route.name(), "replace vetoed");
            return Ok(false);
        }
        self.dispatch(|router| router.replace(route, props))
    }

    /// Request a reset of the focused stack.
    pub fn request_reset(&self, route: &Arc<RouteDefinition>, props: SceneProps) -> Result<bool> {
        if self.route_vetoed(|hooks| hooks.on_reset.as_ref(), route, &props) {
            tracing::debug!(route = route.name(), "reset vetoed");
            return Ok(false);
        }
        self.dispatch(|router| router.reset(route, props))
    }

    /// Request a focus jump on the focused stack.
    pub fn request_jump(&self, route: &Arc<RouteDefinition>, props: SceneProps) -> Result<bool> {
        if self.route_vetoed(|hooks| hooks.on_jump.as_ref(), route, &props) {
            tracing::debug!(route = route.name(), "jump vetoed");
            return Ok(false);
        }
        self.dispatch(|router| router.jump(route, props))
    }

    /// Request removal of `count` scenes from the focused stack's tail.
    pub fn request_pop(&self, count: usize) -> Result<bool> {
        let vetoed = {
            let hooks = self.hooks.read();
            hooks.on_pop.as_ref().is_some_and(|hook| !hook(count))
        };
        if vetoed {
            tracing::debug!(count, "pop vetoed");
            return Ok(false);
        }
        self.dispatch(|router| router.pop(count))
    }

    fn route_vetoed(
        &self,
        select: impl FnOnce(&NavigationHooks) -> Option<&RouteHook>,
        route: &RouteDefinition,
        props: &SceneProps,
    ) -> bool {
        let hooks = self.hooks.read();
        select(&hooks).is_some_and(|hook| !hook(route, props))
    }

    /// Upgrade the target and apply `op` under its write lock.
    ///
    /// The bus locks are released before the router lock is taken, so `op`
    /// never runs with bus state held.
    fn dispatch(&self, op: impl FnOnce(&mut Router) -> Result<StackEvent>) -> Result<bool> {
        let Some(target) = self.live_target() else {
            tracing::debug!("navigation request dropped: no live target");
            return Ok(false);
        };
        let mut router = target.write();
        op(&mut router)?;
        Ok(true)
    }

    fn live_target(&self) -> Option<SharedRouter> {
        self.target
            .read()
            .as_ref()
            .and_then(|target| target.handle.upgrade())
    }
}

impl fmt::Debug for ActionBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = self.target.read().as_ref().map(|target| target.id.clone());
        f.debug_struct("ActionBus")
            .field("target", &target)
            .field("hooks", &*self.hooks.read())
            .finish()
    }
}

/// Name-based navigation surface handed to application code.
///
/// Resolves route names through the shared registry and forwards through
/// the bus. Unknown names are configuration errors; vetoes and missing
/// targets surface as `Ok(false)` like everywhere else.
#[derive(Clone, Debug)]
pub struct Navigator {
    registry: Arc<RouteRegistry>,
    bus: Arc<ActionBus>,
}

impl Navigator {
    /// Create a navigator over a registry and a bus.
    pub fn new(registry: Arc<RouteRegistry>, bus: Arc<ActionBus>) -> Self {
        Self { registry, bus }
    }

    /// The shared route registry.
    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }

    /// The shared action bus.
    pub fn bus(&self) -> &Arc<ActionBus> {
        &self.bus
    }

    /// Push the named route onto the focused stack.
    pub fn push(&self, name: &str, props: impl Into<SceneProps>) -> Result<bool> {
        let route = self.registry.resolve(name)?;
        self.bus.request_push(&route, props.into())
    }

    /// Replace the focused stack's tail with the named route.
    pub fn replace(&self, name: &str, props: impl Into<SceneProps>) -> Result<bool> {
        let route = self.registry.resolve(name)?;
        self.bus.request_replace(&route, props.into())
    }

    /// Reset the focused stack around the named route.
    pub fn reset(&self, name: &str, props: impl Into<SceneProps>) -> Result<bool> {
        let route = self.registry.resolve(name)?;
        self.bus.request_reset(&route, props.into())
    }

    /// Move focus to the named route, pushing it when absent.
    pub fn jump(&self, name: &str, props: impl Into<SceneProps>) -> Result<bool> {
        let route = self.registry.resolve(name)?;
        self.bus.request_jump(&route, props.into())
    }

    /// Remove `count` scenes from the focused stack's tail.
    pub fn pop(&self, count: usize) -> Result<bool> {
        self.bus.request_pop(count)
    }
}
