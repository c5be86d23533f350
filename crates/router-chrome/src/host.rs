//! Navigation host wiring the router, bus, and render boundary together
//!
//! The host owns the embedding side of one top-level router: it registers
//! the router on the action bus, funnels navigation calls through the
//! navigator, and reconciles the [`RenderBoundary`] exactly once per
//! committed mutation. Scene containers are diffed by descriptor key, the
//! transition token of the entering or departing scene is forwarded, and
//! the chrome bar is re-resolved from the freshly walked active path.
//!
//! The host reconciles containers for its own router's stack; scenes of a
//! nested child router render inside their wrapping scene's container.

#[cfg(test)]
use mockall::automock;
use parking_lot::RwLock;
use std::sync::Arc;

use router_core::chrome::ChromeAction;
use router_core::route::SceneTransition;
use router_core::scene::{SceneDescriptor, SceneProps};
use router_state::bus::Navigator;
use router_state::machine::{Result, SharedRouter};

use crate::resolver::{resolve_chrome, ChromeBar};

/// Rendering collaborator consumed by the host.
///
/// Everything visual lives behind this trait: scene containers, stack
/// transitions, and the chrome bar. Implementations identify containers by
/// the descriptor key handed to [`mount_scene`](Self::mount_scene).
#[cfg_attr(test, automock)]
pub trait RenderBoundary: Send + Sync {
    /// Mount the visual container for one scene at `index` of `stack`.
    fn mount_scene(&self, scene: &SceneDescriptor, index: usize, stack: &[SceneDescriptor]);

    /// Tear down the container identified by `key`.
    fn unmount_scene(&self, key: &str);

    /// Animate between the previous and current stack states.
    fn animate_transition(&self, transition: SceneTransition);

    /// Redraw the chrome bar, or hide it when `None`.
    fn chrome_changed(&self, chrome: Option<ChromeBar>);
}

enum HostOp {
    Push,
    Replace,
    Pop { departing: SceneTransition },
    Structural,
}

/// Embedding-side owner of one top-level router.
///
/// All navigation surfaces converge here: name-based calls, chrome button
/// presses, and mount/unmount lifecycle. Mutations that commit trigger one
/// reconcile pass against the render boundary; dropped and vetoed requests
/// touch nothing.
pub struct NavigationHost {
    router: SharedRouter,
    navigator: Navigator,
    boundary: Arc<dyn RenderBoundary>,
    mounted: RwLock<Vec<String>>,
}

impl NavigationHost {
    /// Wire a host around a router, a navigator, and a render boundary.
    ///
    /// The router is not registered on the bus until [`mount`](Self::mount).
    pub fn new(
        router: SharedRouter,
        navigator: Navigator,
        boundary: Arc<dyn RenderBoundary>,
    ) -> Self {
        Self {
            router,
            navigator,
            boundary,
            mounted: RwLock::new(Vec::new()),
        }
    }

    /// The shared router handle.
    pub fn router(&self) -> &SharedRouter {
        &self.router
    }

    /// The name-based navigation surface.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Register the router as the bus target and run the initial mount and
    /// chrome pass.
    pub fn mount(&self) {
        self.navigator.bus().register_target(&self.router);
        self.sync(HostOp::Structural);
    }

    /// Deregister from the bus and tear down every mounted container.
    ///
    /// Required on every teardown path: the bus never cleans up after a
    /// forgotten host, and a stale registration would shadow the next one.
    pub fn unmount(&self) {
        let id = self.router.read().id().clone();
        self.navigator.bus().deregister_target(&id);
        let mounted = std::mem::take(&mut *self.mounted.write());
        for key in mounted.iter().rev() {
            self.boundary.unmount_scene(key);
        }
    }

    /// Push the named route onto the focused stack.
    pub fn push(&self, name: &str, props: impl Into<SceneProps>) -> Result<bool> {
        let applied = self.navigator.push(name, props)?;
        if applied {
            self.sync(HostOp::Push);
        }
        Ok(applied)
    }

    /// Replace the focused stack's tail with the named route.
    pub fn replace(&self, name: &str, props: impl Into<SceneProps>) -> Result<bool> {
        let applied = self.navigator.replace(name, props)?;
        if applied {
            self.sync(HostOp::Replace);
        }
        Ok(applied)
    }

    /// Reset the focused stack around the named route. Structural; never
    /// animated.
    pub fn reset(&self, name: &str, props: impl Into<SceneProps>) -> Result<bool> {
        let applied = self.navigator.reset(name, props)?;
        if applied {
            self.sync(HostOp::Structural);
        }
        Ok(applied)
    }

    /// Move focus to the named route, pushing it when absent. Focus moves
    /// reveal existing state, so they are never animated either.
    pub fn jump(&self, name: &str, props: impl Into<SceneProps>) -> Result<bool> {
        let applied = self.navigator.jump(name, props)?;
        if applied {
            self.sync(HostOp::Structural);
        }
        Ok(applied)
    }

    /// Remove `count` scenes from the focused stack's tail.
    pub fn pop(&self, count: usize) -> Result<bool> {
        // the departing scene's token is gone from the stack after the pop
        let departing = self.router.read().active_route().transition();
        let applied = self.navigator.pop(count)?;
        if applied {
            self.sync(HostOp::Pop { departing });
        }
        Ok(applied)
    }

    /// Route a chrome press back into navigation or scene callbacks.
    ///
    /// [`ChromeAction::Back`] pops one scene through the bus;
    /// [`ChromeAction::Invoke`] calls the active scene's callback bound to
    /// the slot, handing it the scene's merged props.
    pub fn press(&self, action: &ChromeAction) -> Result<bool> {
        match action {
            ChromeAction::Back => self.pop(1),
            ChromeAction::Invoke { slot } => {
                let active = self.router.read().active_route();
                match active.callback(*slot) {
                    Some(callback) => {
                        callback(&active.merged_props());
                        Ok(true)
                    }
                    None => {
                        tracing::warn!(
                            scene = active.name(),
                            slot = ?slot,
                            "chrome press with no bound callback"
                        );
                        Ok(false)
                    }
                }
            }
        }
    }

    /// Reconcile the boundary with the router's current state.
    ///
    /// Runs with no lock held across boundary calls, so implementations are
    /// free to call back into navigation.
    fn sync(&self, op: HostOp) {
        let (snapshot, path) = {
            let router = self.router.read();
            (router.snapshot(), router.active_path())
        };

        let keys: Vec<String> = snapshot
            .scenes
            .iter()
            .map(|scene| scene.key().to_string())
            .collect();
        let previous = std::mem::replace(&mut *self.mounted.write(), keys.clone());

        for key in previous.iter().rev() {
            if !keys.contains(key) {
                self.boundary.unmount_scene(key);
            }
        }
        for (index, scene) in snapshot.scenes.iter().enumerate() {
            if !previous.iter().any(|key| key == scene.key()) {
                self.boundary.mount_scene(scene, index, &snapshot.scenes);
            }
        }

        match op {
            HostOp::Push | HostOp::Replace => {
                let transition = path
                    .active()
                    .map(|segment| segment.scene.transition())
                    .unwrap_or_default();
                self.boundary.animate_transition(transition);
            }
            HostOp::Pop { departing } => self.boundary.animate_transition(departing),
            HostOp::Structural => {}
        }

        self.boundary.chrome_changed(resolve_chrome(&path));
    }
}
