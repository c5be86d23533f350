//! Router Integration Tests
//!
//! End-to-end tests wiring the registry, action bus, state machine, and
//! chrome layer together the way an embedding application would.

use std::sync::{Arc, Mutex};

use router_chrome::{ChromeBar, NavigationHost, RenderBoundary};
use router_core::chrome::ChromeAction;
use router_core::component::StaticComponent;
use router_core::registry::RouteRegistry;
use router_core::route::{RouteDefinition, SceneTransition};
use router_core::scene::{SceneDescriptor, SceneProps};
use router_state::bus::{ActionBus, NavigationHooks, Navigator};
use router_state::machine::{Router, RouterError};
use router_state::persist::PersistedStack;
use serde_json::json;

/// Boundary that records every call for later inspection.
#[derive(Default)]
struct RecordingBoundary {
    events: Mutex<Vec<String>>,
    chrome: Mutex<Option<ChromeBar>>,
}

impl RecordingBoundary {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn chrome(&self) -> Option<ChromeBar> {
        self.chrome.lock().unwrap().clone()
    }
}

impl RenderBoundary for RecordingBoundary {
    fn mount_scene(&self, scene: &SceneDescriptor, index: usize, _stack: &[SceneDescriptor]) {
        self.events
            .lock()
            .unwrap()
            .push(format!("mount:{}:{index}", scene.name()));
    }

    fn unmount_scene(&self, _key: &str) {
        self.events.lock().unwrap().push("unmount".to_string());
    }

    fn animate_transition(&self, transition: SceneTransition) {
        self.events
            .lock()
            .unwrap()
            .push(format!("animate:{transition:?}"));
    }

    fn chrome_changed(&self, chrome: Option<ChromeBar>) {
        self.events.lock().unwrap().push("chrome".to_string());
        *self.chrome.lock().unwrap() = chrome;
    }
}

fn registry() -> Arc<RouteRegistry> {
    let mut registry = RouteRegistry::new();
    registry
        .register(
            RouteDefinition::new("home", Arc::new(StaticComponent::new())).with_title("Home"),
        )
        .unwrap();
    registry
        .register(
            RouteDefinition::new("detail", Arc::new(StaticComponent::new()))
                .with_title("Detail")
                .with_transition(SceneTransition::PushFromRight),
        )
        .unwrap();
    registry
        .register(
            RouteDefinition::new("settings", Arc::new(StaticComponent::new()))
                .with_title("Preferences"),
        )
        .unwrap();
    registry
        .register(
            RouteDefinition::new("feed", Arc::new(StaticComponent::new()))
                .with_title("Feed")
                .with_wrap_router(true),
        )
        .unwrap();
    Arc::new(registry)
}

fn wired_host(initial: &[&str]) -> (NavigationHost, Arc<RecordingBoundary>) {
    let registry = registry();
    let bus = Arc::new(ActionBus::new());
    let router = Router::from_registry(&registry, initial)
        .unwrap()
        .into_shared();
    let navigator = Navigator::new(registry, bus);
    let boundary = Arc::new(RecordingBoundary::default());
    let dyn_boundary: Arc<dyn RenderBoundary> = boundary.clone();
    let host = NavigationHost::new(router, navigator, dyn_boundary);
    (host, boundary)
}

/// Test the full push/pop scenario through host, bus, machine, and chrome
#[test]
fn test_end_to_end_navigation_scenario() {
    let (host, boundary) = wired_host(&["home"]);

    // Phase 1: mount registers the bus target and renders the root
    host.mount();
    assert_eq!(boundary.events(), ["mount:home:0", "chrome"]);
    let bar = boundary.chrome().unwrap();
    assert_eq!(bar.title.as_ref().map(|t| t.has_text()), Some(true));
    assert!(bar.back.is_none());

    // Phase 2: push mounts the new scene, animates, and re-resolves chrome
    assert!(host
        .push("detail", SceneProps::new().with_value("id", json!(42)))
        .unwrap());
    {
        let router = host.router().read();
        assert_eq!(router.depth(), 2);
        assert_eq!(router.active_local().name(), "detail");
        assert_eq!(router.active_local().prop("id"), Some(&json!(42)));
    }
    assert_eq!(
        boundary.events()[2..],
        ["mount:detail:1", "animate:PushFromRight", "chrome"]
    );

    // back affordance carries the previous title ("Home" fits the limit)
    let bar = boundary.chrome().unwrap();
    let back = bar.back.as_ref().unwrap();
    assert!(back.has_text());
    assert_eq!(bar.leading(), bar.back.as_ref());

    // Phase 3: the back press pops through the bus and the root remains
    assert!(host.press(&ChromeAction::Back).unwrap());
    {
        let router = host.router().read();
        assert_eq!(router.depth(), 1);
        assert_eq!(router.active_local().name(), "home");
    }
    assert_eq!(
        boundary.events()[5..],
        ["unmount", "animate:PushFromRight", "chrome"]
    );
    assert!(boundary.chrome().unwrap().back.is_none());

    // Phase 4: the root can never be popped
    let err = host.pop(1).unwrap_err();
    assert!(matches!(err, RouterError::Underflow { .. }));
}

/// Test back-label suppression when the previous title exceeds ten chars
#[test]
fn test_long_previous_title_suppresses_back_label() {
    let (host, boundary) = wired_host(&["settings"]);
    host.mount();

    host.push("detail", SceneProps::new()).unwrap();

    // "Preferences" is eleven characters; the chevron stands alone
    let bar = boundary.chrome().unwrap();
    let back = bar.back.as_ref().unwrap();
    assert!(!back.has_text());
}

/// Test that vetoes and missing targets drop requests without error
#[test]
fn test_vetoed_and_untargeted_requests_are_dropped() {
    let (host, boundary) = wired_host(&["home"]);

    // before mount there is no bus target
    assert!(!host.push("detail", SceneProps::new()).unwrap());
    assert!(boundary.events().is_empty());

    host.mount();
    host.navigator()
        .bus()
        .set_hooks(NavigationHooks::new().on_push(|route, _| route.name() != "detail"));

    assert!(!host.push("detail", SceneProps::new()).unwrap());
    assert_eq!(host.router().read().depth(), 1);

    // unknown names are configuration errors, not vetoes
    let err = host.push("missing", SceneProps::new()).unwrap_err();
    assert!(matches!(err, RouterError::Registry(_)));
}

/// Test a nested router taking and releasing bus focus
#[test]
fn test_nested_router_takes_bus_focus() {
    let (host, _boundary) = wired_host(&["home"]);
    host.mount();
    host.push("feed", SceneProps::new()).unwrap();

    let child = {
        let router = host.router().read();
        Arc::clone(router.node_at(1).unwrap().child_router().unwrap())
    };
    assert_eq!(child.read().active_local().name(), "_feed");

    // while the child is registered, navigation lands on its stack
    let bus = host.navigator().bus();
    bus.register_target(&child);
    assert!(host.navigator().push("detail", SceneProps::new()).unwrap());
    assert_eq!(child.read().depth(), 2);
    assert_eq!(host.router().read().depth(), 2);
    assert_eq!(host.router().read().active_route().name(), "detail");

    // the child root is as un-poppable as any other root
    assert!(host.navigator().pop(1).unwrap());
    let err = host.navigator().pop(1).unwrap_err();
    assert!(matches!(err, RouterError::Underflow { .. }));

    // releasing focus leaves the bus without a target until re-registration
    let child_id = child.read().id().clone();
    assert!(bus.deregister_target(&child_id));
    assert!(!host.navigator().push("detail", SceneProps::new()).unwrap());

    bus.register_target(host.router());
    assert!(host.navigator().push("detail", SceneProps::new()).unwrap());
    assert_eq!(host.router().read().depth(), 3);
}

/// Test persistence across a simulated restart
#[test]
fn test_state_survives_restart() {
    let registry = registry();
    let mut router = Router::from_registry(&registry, &["home"]).unwrap();
    router
        .push(
            &registry.resolve("detail").unwrap(),
            SceneProps::new().with_value("id", json!(7)),
        )
        .unwrap();
    router
        .jump(&registry.resolve("home").unwrap(), SceneProps::new())
        .unwrap();

    let saved = serde_json::to_string(&router.persist()).unwrap();

    // simulated restart: nothing survives but the serialized form
    drop(router);
    let loaded: PersistedStack = serde_json::from_str(&saved).unwrap();
    let restored = Router::restore(&registry, &loaded).unwrap();

    assert_eq!(restored.depth(), 2);
    assert_eq!(restored.active_local().name(), "detail");
    assert_eq!(restored.active_local().prop("id"), Some(&json!(7)));
    assert_eq!(restored.selected(), "home");
}

/// Test jump focus semantics through the full wiring
#[test]
fn test_jump_moves_focus_without_duplicates() {
    let (host, _boundary) = wired_host(&["home"]);
    host.mount();

    // miss behaves like a push
    assert!(host.jump("detail", SceneProps::new()).unwrap());
    assert_eq!(host.router().read().depth(), 2);
    assert_eq!(host.router().read().selected(), "detail");

    // hit only moves the marker
    assert!(host.jump("home", SceneProps::new()).unwrap());
    assert_eq!(host.router().read().depth(), 2);
    assert_eq!(host.router().read().selected(), "home");
}
