//! Chrome bar resolution
//!
//! Resolves the four chrome slots for the innermost active scene of an
//! [`ActivePath`], or decides the bar is hidden outright. Resolution is a
//! pure read over the path; it runs once per committed stack mutation and
//! its output must never be cached across mutations.

use serde::{Deserialize, Serialize};

use router_core::chrome::{ChromeContext, ChromeNode, ChromeSlot};
use router_core::route::NavBarVisibility;
use router_state::machine::{ActivePath, PathSegment};

/// Fully resolved chrome for the visible bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChromeBar {
    /// Title widget.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<ChromeNode>,
    /// Back affordance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<ChromeNode>,
    /// Left button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<ChromeNode>,
    /// Right button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<ChromeNode>,
}

impl ChromeBar {
    /// The single leading affordance the bar displays. A back affordance
    /// displaces any custom left button.
    pub fn leading(&self) -> Option<&ChromeNode> {
        self.back.as_ref().or(self.left.as_ref())
    }

    /// Whether the bar has nothing to show.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.back.is_none() && self.left.is_none() && self.right.is_none()
    }
}

/// Resolve the chrome bar for the path's innermost active scene.
///
/// Returns `None` when the bar is hidden. Visibility is decided first: the
/// innermost scene along the path with an explicit declaration wins;
/// without one, any stack-level `hide_nav_bar` along the path hides the
/// bar.
pub fn resolve_chrome(path: &ActivePath) -> Option<ChromeBar> {
    let active = path.active()?;
    if bar_hidden(path) {
        tracing::debug!(scene = active.scene.name(), "nav bar hidden");
        return None;
    }
    Some(ChromeBar {
        title: resolve_slot(active, ChromeSlot::Title),
        back: resolve_slot(active, ChromeSlot::Back),
        left: resolve_slot(active, ChromeSlot::Left),
        right: resolve_slot(active, ChromeSlot::Right),
    })
}

fn bar_hidden(path: &ActivePath) -> bool {
    for segment in path.segments.iter().rev() {
        match segment.scene.hide_nav_bar() {
            NavBarVisibility::Hidden => return true,
            NavBarVisibility::Visible => return false,
            NavBarVisibility::Inherit => {}
        }
    }
    path.segments
        .iter()
        .any(|segment| segment.config.hide_nav_bar)
}

/// Resolve one slot for the active segment.
///
/// The descriptor settled invocation, route, and component precedence at
/// adapt time; here the stack-level renderer slots in before the built-in
/// default.
fn resolve_slot(segment: &PathSegment, slot: ChromeSlot) -> Option<ChromeNode> {
    let ctx = ChromeContext {
        scene: &segment.scene,
        index: segment.index,
        stack: &segment.stack,
    };
    if let Some(render) = segment.scene.custom_slot(slot) {
        return render(&ctx);
    }
    if let Some(render) = segment.config.chrome.get(slot) {
        return render(&ctx);
    }
    segment.scene.default_render(slot, &ctx)
}
