//! Chrome widget model and render capabilities
//!
//! Chrome is everything the navigation bar shows for the active scene:
//! title, back affordance, and the optional left/right buttons. The routing
//! core describes these as serializable [`ChromeNode`] trees and leaves the
//! actual drawing to the render boundary. Custom per-slot renderers are
//! plain closures ([`RenderFn`]) receiving a [`ChromeContext`] snapshot of
//! the stack they are resolving against.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::scene::SceneDescriptor;

/// Icon name the built-in back renderer uses for the chevron.
pub const BACK_ICON: &str = "back_chevron";

/// One of the four chrome positions on the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromeSlot {
    /// Centered title.
    Title,
    /// Leading back affordance.
    Back,
    /// Leading custom button, displaced by the back affordance.
    Left,
    /// Trailing button.
    Right,
}

/// Press semantics attached to a chrome button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ChromeAction {
    /// Pop one entry through the action bus. This is the automatic go-back
    /// wiring every default back button carries.
    Back,
    /// Invoke the active scene's callback bound to `slot`.
    Invoke {
        /// Slot whose bound callback receives the press.
        slot: ChromeSlot,
    },
}

/// Widget description interpreted by the render boundary.
///
/// Deliberately tiny: labels, named icons, and pressable groups cover every
/// affordance the bar renders, and the whole tree serializes for snapshot
/// tests and state dumps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChromeNode {
    /// A text label.
    Text {
        /// Label contents.
        text: String,
    },
    /// A named icon from the embedder's asset set.
    Icon {
        /// Asset name.
        name: String,
    },
    /// A pressable group of child nodes.
    Button {
        /// What pressing the button dispatches.
        action: ChromeAction,
        /// Visual children, in order.
        children: Vec<ChromeNode>,
    },
}

impl ChromeNode {
    /// A text label node.
    pub fn text(text: impl Into<String>) -> Self {
        ChromeNode::Text { text: text.into() }
    }

    /// A named icon node.
    pub fn icon(name: impl Into<String>) -> Self {
        ChromeNode::Icon { name: name.into() }
    }

    /// A pressable button wrapping `children`.
    pub fn button(action: ChromeAction, children: Vec<ChromeNode>) -> Self {
        ChromeNode::Button { action, children }
    }

    /// Whether this node or any descendant is a text label.
    pub fn has_text(&self) -> bool {
        match self {
            ChromeNode::Text { .. } => true,
            ChromeNode::Icon { .. } => false,
            ChromeNode::Button { children, .. } => children.iter().any(ChromeNode::has_text),
        }
    }

    /// The press action carried by this node, if it is a button.
    pub fn action(&self) -> Option<ChromeAction> {
        match self {
            ChromeNode::Button { action, .. } => Some(*action),
            _ => None,
        }
    }
}

/// Resolution context handed to chrome renderers.
///
/// A read-only view of what the bar knows at resolve time: the scene being
/// resolved, its index in the owning stack, and the stack itself, root
/// first.
pub struct ChromeContext<'a> {
    /// Scene whose chrome is being resolved.
    pub scene: &'a SceneDescriptor,
    /// Index of `scene` within `stack`.
    pub index: usize,
    /// Owning stack, root first.
    pub stack: &'a [SceneDescriptor],
}

impl<'a> ChromeContext<'a> {
    /// The entry below `scene` on the stack, if any.
    ///
    /// Stays within bounds for any index, including a root scene and an
    /// index pointing past the snapshot.
    pub fn previous(&self) -> Option<&'a SceneDescriptor> {
        self.index.checked_sub(1).and_then(|below| self.stack.get(below))
    }
}

/// Custom renderer for one chrome slot; returning `None` renders nothing.
pub type RenderFn = Arc<dyn Fn(&ChromeContext<'_>) -> Option<ChromeNode> + Send + Sync>;

/// Wrap a closure as a [`RenderFn`].
pub fn render_fn<F>(render: F) -> RenderFn
where
    F: Fn(&ChromeContext<'_>) -> Option<ChromeNode> + Send + Sync + 'static,
{
    Arc::new(render)
}

/// Per-slot render overrides.
///
/// Carried at every precedence level (invocation, route, component, stack);
/// a `None` slot defers to the next level down and ultimately to the
/// built-in renderer.
#[derive(Clone, Default)]
pub struct ChromeOverrides {
    /// Title slot override.
    pub title: Option<RenderFn>,
    /// Back-button slot override.
    pub back: Option<RenderFn>,
    /// Left-button slot override.
    pub left: Option<RenderFn>,
    /// Right-button slot override.
    pub right: Option<RenderFn>,
}

impl ChromeOverrides {
    /// Overrides with every slot deferring.
    pub fn new() -> Self {
        Self::default()
    }

    /// The override installed for `slot`, if any.
    pub fn get(&self, slot: ChromeSlot) -> Option<&RenderFn> {
        match slot {
            ChromeSlot::Title => self.title.as_ref(),
            ChromeSlot::Back => self.back.as_ref(),
            ChromeSlot::Left => self.left.as_ref(),
            ChromeSlot::Right => self.right.as_ref(),
        }
    }

    /// Whether no slot is overridden.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.back.is_none() && self.left.is_none() && self.right.is_none()
    }
}

impl fmt::Debug for ChromeOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChromeOverrides")
            .field("title", &self.title.is_some())
            .field("back", &self.back.is_some())
            .field("left", &self.left.is_some())
            .field("right", &self.right.is_some())
            .finish()
    }
}
