use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::anchor::Anchor;
use crate::event::{Event, EventKind};

mod builder;
mod dispatch;
mod handler;

pub use builder::*;
pub(crate) use dispatch::Dispatcher;
pub use handler::*;

fn next_area_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AreaId(pub u64);

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) struct AreaNode {
    id: AreaId,
    left: Anchor,
    top: Anchor,
    right: Anchor,
    bottom: Anchor,
    parent: Option<Weak<AreaNode>>,
    children: RefCell<Vec<Area>>,
    render_handler: Option<RenderHandler>,
    handlers: FxHashMap<EventKind, EventHandler>,
    dispatcher: Rc<Dispatcher>,
    removed: Cell<bool>,
}

/// Handle to a rectangle of the area tree.
///
/// The tree owns its children; parents are only referenced weakly, so keeping
/// the root alive keeps the whole tree alive. Handles are cheap to clone.
#[derive(Clone)]
pub struct Area {
    node: Rc<AreaNode>,
}

impl Area {
    pub fn id(&self) -> AreaId {
        self.node.id
    }

    pub fn left(&self) -> &Anchor {
        &self.node.left
    }

    pub fn top(&self) -> &Anchor {
        &self.node.top
    }

    pub fn right(&self) -> &Anchor {
        &self.node.right
    }

    pub fn bottom(&self) -> &Anchor {
        &self.node.bottom
    }

    pub fn parent(&self) -> Option<Area> {
        self.node
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|node| Area { node })
    }

    /// Snapshot of the children in insertion (paint) order.
    pub fn children(&self) -> Vec<Area> {
        self.node.children.borrow().clone()
    }

    /// The topmost ancestor, or the area itself if it has no parent.
    pub fn root(&self) -> Area {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Whether `position` lies within `[left, right) x [top, bottom)`.
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= self.left().value()
            && position.x < self.right().value()
            && position.y >= self.top().value()
            && position.y < self.bottom().value()
    }

    /// Whether `self` is `ancestor` or lies in its subtree.
    pub fn is_within(&self, ancestor: &Area) -> bool {
        let mut current = Some(self.clone());
        while let Some(area) = current {
            if area.ptr_eq(ancestor) {
                return true;
            }
            current = area.parent();
        }
        false
    }

    /// Draws this area, then every child in insertion order, so later
    /// siblings paint over earlier ones. Nothing is clipped.
    pub fn render(&self) {
        if let Some(handler) = &self.node.render_handler {
            handler.call(self);
        }
        for child in self.children() {
            child.render();
        }
    }

    /// Makes this area the single focus holder of its tree. While focused it
    /// receives every positional event regardless of the pointer position.
    pub fn request_focus(&self) {
        if self.is_removed() {
            warn!(area = %self.id(), "focus requested by removed area");
            return;
        }
        self.node.dispatcher.set_focus(self);
    }

    /// Clears the focus if, and only if, this area holds it.
    pub fn release_focus(&self) {
        self.node.dispatcher.release_focus(self);
    }

    pub fn has_focus(&self) -> bool {
        self.node.dispatcher.is_focused(self)
    }

    /// Detaches this area and its subtree from the parent. Focus held within
    /// the subtree is cleared. A removed area is not reusable.
    pub fn remove(&self) {
        if self.is_removed() {
            return;
        }
        self.node.dispatcher.forget_within(self);
        if let Some(parent) = self.parent() {
            parent
                .node
                .children
                .borrow_mut()
                .retain(|child| !child.ptr_eq(self));
        }
        self.mark_removed();
        debug!(area = %self.id(), "area removed");
    }

    pub fn is_removed(&self) -> bool {
        self.node.removed.get()
    }

    pub fn ptr_eq(&self, other: &Area) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    pub fn has_handler(&self, kind: EventKind) -> bool {
        self.node.handlers.contains_key(&kind)
    }

    fn mark_removed(&self) {
        self.node.removed.set(true);
        for child in self.children() {
            child.mark_removed();
        }
    }

    /// Offers the event to this area's own handler only.
    fn handle_event(&self, event: &Event) -> bool {
        let handler = self.node.handlers.get(&event.kind()).cloned();
        match handler {
            Some(handler) => handler.call(self, event),
            None => false,
        }
    }

    pub(crate) fn downgrade(&self) -> WeakArea {
        WeakArea(Rc::downgrade(&self.node))
    }
}

impl PartialEq for Area {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Area")
            .field("id", &self.node.id)
            .field("children", &self.node.children.borrow().len())
            .field("removed", &self.node.removed.get())
            .finish()
    }
}

#[derive(Clone)]
pub(crate) struct WeakArea(Weak<AreaNode>);

impl WeakArea {
    pub(crate) fn upgrade(&self) -> Option<Area> {
        self.0.upgrade().map(|node| Area { node })
    }

    pub(crate) fn points_to(&self, area: &Area) -> bool {
        std::ptr::eq(self.0.as_ptr(), Rc::as_ptr(&area.node))
    }
}
