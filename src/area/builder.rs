use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::anchor::Anchor;
use crate::area::{Area, AreaId, AreaNode, Dispatcher, EventHandler, RenderHandler, next_area_id};
use crate::event::EventKind;

/// Collects the shape of a new [`Area`].
///
/// Edges that are not set become independent `0.0` anchors. The builder may be
/// reused: every [`AreaBuilder::build`] call creates a new area from the current
/// settings.
#[derive(Clone, Default)]
pub struct AreaBuilder {
    parent: Option<Area>,
    left: Option<Anchor>,
    top: Option<Anchor>,
    right: Option<Anchor>,
    bottom: Option<Anchor>,
    render_handler: Option<RenderHandler>,
    handlers: FxHashMap<EventKind, EventHandler>,
}

impl AreaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The new area is appended as the topmost child of `parent`.
    pub fn set_parent(&mut self, parent: &Area) -> &mut Self {
        self.parent = Some(parent.clone());
        self
    }

    pub fn set_left(&mut self, anchor: Anchor) -> &mut Self {
        self.left = Some(anchor);
        self
    }

    pub fn set_top(&mut self, anchor: Anchor) -> &mut Self {
        self.top = Some(anchor);
        self
    }

    pub fn set_right(&mut self, anchor: Anchor) -> &mut Self {
        self.right = Some(anchor);
        self
    }

    pub fn set_bottom(&mut self, anchor: Anchor) -> &mut Self {
        self.bottom = Some(anchor);
        self
    }

    pub fn on_render(&mut self, handler: impl Into<RenderHandler>) -> &mut Self {
        self.render_handler = Some(handler.into());
        self
    }

    /// Registers the handler for one event kind, replacing an earlier one.
    pub fn on_event(&mut self, kind: EventKind, handler: impl Into<EventHandler>) -> &mut Self {
        self.handlers.insert(kind, handler.into());
        self
    }

    pub fn build(&self) -> Area {
        let dispatcher = match &self.parent {
            Some(parent) => parent.node.dispatcher.clone(),
            None => Rc::new(Dispatcher::default()),
        };
        let area = Area {
            node: Rc::new(AreaNode {
                id: AreaId(next_area_id()),
                left: self.left.clone().unwrap_or_else(Anchor::zero),
                top: self.top.clone().unwrap_or_else(Anchor::zero),
                right: self.right.clone().unwrap_or_else(Anchor::zero),
                bottom: self.bottom.clone().unwrap_or_else(Anchor::zero),
                parent: self.parent.as_ref().map(|parent| Rc::downgrade(&parent.node)),
                children: RefCell::new(Vec::new()),
                render_handler: self.render_handler.clone(),
                handlers: self.handlers.clone(),
                dispatcher,
                removed: Cell::new(false),
            }),
        };
        if let Some(parent) = &self.parent {
            parent.node.children.borrow_mut().push(area.clone());
        }
        trace!(
            area = %area.id(),
            parent = ?self.parent.as_ref().map(Area::id),
            "area built"
        );
        area
    }
}

impl fmt::Debug for AreaBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AreaBuilder")
            .field("parent", &self.parent.as_ref().map(Area::id))
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("has_render_handler", &self.render_handler.is_some())
            .finish()
    }
}
