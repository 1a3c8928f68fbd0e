use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::area::Area;
use crate::event::Event;

fn next_handler_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Callback receiving positional events for one [`crate::EventKind`].
///
/// Returns whether the event was consumed; unconsumed events bubble to the parent.
#[derive(Clone)]
pub struct EventHandler {
    id: u64,
    handler: Rc<RefCell<dyn FnMut(&Area, &Event) -> bool>>,
}

impl EventHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: FnMut(&Area, &Event) -> bool + 'static,
    {
        Self {
            id: next_handler_id(),
            handler: Rc::new(RefCell::new(handler)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// A handler already running further up the stack does not consume the
    /// nested event.
    pub fn call(&self, area: &Area, event: &Event) -> bool {
        let Ok(mut handler) = self.handler.try_borrow_mut() else {
            warn!(handler = self.id, "event handler re-entered, skipping");
            return false;
        };
        (handler)(area, event)
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler").field("id", &self.id).finish()
    }
}

impl<F> From<F> for EventHandler
where
    F: FnMut(&Area, &Event) -> bool + 'static,
{
    fn from(handler: F) -> Self {
        EventHandler::new(handler)
    }
}

/// Callback drawing one area. It reads the current edges from the area it is given.
#[derive(Clone)]
pub struct RenderHandler {
    id: u64,
    handler: Rc<RefCell<dyn FnMut(&Area)>>,
}

impl RenderHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: FnMut(&Area) + 'static,
    {
        Self {
            id: next_handler_id(),
            handler: Rc::new(RefCell::new(handler)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn call(&self, area: &Area) {
        match self.handler.try_borrow_mut() {
            Ok(mut handler) => (handler)(area),
            Err(_) => warn!(handler = self.id, "render handler re-entered, skipping"),
        }
    }
}

impl PartialEq for RenderHandler {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for RenderHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderHandler").field("id", &self.id).finish()
    }
}

impl<F> From<F> for RenderHandler
where
    F: FnMut(&Area) + 'static,
{
    fn from(handler: F) -> Self {
        RenderHandler::new(handler)
    }
}

/// Consumes every event without acting on it.
///
/// Registered where a descendant already decided about the input and the
/// ancestors must not react to the same physical event.
pub fn silent_consumer(_area: &Area, _event: &Event) -> bool {
    true
}
