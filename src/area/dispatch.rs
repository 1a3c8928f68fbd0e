use std::cell::RefCell;

use glam::Vec2;
use tracing::{debug, trace};

use crate::area::{Area, WeakArea};
use crate::event::Event;
use crate::input::MouseButtons;

/// Dispatch state shared by all areas of one tree.
#[derive(Default)]
pub(crate) struct Dispatcher {
    focused: RefCell<Option<WeakArea>>,
    press: RefCell<Option<PendingPress>>,
}

/// The area that received a button-down, kept until the matching button-up.
struct PendingPress {
    area: WeakArea,
    button: MouseButtons,
    interrupted: bool,
}

impl Dispatcher {
    pub(crate) fn focused(&self) -> Option<Area> {
        let mut focused = self.focused.borrow_mut();
        let area = focused.as_ref().and_then(WeakArea::upgrade);
        match area {
            Some(area) if !area.is_removed() => Some(area),
            _ => {
                *focused = None;
                None
            }
        }
    }

    pub(crate) fn is_focused(&self, area: &Area) -> bool {
        self.focused
            .borrow()
            .as_ref()
            .is_some_and(|focused| focused.points_to(area))
    }

    pub(crate) fn set_focus(&self, area: &Area) {
        if self.is_focused(area) {
            return;
        }
        debug!(area = %area.id(), "focus requested");
        *self.focused.borrow_mut() = Some(area.downgrade());

        // Focus taken by anything other than the pressed area or one of its
        // ancestors means the press is no longer a click.
        if let Some(press) = self.press.borrow_mut().as_mut() {
            let owns_press = press
                .area
                .upgrade()
                .is_some_and(|pressed| pressed.is_within(area));
            if !owns_press {
                press.interrupted = true;
            }
        }
    }

    pub(crate) fn release_focus(&self, area: &Area) {
        if self.is_focused(area) {
            debug!(area = %area.id(), "focus released");
            *self.focused.borrow_mut() = None;
        }
    }

    /// Drops focus and pending press state referring to `area` or its subtree.
    pub(crate) fn forget_within(&self, area: &Area) {
        let focused = self.focused.borrow().as_ref().and_then(WeakArea::upgrade);
        if focused.is_some_and(|focused| focused.is_within(area)) {
            debug!(area = %area.id(), "focus cleared by removal");
            *self.focused.borrow_mut() = None;
        }

        let mut press = self.press.borrow_mut();
        let pressed = press.as_ref().and_then(|press| press.area.upgrade());
        if pressed.is_some_and(|pressed| pressed.is_within(area)) {
            *press = None;
        }
    }

    fn record_press(&self, area: &Area, button: MouseButtons) {
        *self.press.borrow_mut() = Some(PendingPress {
            area: area.downgrade(),
            button,
            interrupted: false,
        });
    }

    /// The area that should receive a click for a release of `button` at
    /// `position`, consuming the pending press.
    fn take_click_target(&self, button: MouseButtons, position: Vec2) -> Option<Area> {
        let mut press = self.press.borrow_mut();
        if press.as_ref().is_none_or(|press| press.button != button) {
            return None;
        }
        let press = press.take()?;
        if press.interrupted {
            trace!("click suppressed, focus moved during press");
            return None;
        }
        press
            .area
            .upgrade()
            .filter(|area| !area.is_removed() && area.contains(position))
    }
}

impl Area {
    /// Routes a positional event through the tree and returns whether some
    /// area consumed it.
    ///
    /// The focused area, if any, receives the event directly. Otherwise the
    /// topmost area under the pointer is the target. Unconsumed events bubble
    /// from the target towards the root. A button-up released inside the area
    /// that received the matching button-down is followed by a
    /// [`Event::MouseButtonClicked`].
    pub fn dispatch_positional_event(&self, event: &Event) -> bool {
        let dispatcher = self.node.dispatcher.clone();
        let target = match dispatcher.focused() {
            Some(focused) => focused,
            None => self.hit_test(event.position()),
        };
        trace!(kind = ?event.kind(), target = %target.id(), "dispatching event");

        if let Event::MouseButtonDown(button) = event {
            dispatcher.record_press(&target, button.affected);
        }

        let consumed = target.bubble(event);

        if let Event::MouseButtonUp(button) = event {
            if let Some(clicked) = dispatcher.take_click_target(button.affected, event.position())
            {
                debug!(area = %clicked.id(), "click synthesized");
                self.dispatch_positional_event(&Event::MouseButtonClicked(*button));
            }
        }

        consumed
    }

    /// The deepest area under `position`, testing later siblings first. Falls
    /// back to `self` when no child contains the point.
    pub fn hit_test(&self, position: Vec2) -> Area {
        let children = self.children();
        match children.iter().rev().find(|child| child.contains(position)) {
            Some(child) => child.hit_test(position),
            None => self.clone(),
        }
    }

    /// Offers the event to this area, then to each ancestor until one consumes it.
    fn bubble(&self, event: &Event) -> bool {
        let mut current = Some(self.clone());
        while let Some(area) = current {
            if area.handle_event(event) {
                trace!(kind = ?event.kind(), area = %area.id(), "event consumed");
                return true;
            }
            current = area.parent();
        }
        false
    }
}
