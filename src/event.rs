use glam::Vec2;

use crate::input::{Modifiers, MouseButtons};

/// Discriminant of [`Event`], used as the key for handler registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseMove,
    MouseButtonDown,
    MouseButtonUp,
    MouseScroll,
    MouseButtonClicked,
}

/// Pointer state shared by all positional events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerData {
    pub position: Vec2,
    /// Buttons held when the event was created. For button events this is the
    /// mask after the change.
    pub buttons: MouseButtons,
    pub modifiers: Modifiers,
}

impl PointerData {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Self::default()
        }
    }

    pub fn with_buttons(mut self, buttons: MouseButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    pub pointer: PointerData,
    /// Movement since the previously reported position.
    pub delta: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonEvent {
    pub pointer: PointerData,
    /// The button(s) whose state changed.
    pub affected: MouseButtons,
}

impl MouseButtonEvent {
    pub fn buttons(&self) -> MouseButtons {
        self.pointer.buttons
    }

    pub fn affected_buttons(&self) -> MouseButtons {
        self.affected
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrollEvent {
    pub pointer: PointerData,
    /// Right-hand oriented: positive values go right/down.
    pub scroll: Vec2,
}

impl MouseScrollEvent {
    pub fn deltas(&self) -> Vec2 {
        self.scroll
    }
}

/// A positional input event routed through the area tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    MouseMove(MouseMoveEvent),
    MouseButtonDown(MouseButtonEvent),
    MouseButtonUp(MouseButtonEvent),
    MouseScroll(MouseScrollEvent),
    /// Synthesized after a button was pressed and released within the same area.
    MouseButtonClicked(MouseButtonEvent),
}

impl Event {
    pub fn mouse_move(pointer: PointerData, delta: Vec2) -> Self {
        Event::MouseMove(MouseMoveEvent { pointer, delta })
    }

    pub fn mouse_button_down(pointer: PointerData, affected: MouseButtons) -> Self {
        Event::MouseButtonDown(MouseButtonEvent { pointer, affected })
    }

    pub fn mouse_button_up(pointer: PointerData, affected: MouseButtons) -> Self {
        Event::MouseButtonUp(MouseButtonEvent { pointer, affected })
    }

    pub fn mouse_scroll(pointer: PointerData, scroll: Vec2) -> Self {
        Event::MouseScroll(MouseScrollEvent { pointer, scroll })
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::MouseMove(_) => EventKind::MouseMove,
            Event::MouseButtonDown(_) => EventKind::MouseButtonDown,
            Event::MouseButtonUp(_) => EventKind::MouseButtonUp,
            Event::MouseScroll(_) => EventKind::MouseScroll,
            Event::MouseButtonClicked(_) => EventKind::MouseButtonClicked,
        }
    }

    pub fn pointer(&self) -> &PointerData {
        match self {
            Event::MouseMove(event) => &event.pointer,
            Event::MouseButtonDown(event)
            | Event::MouseButtonUp(event)
            | Event::MouseButtonClicked(event) => &event.pointer,
            Event::MouseScroll(event) => &event.pointer,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pointer().position
    }

    pub fn buttons(&self) -> MouseButtons {
        self.pointer().buttons
    }

    /// Payload of down, up and clicked events.
    pub fn as_button(&self) -> Option<&MouseButtonEvent> {
        match self {
            Event::MouseButtonDown(event)
            | Event::MouseButtonUp(event)
            | Event::MouseButtonClicked(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_move(&self) -> Option<&MouseMoveEvent> {
        match self {
            Event::MouseMove(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_scroll(&self) -> Option<&MouseScrollEvent> {
        match self {
            Event::MouseScroll(event) => Some(event),
            _ => None,
        }
    }
}
