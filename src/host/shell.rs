use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use glam::Vec2;
use tracing::debug;

use crate::anchor::Anchor;
use crate::area::{Area, AreaBuilder, RenderHandler};
use crate::event::{Event, PointerData};
use crate::host::{WindowBackend, WindowEvent};
use crate::input::{Key, Modifiers, MouseButtons};

/// Keyboard input forwarded to the listeners of a [`Shell`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyboardEvent {
    KeyDown { key: Key, modifiers: Modifiers },
    KeyUp { key: Key, modifiers: Modifiers },
    CharTyped(char),
    ModifierChanged(Modifiers),
}

type KeyboardListener = Box<dyn FnMut(&KeyboardEvent) -> bool>;

#[derive(Debug, Default)]
struct WindowRequests {
    full_screen: Option<bool>,
    cursor_visible: Option<bool>,
    is_full_screen: bool,
    close: bool,
}

/// Requests against the host window, usable from event handlers.
///
/// Requests are collected and handed to the [`WindowBackend`] by the run loop
/// after the current batch of events.
#[derive(Clone, Default)]
pub struct WindowControl {
    requests: Rc<RefCell<WindowRequests>>,
}

impl WindowControl {
    pub fn set_full_screen(&self, full_screen: bool) {
        let mut requests = self.requests.borrow_mut();
        requests.full_screen = Some(full_screen);
        requests.is_full_screen = full_screen;
    }

    /// Last requested full-screen state.
    pub fn is_full_screen(&self) -> bool {
        self.requests.borrow().is_full_screen
    }

    pub fn set_cursor_visible(&self, visible: bool) {
        self.requests.borrow_mut().cursor_visible = Some(visible);
    }

    pub fn request_close(&self) {
        self.requests.borrow_mut().close = true;
    }

    pub fn close_requested(&self) -> bool {
        self.requests.borrow().close
    }

    /// Hands pending requests to `window`.
    pub fn apply<W: WindowBackend + ?Sized>(&self, window: &mut W) {
        let (full_screen, cursor_visible) = {
            let mut requests = self.requests.borrow_mut();
            (requests.full_screen.take(), requests.cursor_visible.take())
        };
        if let Some(full_screen) = full_screen {
            debug!(full_screen, "window full screen changed");
            window.set_full_screen(full_screen);
        }
        if let Some(visible) = cursor_visible {
            window.set_cursor_visible(visible);
        }
    }
}

impl fmt::Debug for WindowControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowControl")
            .field("requests", &*self.requests.borrow())
            .finish()
    }
}

/// Adapter between a native window and an area tree.
///
/// The shell owns the root area, whose right and bottom edges follow the window
/// size, and keeps the pointer state needed to turn raw window input into
/// positional events.
pub struct Shell {
    root: Area,
    size: (u32, u32),
    pointer: Vec2,
    buttons: MouseButtons,
    modifiers: Modifiers,
    keyboard_listeners: Vec<KeyboardListener>,
    control: WindowControl,
}

impl Shell {
    pub fn new() -> Self {
        Self::from_builder(&mut AreaBuilder::new())
    }

    /// Creates a shell whose root area draws with `handler`, usually to clear
    /// the background.
    pub fn with_root_render(handler: impl Into<RenderHandler>) -> Self {
        Self::from_builder(AreaBuilder::new().on_render(handler))
    }

    fn from_builder(builder: &mut AreaBuilder) -> Self {
        let root = builder
            .set_left(Anchor::zero())
            .set_top(Anchor::zero())
            .set_right(Anchor::zero())
            .set_bottom(Anchor::zero())
            .build();
        Self {
            root,
            size: (0, 0),
            pointer: Vec2::ZERO,
            buttons: MouseButtons::empty(),
            modifiers: Modifiers::empty(),
            keyboard_listeners: Vec::new(),
            control: WindowControl::default(),
        }
    }

    pub fn root(&self) -> &Area {
        &self.root
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn control(&self) -> WindowControl {
        self.control.clone()
    }

    /// Registers a keyboard listener. Listeners run in registration order until
    /// one returns `true`.
    pub fn on_keyboard<F>(&mut self, listener: F)
    where
        F: FnMut(&KeyboardEvent) -> bool + 'static,
    {
        self.keyboard_listeners.push(Box::new(listener));
    }

    /// Feeds one window event into the tree. Returns whether a handler or
    /// listener consumed it.
    pub fn handle(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::Resize { width, height } => {
                self.resize(width, height);
                false
            }
            WindowEvent::MouseMove { x, y } => {
                let position = Vec2::new(x, y);
                let delta = position - self.pointer;
                self.pointer = position;
                self.root
                    .dispatch_positional_event(&Event::mouse_move(self.pointer_data(), delta))
            }
            WindowEvent::MouseButtonDown { button, modifiers } => {
                self.buttons.insert(button);
                self.modifiers = modifiers;
                let event = Event::mouse_button_down(self.pointer_data(), button);
                self.root.dispatch_positional_event(&event)
            }
            WindowEvent::MouseButtonUp { button, modifiers } => {
                self.buttons.remove(button);
                self.modifiers = modifiers;
                let event = Event::mouse_button_up(self.pointer_data(), button);
                self.root.dispatch_positional_event(&event)
            }
            WindowEvent::MouseScroll { dx, dy } => {
                let event = Event::mouse_scroll(self.pointer_data(), Vec2::new(dx, dy));
                self.root.dispatch_positional_event(&event)
            }
            WindowEvent::KeyDown { key, modifiers } => {
                self.modifiers = modifiers;
                self.notify_keyboard(KeyboardEvent::KeyDown { key, modifiers })
            }
            WindowEvent::KeyUp { key, modifiers } => {
                self.modifiers = modifiers;
                self.notify_keyboard(KeyboardEvent::KeyUp { key, modifiers })
            }
            WindowEvent::CharTyped(character) => {
                self.notify_keyboard(KeyboardEvent::CharTyped(character))
            }
            WindowEvent::ModifierChanged(modifiers) => {
                self.modifiers = modifiers;
                self.notify_keyboard(KeyboardEvent::ModifierChanged(modifiers))
            }
            WindowEvent::CloseRequested => {
                debug!("window close requested");
                self.control.request_close();
                false
            }
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        debug!(width, height, "window resized");
        self.size = (width, height);
        self.root.right().request_value(width as f32);
        self.root.bottom().request_value(height as f32);
    }

    pub fn render_frame(&self) {
        self.root.render();
    }

    fn pointer_data(&self) -> PointerData {
        PointerData {
            position: self.pointer,
            buttons: self.buttons,
            modifiers: self.modifiers,
        }
    }

    fn notify_keyboard(&mut self, event: KeyboardEvent) -> bool {
        self.keyboard_listeners
            .iter_mut()
            .any(|listener| listener(&event))
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("root", &self.root)
            .field("size", &self.size)
            .field("pointer", &self.pointer)
            .field("buttons", &self.buttons)
            .field("modifiers", &self.modifiers)
            .field("keyboard_listeners", &self.keyboard_listeners.len())
            .finish()
    }
}
