//! Host side of the toolkit: normalized window input, the [`Shell`] that feeds
//! it into an area tree, and the run loop.

mod config;
mod run;
mod shell;

pub use config::*;
pub use run::*;
pub use shell::*;

use crate::error::ShellResult;
use crate::input::{Key, Modifiers, MouseButtons};

/// Raw input reported by a [`WindowBackend`], in window pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    Resize {
        width: u32,
        height: u32,
    },
    MouseMove {
        x: f32,
        y: f32,
    },
    MouseButtonDown {
        button: MouseButtons,
        modifiers: Modifiers,
    },
    MouseButtonUp {
        button: MouseButtons,
        modifiers: Modifiers,
    },
    MouseScroll {
        dx: f32,
        dy: f32,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
        modifiers: Modifiers,
    },
    CharTyped(char),
    ModifierChanged(Modifiers),
    CloseRequested,
}

/// A native window the run loop drives.
pub trait WindowBackend {
    fn size(&self) -> (u32, u32);

    fn set_full_screen(&mut self, full_screen: bool);

    fn set_cursor_visible(&mut self, visible: bool);

    fn should_close(&self) -> bool;

    /// Appends every event received since the last poll to `events`.
    fn poll_events(&mut self, events: &mut Vec<WindowEvent>) -> ShellResult<()>;

    /// Shows the frame rendered since the last call.
    fn present(&mut self) -> ShellResult<()>;

    fn close(&mut self);
}
