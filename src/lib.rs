//! Retained-mode gui toolkit.
//!
//! Every piece of the interface is an [`Area`]: a rectangle whose four edges are
//! [`Anchor`]s. Anchors form a one-directional constraint graph, so moving one
//! anchor moves every edge derived from it. Input travels through the area tree
//! by [`Area::dispatch_positional_event`], rendering by [`Area::render`].
//!
//! ```
//! use areaui::{Anchor, AreaBuilder};
//!
//! let root = AreaBuilder::new()
//!     .set_right(Anchor::absolute(800.0))
//!     .set_bottom(Anchor::absolute(600.0))
//!     .build();
//! let panel = AreaBuilder::new()
//!     .set_parent(&root)
//!     .set_left(Anchor::offset(root.left(), 10.0))
//!     .set_right(Anchor::relative(root.left(), root.right(), 0.5))
//!     .build();
//! assert_eq!(panel.right().value(), 400.0);
//! ```

pub mod anchor;
pub mod area;
pub mod error;
pub mod event;
pub mod host;
pub mod input;
pub mod render;

pub use anchor::*;
pub use area::*;
pub use error::*;
pub use event::*;
pub use input::*;
pub use render::*;

pub use glam::Vec2;
