//! Controls built on the area tree of `areaui`.
//!
//! Every control owns one area and paints through a shared
//! [`areaui::Painter`]. A [`ControlFactory`] hands out builders that share the
//! painter and a [`Theme`].

mod button;
mod combo_box;
mod factory;
mod label;
mod slider;
mod theme;

#[cfg(test)]
mod testing;

pub use button::*;
pub use combo_box::*;
pub use factory::*;
pub use label::*;
pub use slider::*;
pub use theme::*;
