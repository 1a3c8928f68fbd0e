//! Interface to the drawing backend used by render callbacks.
//!
//! The area tree never draws by itself; render callbacks call into a
//! [`Painter`] with the current edge values of their area.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Edges of a screen rectangle, as read from an area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn of(area: &crate::Area) -> Self {
        Self::new(
            area.left().value(),
            area.top().value(),
            area.right().value(),
            area.bottom().value(),
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Leading,
    #[default]
    Center,
    Trailing,
}

impl Alignment {
    /// Start coordinate of `size` within `[from, to)`.
    pub fn align(self, from: f32, to: f32, size: f32) -> f32 {
        match self {
            Alignment::Leading => from,
            Alignment::Center => from + ((to - from) - size) / 2.0,
            Alignment::Trailing => to - size,
        }
    }
}

/// Handle of a texture owned by the drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

pub trait Painter {
    fn fill_rectangle(&self, bounds: Bounds, color: Color);

    /// Draws `texture` stretched over `bounds`; `uv` selects the texture region.
    fn draw_textured_quad(&self, bounds: Bounds, texture: TextureId, uv: Bounds);

    /// Size the backend needs for `text` at `scale`.
    fn measure_text(&self, text: &str, scale: f32) -> (f32, f32);

    /// Draws `text` with its top-left corner at `(x, y)`.
    fn draw_text(&self, x: f32, y: f32, text: &str, scale: f32, color: Color);
}
