use std::cell::RefCell;

use areaui::{Anchor, Area, AreaBuilder, Bounds, Color, Painter, TextureId};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Fill(Bounds, Color),
    Quad(Bounds, TextureId),
    Text { x: f32, y: f32, text: String },
}

/// Painter that records every call. Text measures 8 x 10 pixels per
/// character at scale 1.
#[derive(Debug, Default)]
pub(crate) struct RecordingPainter {
    calls: RefCell<Vec<Call>>,
}

impl RecordingPainter {
    pub(crate) fn take(&self) -> Vec<Call> {
        self.calls.take()
    }

    pub(crate) fn texts(&self) -> Vec<String> {
        self.take()
            .into_iter()
            .filter_map(|call| match call {
                Call::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn fills(&self) -> Vec<(Bounds, Color)> {
        self.take()
            .into_iter()
            .filter_map(|call| match call {
                Call::Fill(bounds, color) => Some((bounds, color)),
                _ => None,
            })
            .collect()
    }
}

impl Painter for RecordingPainter {
    fn fill_rectangle(&self, bounds: Bounds, color: Color) {
        self.calls.borrow_mut().push(Call::Fill(bounds, color));
    }

    fn draw_textured_quad(&self, bounds: Bounds, texture: TextureId, _uv: Bounds) {
        self.calls.borrow_mut().push(Call::Quad(bounds, texture));
    }

    fn measure_text(&self, text: &str, scale: f32) -> (f32, f32) {
        (text.chars().count() as f32 * 8.0 * scale, 10.0 * scale)
    }

    fn draw_text(&self, x: f32, y: f32, text: &str, _scale: f32, _color: Color) {
        self.calls.borrow_mut().push(Call::Text {
            x,
            y,
            text: text.to_owned(),
        });
    }
}

pub(crate) fn root(width: f32, height: f32) -> Area {
    AreaBuilder::new()
        .set_right(Anchor::absolute(width))
        .set_bottom(Anchor::absolute(height))
        .build()
}
