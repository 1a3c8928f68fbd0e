use std::cell::RefCell;
use std::rc::Rc;

use areaui::{Alignment, Anchor, Area, AreaBuilder, Bounds, Color, Painter};

/// Builder for [`Label`] instances. May be reused; every build creates a new
/// label from the current settings.
#[derive(Clone)]
pub struct LabelBuilder {
    area: AreaBuilder,
    painter: Rc<dyn Painter>,
    scale: f32,
    horizontal: Alignment,
    vertical: Alignment,
    color: Color,
}

impl LabelBuilder {
    pub fn new(painter: Rc<dyn Painter>) -> Self {
        Self {
            area: AreaBuilder::new(),
            painter,
            scale: 1.0,
            horizontal: Alignment::Center,
            vertical: Alignment::Center,
            color: Color::WHITE,
        }
    }

    /// A builder with the same text settings but without parent or edges.
    pub(crate) fn detached(&self) -> Self {
        Self {
            area: AreaBuilder::new(),
            ..self.clone()
        }
    }

    pub fn set_parent(&mut self, parent: &Area) -> &mut Self {
        self.area.set_parent(parent);
        self
    }

    pub fn set_left(&mut self, anchor: Anchor) -> &mut Self {
        self.area.set_left(anchor);
        self
    }

    pub fn set_top(&mut self, anchor: Anchor) -> &mut Self {
        self.area.set_top(anchor);
        self
    }

    pub fn set_right(&mut self, anchor: Anchor) -> &mut Self {
        self.area.set_right(anchor);
        self
    }

    pub fn set_bottom(&mut self, anchor: Anchor) -> &mut Self {
        self.area.set_bottom(anchor);
        self
    }

    pub fn set_scale(&mut self, scale: f32) -> &mut Self {
        self.scale = scale;
        self
    }

    pub fn align_horizontally(&mut self, alignment: Alignment) -> &mut Self {
        self.horizontal = alignment;
        self
    }

    pub fn align_vertically(&mut self, alignment: Alignment) -> &mut Self {
        self.vertical = alignment;
        self
    }

    pub fn set_color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    pub fn build(&self) -> Label {
        let text = Rc::new(RefCell::new(String::new()));
        let painter = self.painter.clone();
        let (scale, horizontal, vertical, color) =
            (self.scale, self.horizontal, self.vertical, self.color);
        let shown = text.clone();
        let area = self
            .area
            .clone()
            .on_render(move |area: &Area| {
                let text = shown.borrow();
                if text.is_empty() {
                    return;
                }
                let bounds = Bounds::of(area);
                let (width, height) = painter.measure_text(&text, scale);
                let x = horizontal.align(bounds.left, bounds.right, width);
                let y = vertical.align(bounds.top, bounds.bottom, height);
                painter.draw_text(x, y, &text, scale, color);
            })
            .build();
        Label { area, text }
    }
}

/// A line of text aligned within its area.
#[derive(Debug, Clone)]
pub struct Label {
    area: Area,
    text: Rc<RefCell<String>>,
}

impl Label {
    pub fn area(&self) -> &Area {
        &self.area
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }

    pub fn dispose(&self) {
        self.area.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingPainter, root};

    #[test]
    fn text_is_centered_by_default() {
        let painter = Rc::new(RecordingPainter::default());
        let root = root(200.0, 100.0);
        let label = LabelBuilder::new(painter.clone())
            .set_parent(&root)
            .set_right(Anchor::offset(root.right(), 0.0))
            .set_bottom(Anchor::offset(root.bottom(), 0.0))
            .build();
        label.set_text("abcd");

        root.render();

        assert_eq!(
            painter.take(),
            vec![Call::Text {
                x: 84.0,
                y: 45.0,
                text: "abcd".to_owned(),
            }]
        );
    }

    #[test]
    fn leading_alignment_starts_at_left_edge() {
        let painter = Rc::new(RecordingPainter::default());
        let root = root(200.0, 100.0);
        let label = LabelBuilder::new(painter.clone())
            .set_parent(&root)
            .set_left(Anchor::absolute(4.0))
            .set_right(Anchor::absolute(120.0))
            .set_bottom(Anchor::absolute(20.0))
            .align_horizontally(Alignment::Leading)
            .align_vertically(Alignment::Trailing)
            .set_scale(2.0)
            .build();
        label.set_text("x");

        label.area().render();

        assert_eq!(
            painter.take(),
            vec![Call::Text {
                x: 4.0,
                y: 0.0,
                text: "x".to_owned(),
            }]
        );
    }

    #[test]
    fn empty_label_draws_nothing() {
        let painter = Rc::new(RecordingPainter::default());
        let label = LabelBuilder::new(painter.clone()).build();
        label.area().render();
        assert!(painter.take().is_empty());
        assert_eq!(label.text(), "");
    }

    #[test]
    fn dispose_detaches_label() {
        let painter = Rc::new(RecordingPainter::default());
        let root = root(100.0, 100.0);
        let label = LabelBuilder::new(painter).set_parent(&root).build();
        assert_eq!(root.children().len(), 1);
        label.dispose();
        assert!(root.children().is_empty());
        assert!(label.area().is_removed());
    }
}
