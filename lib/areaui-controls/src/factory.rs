use std::fmt::Display;
use std::rc::Rc;

use areaui::Painter;

use crate::button::TextButtonBuilder;
use crate::combo_box::ComboBoxBuilder;
use crate::label::LabelBuilder;
use crate::slider::SliderBuilder;
use crate::theme::Theme;

/// Hands out control builders sharing one painter and theme.
#[derive(Clone)]
pub struct ControlFactory {
    painter: Rc<dyn Painter>,
    theme: Theme,
}

impl ControlFactory {
    pub fn new(painter: Rc<dyn Painter>) -> Self {
        Self::with_theme(painter, Theme::default())
    }

    pub fn with_theme(painter: Rc<dyn Painter>, theme: Theme) -> Self {
        Self { painter, theme }
    }

    pub fn painter(&self) -> &Rc<dyn Painter> {
        &self.painter
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn label(&self) -> LabelBuilder {
        let mut builder = LabelBuilder::new(self.painter.clone());
        builder
            .set_color(self.theme.text)
            .set_scale(self.theme.text_scale);
        builder
    }

    pub fn text_button(&self) -> TextButtonBuilder {
        TextButtonBuilder::new(self.painter.clone(), &self.theme)
    }

    pub fn slider(&self) -> SliderBuilder {
        SliderBuilder::new(self.painter.clone(), &self.theme)
    }

    pub fn combo_box<T>(&self) -> ComboBoxBuilder<T>
    where
        T: Clone + PartialEq + Display + 'static,
    {
        ComboBoxBuilder::new(self.painter.clone(), &self.theme)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use areaui::{Anchor, Color, Event, MouseButtons, PointerData};

    use super::*;
    use crate::testing::{RecordingPainter, root};

    #[test]
    fn controls_share_the_theme() {
        let painter = Rc::new(RecordingPainter::default());
        let theme = Theme {
            idle: Color::rgba(0.1, 0.2, 0.3, 1.0),
            ..Theme::default()
        };
        let factory = ControlFactory::with_theme(painter.clone(), theme);
        let root = root(300.0, 100.0);

        factory
            .text_button()
            .set_parent(&root)
            .set_right(Anchor::absolute(100.0))
            .set_bottom(Anchor::absolute(20.0))
            .build();
        factory
            .slider()
            .set_parent(&root)
            .set_left(Anchor::absolute(100.0))
            .set_right(Anchor::absolute(200.0))
            .set_bottom(Anchor::absolute(20.0))
            .build();
        factory
            .combo_box::<String>()
            .set_parent(&root)
            .set_left(Anchor::absolute(200.0))
            .set_right(Anchor::absolute(300.0))
            .set_bottom(Anchor::absolute(20.0))
            .build();

        root.render();
        let fills = painter.fills();
        assert_eq!(fills.len(), 3);
        assert!(fills.iter().all(|(_, color)| *color == theme.idle));
    }

    #[test]
    fn factory_builders_produce_working_controls() {
        let factory = ControlFactory::new(Rc::new(RecordingPainter::default()));
        let root = root(100.0, 100.0);
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        factory
            .text_button()
            .set_parent(&root)
            .set_right(Anchor::absolute(50.0))
            .set_bottom(Anchor::absolute(50.0))
            .on_action(move || flag.set(true))
            .build();

        let pointer = PointerData::new(10.0, 10.0).with_buttons(MouseButtons::PRIMARY);
        root.dispatch_positional_event(&Event::mouse_button_down(pointer, MouseButtons::PRIMARY));
        root.dispatch_positional_event(&Event::mouse_button_up(
            PointerData::new(10.0, 10.0),
            MouseButtons::PRIMARY,
        ));

        assert!(fired.get());
        assert_eq!(factory.label().build().text(), "");
    }
}
