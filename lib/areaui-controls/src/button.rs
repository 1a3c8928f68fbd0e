use std::cell::{Cell, RefCell};
use std::rc::Rc;

use areaui::{
    Anchor, AnchorNode, Area, AreaBuilder, Bounds, Color, Event, EventKind, MouseButtons, Painter,
};
use tracing::trace;

use crate::label::{Label, LabelBuilder};
use crate::theme::Theme;

/// Displacement of the label while the button is held down.
const PRESSED_LABEL_SHIFT: (f32, f32) = (5.0, 2.0);

/// Follows `base`, displaced by a shift the button controls. Requests change
/// the shift and leave `base` alone.
struct ShiftedAnchor {
    base: Anchor,
    shift: Rc<Cell<f32>>,
}

impl AnchorNode for ShiftedAnchor {
    fn value(&self) -> f32 {
        self.base.value() + self.shift.get()
    }

    fn request_value(&self, value: f32) {
        self.shift.set(value - self.base.value());
    }
}

struct ButtonState {
    idle_color: Color,
    prepared_color: Color,
    prepared: Cell<bool>,
    label_shift: (Rc<Cell<f32>>, Rc<Cell<f32>>),
    action: Rc<RefCell<dyn FnMut()>>,
}

impl ButtonState {
    fn color(&self) -> Color {
        if self.prepared.get() {
            self.prepared_color
        } else {
            self.idle_color
        }
    }

    fn prepare(&self) {
        if !self.prepared.replace(true) {
            self.label_shift.0.set(PRESSED_LABEL_SHIFT.0);
            self.label_shift.1.set(PRESSED_LABEL_SHIFT.1);
        }
    }

    fn unprepare(&self) {
        if self.prepared.replace(false) {
            self.label_shift.0.set(0.0);
            self.label_shift.1.set(0.0);
        }
    }

    fn fire(&self) {
        match self.action.try_borrow_mut() {
            Ok(mut action) => action(),
            Err(_) => trace!("button action already running"),
        }
    }
}

/// Builder for [`TextButton`] instances.
#[derive(Clone)]
pub struct TextButtonBuilder {
    area: AreaBuilder,
    label: LabelBuilder,
    painter: Rc<dyn Painter>,
    idle_color: Color,
    prepared_color: Color,
    text: String,
    action: Rc<RefCell<dyn FnMut()>>,
}

impl TextButtonBuilder {
    pub fn new(painter: Rc<dyn Painter>, theme: &Theme) -> Self {
        let mut label = LabelBuilder::new(painter.clone());
        label.set_color(theme.text).set_scale(theme.text_scale);
        Self {
            area: AreaBuilder::new(),
            label,
            painter,
            idle_color: theme.idle,
            prepared_color: theme.prepared,
            text: String::new(),
            action: Rc::new(RefCell::new(|| {})),
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

    pub fn with_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    /// Called when the primary button is released over a pressed button.
    pub fn on_action<F>(&mut self, action: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.action = Rc::new(RefCell::new(action));
        self
    }

    pub fn with_idle_color(&mut self, color: Color) -> &mut Self {
        self.idle_color = color;
        self
    }

    pub fn with_prepared_color(&mut self, color: Color) -> &mut Self {
        self.prepared_color = color;
        self
    }

    pub fn build(&self) -> TextButton {
        let state = Rc::new(ButtonState {
            idle_color: self.idle_color,
            prepared_color: self.prepared_color,
            prepared: Cell::new(false),
            label_shift: (Rc::new(Cell::new(0.0)), Rc::new(Cell::new(0.0))),
            action: self.action.clone(),
        });

        let painter = self.painter.clone();
        let render_state = state.clone();
        let down_state = state.clone();
        let up_state = state.clone();
        let area = self
            .area
            .clone()
            .on_render(move |area: &Area| {
                painter.fill_rectangle(Bounds::of(area), render_state.color());
            })
            .on_event(EventKind::MouseButtonDown, move |area: &Area, event: &Event| {
                if event.buttons() != MouseButtons::PRIMARY {
                    return false;
                }
                area.request_focus();
                down_state.prepare();
                true
            })
            .on_event(EventKind::MouseButtonUp, move |area: &Area, event: &Event| {
                let Some(button) = event.as_button() else {
                    return false;
                };
                if !area.has_focus() || button.affected_buttons() != MouseButtons::PRIMARY {
                    return false;
                }
                area.release_focus();
                up_state.unprepare();
                if area.contains(event.position()) {
                    up_state.fire();
                }
                true
            })
            .build();

        let label = self
            .label
            .clone()
            .set_parent(&area)
            .set_left(Anchor::new(ShiftedAnchor {
                base: area.left().clone(),
                shift: state.label_shift.0.clone(),
            }))
            .set_top(Anchor::new(ShiftedAnchor {
                base: area.top().clone(),
                shift: state.label_shift.1.clone(),
            }))
            .set_right(Anchor::offset(area.right(), 0.0))
            .set_bottom(Anchor::offset(area.bottom(), 0.0))
            .build();
        label.set_text(self.text.clone());

        TextButton { area, label, state }
    }
}

/// A button showing a text label. Pressing the primary mouse button on it
/// captures the pointer until release; the action fires only when released
/// over the button.
pub struct TextButton {
    area: Area,
    label: Label,
    state: Rc<ButtonState>,
}

impl TextButton {
    pub fn area(&self) -> &Area {
        &self.area
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.label.set_text(text);
    }

    pub fn is_prepared(&self) -> bool {
        self.state.prepared.get()
    }

    pub fn dispose(&self) {
        self.label.dispose();
        self.area.remove();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use areaui::{Event, MouseButtons, PointerData};

    use super::*;
    use crate::testing::{RecordingPainter, root};

    fn down(x: f32, y: f32, button: MouseButtons) -> Event {
        Event::mouse_button_down(PointerData::new(x, y).with_buttons(button), button)
    }

    fn up(x: f32, y: f32, button: MouseButtons) -> Event {
        Event::mouse_button_up(PointerData::new(x, y), button)
    }

    fn button(root: &Area, painter: Rc<RecordingPainter>, fired: Rc<Cell<u32>>) -> TextButton {
        TextButtonBuilder::new(painter, &Theme::default())
            .set_parent(root)
            .set_left(Anchor::absolute(10.0))
            .set_top(Anchor::absolute(10.0))
            .set_right(Anchor::absolute(110.0))
            .set_bottom(Anchor::absolute(40.0))
            .with_text("ok")
            .on_action(move || fired.set(fired.get() + 1))
            .build()
    }

    #[test]
    fn press_and_release_inside_fires_action() {
        let painter = Rc::new(RecordingPainter::default());
        let root = root(200.0, 200.0);
        let fired = Rc::new(Cell::new(0));
        let button = button(&root, painter, fired.clone());

        assert!(root.dispatch_positional_event(&down(20.0, 20.0, MouseButtons::PRIMARY)));
        assert!(button.is_prepared());
        assert!(button.area().has_focus());
        assert_eq!(button.label().area().left().value(), 15.0);
        assert_eq!(button.label().area().top().value(), 12.0);

        assert!(root.dispatch_positional_event(&up(30.0, 25.0, MouseButtons::PRIMARY)));
        assert_eq!(fired.get(), 1);
        assert!(!button.is_prepared());
        assert!(!button.area().has_focus());
        assert_eq!(button.label().area().left().value(), 10.0);
        assert_eq!(button.label().area().top().value(), 10.0);
    }

    #[test]
    fn release_outside_cancels_action() {
        let painter = Rc::new(RecordingPainter::default());
        let root = root(200.0, 200.0);
        let fired = Rc::new(Cell::new(0));
        let button = button(&root, painter, fired.clone());

        root.dispatch_positional_event(&down(20.0, 20.0, MouseButtons::PRIMARY));
        assert!(root.dispatch_positional_event(&up(150.0, 150.0, MouseButtons::PRIMARY)));

        assert_eq!(fired.get(), 0);
        assert!(!button.is_prepared());
    }

    #[test]
    fn secondary_button_is_ignored() {
        let painter = Rc::new(RecordingPainter::default());
        let root = root(200.0, 200.0);
        let fired = Rc::new(Cell::new(0));
        let button = button(&root, painter, fired.clone());

        assert!(!root.dispatch_positional_event(&down(20.0, 20.0, MouseButtons::SECONDARY)));
        assert!(!root.dispatch_positional_event(&up(20.0, 20.0, MouseButtons::SECONDARY)));
        assert!(!button.is_prepared());
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn background_follows_prepared_state() {
        let painter = Rc::new(RecordingPainter::default());
        let root = root(200.0, 200.0);
        let button = button(&root, painter.clone(), Rc::new(Cell::new(0)));
        let theme = Theme::default();

        button.area().render();
        let fills = painter.fills();
        assert_eq!(fills[0].0, Bounds::new(10.0, 10.0, 110.0, 40.0));
        assert_eq!(fills[0].1, theme.idle);

        root.dispatch_positional_event(&down(20.0, 20.0, MouseButtons::PRIMARY));
        button.area().render();
        assert_eq!(painter.fills()[0].1, theme.prepared);
    }

    #[test]
    fn label_shows_text() {
        let painter = Rc::new(RecordingPainter::default());
        let root = root(200.0, 200.0);
        let button = button(&root, painter.clone(), Rc::new(Cell::new(0)));

        root.render();
        assert_eq!(painter.texts(), vec!["ok".to_owned()]);

        button.set_text("go");
        root.render();
        assert_eq!(painter.texts(), vec!["go".to_owned()]);
        assert_eq!(button.label().area().parent(), Some(button.area().clone()));
    }

    #[test]
    fn dispose_removes_button_and_label() {
        let painter = Rc::new(RecordingPainter::default());
        let root = root(200.0, 200.0);
        let button = button(&root, painter, Rc::new(Cell::new(0)));

        button.dispose();

        assert!(root.children().is_empty());
        assert!(button.label().area().is_removed());
    }
}
