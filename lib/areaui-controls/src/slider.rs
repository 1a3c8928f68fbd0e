use std::cell::{Cell, RefCell};
use std::rc::Rc;

use areaui::{
    Alignment, Anchor, Area, AreaBuilder, Bounds, Color, Event, EventKind, MouseButtons, Painter,
    silent_consumer,
};
use tracing::trace;

use crate::label::{Label, LabelBuilder};
use crate::theme::Theme;

/// Horizontal inset of the value label.
const LABEL_INSET: f32 = 4.0;

struct SliderState {
    min: i64,
    max: i64,
    value: Cell<Option<i64>>,
    label: RefCell<Option<Label>>,
    on_change: Rc<RefCell<dyn FnMut(i64)>>,
}

impl SliderState {
    fn value_at(&self, bounds: Bounds, x: f32) -> i64 {
        let width = bounds.width();
        if width <= 0.0 {
            return self.min;
        }
        let fraction = ((x - bounds.left) / width).clamp(0.0, 1.0) as f64;
        let value = (self.min as f64 + fraction * self.span()).round() as i64;
        value.clamp(self.min, self.max)
    }

    /// Width of the range. Taken in `f64` since it may exceed `i64::MAX`.
    fn span(&self) -> f64 {
        self.max as f64 - self.min as f64
    }

    /// Fraction of the range covered by the current value.
    fn fill(&self) -> Option<f32> {
        let value = self.value.get()?;
        if self.max == self.min {
            return Some(1.0);
        }
        Some(((value as f64 - self.min as f64) / self.span()) as f32)
    }

    fn show(&self, value: Option<i64>) {
        let value = value.map(|value| value.clamp(self.min, self.max));
        self.value.set(value);
        if let Some(label) = self.label.borrow().as_ref() {
            label.set_text(value.map(|value| value.to_string()).unwrap_or_default());
        }
    }

    /// Sets the value from user input and reports an actual change.
    fn change(&self, value: i64) {
        let value = value.clamp(self.min, self.max);
        if self.value.get() == Some(value) {
            return;
        }
        self.show(Some(value));
        match self.on_change.try_borrow_mut() {
            Ok(mut on_change) => on_change(value),
            Err(_) => trace!(value, "slider change handler already running"),
        }
    }
}

/// Builder for [`Slider`] instances.
#[derive(Clone)]
pub struct SliderBuilder {
    area: AreaBuilder,
    label: LabelBuilder,
    painter: Rc<dyn Painter>,
    background: Color,
    bar: Color,
    min: i64,
    max: i64,
    on_change: Rc<RefCell<dyn FnMut(i64)>>,
}

impl SliderBuilder {
    pub fn new(painter: Rc<dyn Painter>, theme: &Theme) -> Self {
        let mut label = LabelBuilder::new(painter.clone());
        label
            .set_color(theme.text)
            .set_scale(theme.text_scale)
            .align_horizontally(Alignment::Leading);
        Self {
            area: AreaBuilder::new(),
            label,
            painter,
            background: theme.idle,
            bar: theme.prepared,
            min: 0,
            max: 0,
            on_change: Rc::new(RefCell::new(|_: i64| {})),
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

    /// Inclusive range of values. Bounds given in the wrong order are swapped.
    pub fn with_range(&mut self, min: i64, max: i64) -> &mut Self {
        self.min = min.min(max);
        self.max = min.max(max);
        self
    }

    /// Called whenever user input changes the value.
    pub fn on_change<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(i64) + 'static,
    {
        self.on_change = Rc::new(RefCell::new(handler));
        self
    }

    pub fn build(&self) -> Slider {
        let state = Rc::new(SliderState {
            min: self.min,
            max: self.max,
            value: Cell::new(None),
            label: RefCell::new(None),
            on_change: self.on_change.clone(),
        });

        let painter = self.painter.clone();
        let (background, bar) = (self.background, self.bar);
        let render_state = state.clone();
        let down_state = state.clone();
        let move_state = state.clone();
        let scroll_state = state.clone();
        let area = self
            .area
            .clone()
            .on_render(move |area: &Area| {
                let bounds = Bounds::of(area);
                painter.fill_rectangle(bounds, background);
                if let Some(fill) = render_state.fill() {
                    let right = bounds.left + bounds.width() * fill;
                    painter.fill_rectangle(Bounds { right, ..bounds }, bar);
                }
            })
            .on_event(EventKind::MouseButtonDown, move |area: &Area, event: &Event| {
                if event.buttons() != MouseButtons::PRIMARY {
                    return false;
                }
                area.request_focus();
                down_state.change(down_state.value_at(Bounds::of(area), event.position().x));
                true
            })
            .on_event(EventKind::MouseMove, move |area: &Area, event: &Event| {
                if !area.has_focus() || !event.buttons().contains(MouseButtons::PRIMARY) {
                    return false;
                }
                move_state.change(move_state.value_at(Bounds::of(area), event.position().x));
                true
            })
            .on_event(EventKind::MouseButtonUp, |area: &Area, event: &Event| {
                let released = event
                    .as_button()
                    .is_some_and(|button| button.affected_buttons() == MouseButtons::PRIMARY);
                if !released || !area.has_focus() {
                    return false;
                }
                area.release_focus();
                true
            })
            .on_event(EventKind::MouseScroll, move |_: &Area, event: &Event| {
                let Some(scroll) = event.as_scroll() else {
                    return false;
                };
                let dy = scroll.deltas().y;
                match scroll_state.value.get() {
                    None if dy != 0.0 => scroll_state.change(scroll_state.min),
                    Some(value) if dy < 0.0 => scroll_state.change(value.saturating_sub(1)),
                    Some(value) if dy > 0.0 => scroll_state.change(value.saturating_add(1)),
                    _ => {}
                }
                true
            })
            .on_event(EventKind::MouseButtonClicked, silent_consumer)
            .build();

        let label = self
            .label
            .clone()
            .set_parent(&area)
            .set_left(Anchor::offset(area.left(), LABEL_INSET))
            .set_top(Anchor::offset(area.top(), 0.0))
            .set_right(Anchor::offset(area.right(), -LABEL_INSET))
            .set_bottom(Anchor::offset(area.bottom(), 0.0))
            .build();
        *state.label.borrow_mut() = Some(label.clone());

        Slider { area, label, state }
    }
}

/// Integer value picker. The value starts out undefined and is set by
/// pressing or dragging along the slider, or by scrolling over it.
pub struct Slider {
    area: Area,
    label: Label,
    state: Rc<SliderState>,
}

impl Slider {
    pub fn area(&self) -> &Area {
        &self.area
    }

    pub fn value(&self) -> Option<i64> {
        self.state.value.get()
    }

    /// Changes the shown value without calling the change handler. Values
    /// outside the range are clamped.
    pub fn set_value(&self, value: Option<i64>) {
        self.state.show(value);
    }

    pub fn range(&self) -> (i64, i64) {
        (self.state.min, self.state.max)
    }

    pub fn dispose(&self) {
        self.label.dispose();
        self.area.remove();
    }
}
