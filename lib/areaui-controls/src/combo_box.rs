use std::cell::{Cell, RefCell};
use std::fmt::Display;
use std::rc::{Rc, Weak};

use areaui::{
    Alignment, Anchor, Area, AreaBuilder, Bounds, Color, Event, EventKind, MouseButtons, Painter,
    silent_consumer,
};
use tracing::{debug, trace};

use crate::label::{Label, LabelBuilder};
use crate::theme::Theme;

/// Rows shown by an open list; longer lists scroll.
pub const MAX_VISIBLE_ITEMS: usize = 6;

const TEXT_INSET: f32 = 4.0;
const HINT_WIDTH: f32 = 25.0;

struct OpenList {
    area: Area,
    labels: Vec<Label>,
}

struct ComboState<T> {
    painter: Rc<dyn Painter>,
    list_color: Color,
    item_label: LabelBuilder,
    items: RefCell<Vec<T>>,
    selected: RefCell<Option<T>>,
    selected_label: RefCell<Option<Label>>,
    list: RefCell<Option<OpenList>>,
    first_visible: Cell<usize>,
    on_change: Rc<RefCell<dyn FnMut(&T)>>,
}

impl<T> ComboState<T>
where
    T: Clone + PartialEq + Display + 'static,
{
    fn toggle_list(self: &Rc<Self>, owner: &Area) {
        if self.list.borrow().is_some() {
            self.hide_list();
        } else {
            self.show_list(owner);
        }
    }

    fn show_list(self: &Rc<Self>, owner: &Area) {
        let root = owner.root();
        let box_top = owner.top().value();
        let box_bottom = owner.bottom().value();
        let row_height = box_bottom - box_top;
        let rows = self.items.borrow().len().min(MAX_VISIBLE_ITEMS);
        let list_height = row_height * rows as f32;

        // Open upwards only when the list fits above but not below.
        let fits_below = list_height <= root.bottom().value() - box_bottom;
        let fits_above = list_height <= box_top - root.top().value();
        let list_top = if !fits_below && fits_above {
            Anchor::offset(owner.top(), -list_height)
        } else {
            Anchor::offset(owner.bottom(), 0.0)
        };

        let painter = self.painter.clone();
        let list_color = self.list_color;
        let area = AreaBuilder::new()
            .set_parent(&root)
            .set_left(owner.left().clone())
            .set_right(owner.right().clone())
            .set_top(list_top.clone())
            .set_bottom(Anchor::offset(&list_top, list_height))
            .on_render(move |area: &Area| painter.fill_rectangle(Bounds::of(area), list_color))
            .on_event(EventKind::MouseButtonDown, list_mouse_down)
            .on_event(
                EventKind::MouseButtonUp,
                Self::list_handler(Rc::downgrade(self), Self::list_mouse_up),
            )
            .on_event(
                EventKind::MouseScroll,
                Self::list_handler(Rc::downgrade(self), Self::list_scroll),
            )
            .on_event(EventKind::MouseButtonClicked, silent_consumer)
            .build();
        area.request_focus();

        let mut item_label = self.item_label.detached();
        item_label
            .set_parent(&area)
            .align_horizontally(Alignment::Leading)
            .set_left(Anchor::offset(owner.left(), TEXT_INSET))
            .set_right(Anchor::offset(owner.right(), -TEXT_INSET));
        let mut row_top = list_top;
        let labels = (0..rows)
            .map(|_| {
                let row_bottom = Anchor::offset(&row_top, row_height);
                let label = item_label
                    .set_top(row_top.clone())
                    .set_bottom(row_bottom.clone())
                    .build();
                row_top = row_bottom;
                label
            })
            .collect();

        debug!(area = %area.id(), rows, "combo box list opened");
        *self.list.borrow_mut() = Some(OpenList { area, labels });
        self.update_rows();
    }

    fn hide_list(&self) {
        let list = self.list.borrow_mut().take();
        if let Some(list) = list {
            debug!(area = %list.area.id(), "combo box list closed");
            list.area.remove();
        }
    }

    fn update_rows(&self) {
        let list = self.list.borrow();
        let Some(list) = list.as_ref() else {
            return;
        };
        let items = self.items.borrow();
        let first = self.first_visible.get();
        for (label, item) in list.labels.iter().zip(items.iter().skip(first)) {
            label.set_text(item.to_string());
        }
    }

    fn show_selected(&self, item: Option<T>) {
        if let Some(label) = self.selected_label.borrow().as_ref() {
            label.set_text(item.as_ref().map(T::to_string).unwrap_or_default());
        }
        *self.selected.borrow_mut() = item;
    }

    fn choose(&self, item: T) {
        if self.selected.borrow().as_ref() == Some(&item) {
            return;
        }
        self.show_selected(Some(item.clone()));
        match self.on_change.try_borrow_mut() {
            Ok(mut on_change) => on_change(&item),
            Err(_) => trace!("combo box change handler already running"),
        }
    }

    /// The state owns the list area, so list handlers only hold it weakly.
    fn list_handler(
        state: Weak<Self>,
        handler: fn(&Self, &Area, &Event) -> bool,
    ) -> impl FnMut(&Area, &Event) -> bool + 'static {
        move |area: &Area, event: &Event| match state.upgrade() {
            Some(state) => handler(&state, area, event),
            None => false,
        }
    }

    fn list_mouse_up(&self, area: &Area, event: &Event) -> bool {
        let Some(button) = event.as_button() else {
            return false;
        };
        if button.affected_buttons() != MouseButtons::PRIMARY {
            return false;
        }
        if area.has_focus() {
            area.release_focus();
        }
        if area.contains(event.position()) {
            let rows = self
                .list
                .borrow()
                .as_ref()
                .map_or(0, |list| list.labels.len());
            let bounds = Bounds::of(area);
            let row = ((event.position().y - bounds.top) * rows as f32 / bounds.height()) as usize;
            let index = self.first_visible.get() + row.min(rows.saturating_sub(1));
            let item = self.items.borrow().get(index).cloned();
            self.hide_list();
            if let Some(item) = item {
                self.choose(item);
            }
        }
        true
    }

    fn list_scroll(&self, _area: &Area, event: &Event) -> bool {
        let Some(scroll) = event.as_scroll() else {
            return false;
        };
        let dy = scroll.deltas().y;
        let first = self.first_visible.get();
        if dy < 0.0 {
            self.first_visible.set(first.saturating_sub(1));
        } else if dy > 0.0 {
            let rows = self
                .list
                .borrow()
                .as_ref()
                .map_or(0, |list| list.labels.len());
            let hidden_below = self.items.borrow().len().saturating_sub(first + rows);
            self.first_visible.set(first + hidden_below.min(1));
        }
        self.update_rows();
        true
    }
}

fn list_mouse_down(area: &Area, event: &Event) -> bool {
    if event.buttons() != MouseButtons::PRIMARY {
        return false;
    }
    area.request_focus();
    true
}

/// Builder for [`ComboBox`] instances.
pub struct ComboBoxBuilder<T> {
    area: AreaBuilder,
    label: LabelBuilder,
    painter: Rc<dyn Painter>,
    idle_color: Color,
    list_color: Color,
    items: Vec<T>,
    on_change: Rc<RefCell<dyn FnMut(&T)>>,
}

impl<T> Clone for ComboBoxBuilder<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            area: self.area.clone(),
            label: self.label.clone(),
            painter: self.painter.clone(),
            idle_color: self.idle_color,
            list_color: self.list_color,
            items: self.items.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl<T> ComboBoxBuilder<T>
where
    T: Clone + PartialEq + Display + 'static,
{
    pub fn new(painter: Rc<dyn Painter>, theme: &Theme) -> Self {
        let mut label = LabelBuilder::new(painter.clone());
        label.set_color(theme.text).set_scale(theme.text_scale);
        Self {
            area: AreaBuilder::new(),
            label,
            painter,
            idle_color: theme.idle,
            list_color: theme.list,
            items: Vec::new(),
            on_change: Rc::new(RefCell::new(|_: &T| {})),
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

    pub fn with_items(&mut self, items: impl IntoIterator<Item = T>) -> &mut Self {
        self.items = items.into_iter().collect();
        self
    }

    /// Called when the user chooses an item other than the selected one.
    pub fn on_selection_change<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&T) + 'static,
    {
        self.on_change = Rc::new(RefCell::new(handler));
        self
    }

    pub fn build(&self) -> ComboBox<T> {
        let state = Rc::new(ComboState {
            painter: self.painter.clone(),
            list_color: self.list_color,
            item_label: self.label.detached(),
            items: RefCell::new(self.items.clone()),
            selected: RefCell::new(None),
            selected_label: RefCell::new(None),
            list: RefCell::new(None),
            first_visible: Cell::new(0),
            on_change: self.on_change.clone(),
        });

        let painter = self.painter.clone();
        let idle_color = self.idle_color;
        let down_state = state.clone();
        let area = self
            .area
            .clone()
            .on_render(move |area: &Area| painter.fill_rectangle(Bounds::of(area), idle_color))
            .on_event(EventKind::MouseButtonDown, move |area: &Area, event: &Event| {
                if event.buttons() != MouseButtons::PRIMARY {
                    return false;
                }
                down_state.toggle_list(area);
                true
            })
            .on_event(EventKind::MouseButtonUp, silent_consumer)
            .on_event(EventKind::MouseButtonClicked, silent_consumer)
            .on_event(EventKind::MouseScroll, silent_consumer)
            .build();

        let mut label = self.label.detached();
        label
            .set_parent(&area)
            .set_top(Anchor::offset(area.top(), 0.0))
            .set_bottom(Anchor::offset(area.bottom(), 0.0));

        let hint_right = Anchor::offset(area.right(), 0.0);
        let hint_left = Anchor::offset(&hint_right, -HINT_WIDTH);
        let hint = label
            .set_left(hint_left.clone())
            .set_right(hint_right)
            .build();
        hint.set_text("...");

        let selected = label
            .set_left(Anchor::offset(area.left(), TEXT_INSET))
            .set_right(Anchor::offset(&hint_left, -TEXT_INSET))
            .align_horizontally(Alignment::Leading)
            .build();
        *state.selected_label.borrow_mut() = Some(selected);

        ComboBox { area, hint, state }
    }
}

/// Selects one item out of a list. Pressing the box opens the list next to
/// it, above when it only fits there. The open list holds the focus until
/// an item is released on or the box is pressed again.
pub struct ComboBox<T> {
    area: Area,
    hint: Label,
    state: Rc<ComboState<T>>,
}

impl<T> ComboBox<T>
where
    T: Clone + PartialEq + Display + 'static,
{
    pub fn area(&self) -> &Area {
        &self.area
    }

    /// Replaces the items. Closes an open list.
    pub fn set_items(&self, items: impl IntoIterator<Item = T>) {
        self.state.hide_list();
        *self.state.items.borrow_mut() = items.into_iter().collect();
        self.state.first_visible.set(0);
    }

    pub fn items(&self) -> Vec<T> {
        self.state.items.borrow().clone()
    }

    pub fn selected_item(&self) -> Option<T> {
        self.state.selected.borrow().clone()
    }

    /// Changes the selection without calling the change handler.
    pub fn set_selected_item(&self, item: Option<T>) {
        if *self.state.selected.borrow() != item {
            self.state.show_selected(item);
        }
    }

    pub fn is_list_open(&self) -> bool {
        self.state.list.borrow().is_some()
    }

    /// Area of the open list, if any.
    pub fn list_area(&self) -> Option<Area> {
        self.state
            .list
            .borrow()
            .as_ref()
            .map(|list| list.area.clone())
    }

    pub fn dispose(&self) {
        self.state.hide_list();
        self.hint.dispose();
        if let Some(label) = self.state.selected_label.borrow().as_ref() {
            label.dispose();
        }
        self.area.remove();
    }
}
