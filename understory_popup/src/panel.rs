// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The list panel hosted inside a popup.
//!
//! ## Overview
//!
//! [`ListPanel`] lays out the rows of a [`ContentSource`] within width and
//! height limits, tracks selection and vertical scroll, and turns panel-local
//! input into selection changes or a dismissal.
//!
//! The [placement engine](crate::placement) only sees the panel through
//! [`PopupContent`], so it can be driven with any resizable content.
//!
//! ## Attachment
//!
//! A panel is created detached. The owning popup [attaches](ListPanel::attach)
//! it once it is placed, and only then enables the scroll affordance with
//! [`ListPanel::set_vertical_scroll_mode`]. Enabling scrolling on a detached
//! panel is a programming error.

use alloc::string::String;

use kurbo::{Point, Rect, Size};

use crate::event::{Key, KeyEvent, PointerEvent, PointerKind, WheelEvent, WheelGranularity};
use crate::settings::PopupSettings;
use crate::types::WritingDirection;

/// The model behind a popup list.
///
/// Queries take `&self`; notifications take `&mut self`. Notifications are
/// delivered while the popup is mid-dispatch and must not call back into it.
pub trait ContentSource {
    /// Rebuild items and the current selection from the backing control.
    fn refresh_items_and_selection(&mut self);

    /// Number of rows.
    fn item_count(&self) -> usize;

    /// Index selected in the backing control, if any.
    fn current_selection_index(&self) -> Option<usize>;

    /// Height of row `index`.
    fn row_height(&self, index: usize) -> f64;

    /// Measured width of the content of row `index`, excluding padding.
    fn item_width(&self, index: usize) -> f64;

    /// Whether row `index` can be selected.
    fn item_is_enabled(&self, _index: usize) -> bool {
        true
    }

    /// Tooltip text for row `index`.
    fn item_tooltip(&self, index: usize) -> String;

    /// Direction of the list's text.
    fn writing_direction_of_style(&self) -> WritingDirection {
        WritingDirection::Ltr
    }

    /// The highlighted row changed through hover, keyboard, or a restore.
    fn selection_changed(&mut self, _index: Option<usize>) {}

    /// The user accepted row `index`.
    fn value_changed(&mut self, index: usize);

    /// The list was dismissed, with or without a choice.
    fn popup_did_hide(&mut self) {}
}

/// Resizable content placed by the [placement engine](crate::placement).
pub trait PopupContent {
    /// Current laid-out size.
    fn size(&self) -> Size;

    /// Limit the width used by the next layout.
    fn set_max_width(&mut self, width: f64);

    /// Limit the height used by the next layout.
    fn set_max_height(&mut self, height: f64);

    /// Recompute [`PopupContent::size`] under the current limits.
    fn layout(&mut self);

    /// Height of the visible content after the last layout.
    fn popup_content_height(&self) -> f64;

    /// Set the max width and lay out again.
    fn set_max_width_and_layout(&mut self, width: f64) {
        self.set_max_width(width);
        self.layout();
    }
}

/// Whether a scroll affordance is offered.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ScrollbarMode {
    /// Never scroll.
    #[default]
    AlwaysOff,
    /// Scroll when rows overflow.
    Auto,
}

/// What the panel did with an event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Response {
    /// Not consumed.
    Ignored,
    /// Consumed.
    Handled,
    /// Consumed, and the panel asked to close.
    Dismissed,
}

impl Response {
    /// Returns true unless [`Response::Ignored`].
    pub fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// A selectable, scrollable list of rows.
#[derive(Debug)]
pub struct ListPanel<S> {
    source: S,
    settings: PopupSettings,
    origin: Point,
    size: Size,
    base_width: f64,
    max_width: f64,
    max_height: f64,
    content_height: f64,
    visible_height: f64,
    scroll_y: f64,
    selected: Option<usize>,
    original: Option<usize>,
    attached: bool,
    scroll_mode: ScrollbarMode,
}

impl<S: ContentSource> ListPanel<S> {
    /// Create a detached, empty panel over `source`.
    pub fn new(source: S, settings: PopupSettings) -> Self {
        Self {
            source,
            settings,
            origin: Point::ZERO,
            size: Size::ZERO,
            base_width: 0.0,
            max_width: f64::INFINITY,
            max_height: settings.default_max_height,
            content_height: 0.0,
            visible_height: 0.0,
            scroll_y: 0.0,
            selected: None,
            original: None,
            attached: false,
            scroll_mode: ScrollbarMode::AlwaysOff,
        }
    }

    /// The backing source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The backing source, mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Top-left corner within the owning popup.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Move within the owning popup.
    pub fn move_to(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Frame within the owning popup.
    pub fn frame(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Minimum width, normally the anchor control's inner width.
    pub fn set_base_width(&mut self, width: f64) {
        self.base_width = width.max(0.0);
    }

    /// Current width limit.
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    /// Current height limit.
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Total height of all rows, visible or not.
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Vertical scroll offset.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_y
    }

    /// Highlighted row.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Height of row `index`, or zero when out of range.
    pub fn row_height(&self, index: usize) -> f64 {
        if index < self.source.item_count() {
            self.source.row_height(index)
        } else {
            0.0
        }
    }

    /// Tooltip of the highlighted row.
    pub fn selected_item_tooltip(&self) -> Option<String> {
        self.selected.map(|i| self.source.item_tooltip(i))
    }

    /// Direction of the list's text.
    pub fn writing_direction(&self) -> WritingDirection {
        self.source.writing_direction_of_style()
    }

    /// Rebuild from the source and remember the selection to restore on abandon.
    pub fn update_from_source(&mut self) {
        self.source.refresh_items_and_selection();
        let count = self.source.item_count();
        self.selected = self
            .source
            .current_selection_index()
            .filter(|&i| i < count);
        self.original = self.selected;
        self.layout();
    }

    /// Whether the panel is part of a popup's child hierarchy.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Join the owning popup's child hierarchy.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Leave the owning popup's child hierarchy; scrolling is switched off.
    pub fn detach(&mut self) {
        self.attached = false;
        self.scroll_mode = ScrollbarMode::AlwaysOff;
    }

    /// Current scroll affordance.
    pub fn vertical_scroll_mode(&self) -> ScrollbarMode {
        self.scroll_mode
    }

    /// Enable or disable the scroll affordance. Requires an attached panel.
    pub fn set_vertical_scroll_mode(&mut self, mode: ScrollbarMode) {
        debug_assert!(
            self.attached,
            "scroll mode must be set after the panel is attached"
        );
        if !self.attached {
            return;
        }
        self.scroll_mode = mode;
    }

    /// Top edge of row `index` in content coordinates.
    fn row_top(&self, index: usize) -> f64 {
        (0..index).map(|i| self.source.row_height(i)).sum()
    }

    /// Row under a panel-local point.
    pub fn row_at(&self, pt: Point) -> Option<usize> {
        if !self.local_bounds().contains(pt) {
            return None;
        }
        let y = pt.y + self.scroll_y;
        let mut top = 0.0;
        for i in 0..self.source.item_count() {
            let bottom = top + self.source.row_height(i);
            if y >= top && y < bottom {
                return Some(i);
            }
            top = bottom;
        }
        None
    }

    fn local_bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size)
    }

    fn max_scroll(&self) -> f64 {
        (self.content_height - self.visible_height).max(0.0)
    }

    fn can_scroll(&self) -> bool {
        self.scroll_mode == ScrollbarMode::Auto && self.max_scroll() > 0.0
    }

    /// Scroll to `offset`, clamped to the scrollable range.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll_y = offset.clamp(0.0, self.max_scroll());
    }

    /// Scroll so the highlighted row is fully visible.
    pub fn scroll_to_reveal_selection(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        let top = self.row_top(index);
        let bottom = top + self.source.row_height(index);
        if top < self.scroll_y {
            self.scroll_to(top);
        } else if bottom > self.scroll_y + self.visible_height {
            self.scroll_to(bottom - self.visible_height);
        }
    }

    /// Highlight `index` if it is enabled, and keep it in view.
    pub fn select(&mut self, index: Option<usize>) {
        if let Some(i) = index
            && (i >= self.source.item_count() || !self.source.item_is_enabled(i))
        {
            return;
        }
        if self.selected == index {
            return;
        }
        self.selected = index;
        self.source.selection_changed(index);
        self.scroll_to_reveal_selection();
    }

    /// Accept `index` and close.
    pub fn accept(&mut self, index: usize) -> Response {
        if index < self.source.item_count() && self.source.item_is_enabled(index) {
            tracing::debug!(index, "accept row");
            self.source.value_changed(index);
        }
        self.source.popup_did_hide();
        Response::Dismissed
    }

    /// Restore the selection from show time and close.
    pub fn abandon(&mut self) -> Response {
        tracing::debug!(restore = ?self.original, "abandon");
        if self.selected != self.original {
            self.selected = self.original;
            self.source.selection_changed(self.original);
        }
        self.source.popup_did_hide();
        Response::Dismissed
    }

    /// Handle a panel-local pointer event.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Response {
        let inside = self.local_bounds().contains(event.position);
        match event.kind {
            PointerKind::Down if !inside => self.abandon(),
            PointerKind::Down | PointerKind::Move => {
                if !inside {
                    return Response::Ignored;
                }
                if let Some(row) = self.row_at(event.position) {
                    self.select(Some(row));
                }
                Response::Handled
            }
            PointerKind::Up => {
                if !inside {
                    return Response::Ignored;
                }
                match self.row_at(event.position) {
                    Some(row) if self.source.item_is_enabled(row) => self.accept(row),
                    _ => Response::Handled,
                }
            }
        }
    }

    /// Handle a panel-local wheel event.
    pub fn handle_wheel(&mut self, event: &WheelEvent) -> Response {
        if !self.can_scroll() {
            return Response::Ignored;
        }
        let step = match event.granularity {
            WheelGranularity::Pixel => event.delta.y,
            WheelGranularity::Page => event.delta.y * self.visible_height,
        };
        self.scroll_to(self.scroll_y - step);
        Response::Handled
    }

    /// Whether `key` drives list navigation.
    pub fn is_interested_in_key(&self, key: Key) -> bool {
        !matches!(key, Key::Other(_))
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Response {
        let count = self.source.item_count();
        match event.key {
            Key::Escape => self.abandon(),
            Key::Enter | Key::Tab => match self.selected {
                Some(i) => self.accept(i),
                None => self.abandon(),
            },
            Key::Up => self.step_selection(-1),
            Key::Down => self.step_selection(1),
            Key::PageUp => self.page_selection(-1),
            Key::PageDown => self.page_selection(1),
            Key::Home => {
                let first = (0..count).find(|&i| self.source.item_is_enabled(i));
                self.select(first);
                Response::Handled
            }
            Key::End => {
                let last = (0..count).rev().find(|&i| self.source.item_is_enabled(i));
                self.select(last);
                Response::Handled
            }
            Key::Other(_) => Response::Ignored,
        }
    }

    /// Next enabled row `steps` away from the selection, clamped to the ends.
    fn enabled_row_from(&self, steps: isize) -> Option<usize> {
        let count = self.source.item_count();
        if count == 0 {
            return None;
        }
        let last = count - 1;
        let Some(mut cur) = self.selected else {
            // Nothing selected: start from the edge we are moving away from.
            let start = if steps > 0 { 0 } else { last };
            return if self.source.item_is_enabled(start) {
                Some(start)
            } else {
                self.nearest_enabled(start, steps.signum())
            };
        };
        let mut best = None;
        for _ in 0..steps.unsigned_abs() {
            match self.nearest_enabled(cur, steps.signum()) {
                Some(next) => {
                    cur = next;
                    best = Some(next);
                }
                None => break,
            }
        }
        best
    }

    fn nearest_enabled(&self, from: usize, dir: isize) -> Option<usize> {
        let count = self.source.item_count();
        let mut i = from;
        loop {
            i = if dir > 0 {
                i.checked_add(1).filter(|&n| n < count)?
            } else {
                i.checked_sub(1)?
            };
            if self.source.item_is_enabled(i) {
                return Some(i);
            }
        }
    }

    fn step_selection(&mut self, steps: isize) -> Response {
        if let Some(next) = self.enabled_row_from(steps) {
            self.select(Some(next));
        }
        Response::Handled
    }

    fn page_selection(&mut self, dir: isize) -> Response {
        let row = self.selected.map_or(0.0, |i| self.row_height(i));
        let rows = if row > 0.0 {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Row counts per page are small and non-negative."
            )]
            let n = (self.visible_height / row) as isize;
            n.max(1)
        } else {
            1
        };
        self.step_selection(rows * dir)
    }
}

impl<S: ContentSource> PopupContent for ListPanel<S> {
    fn size(&self) -> Size {
        self.size
    }

    fn set_max_width(&mut self, width: f64) {
        self.max_width = width;
    }

    fn set_max_height(&mut self, height: f64) {
        self.max_height = height;
    }

    fn layout(&mut self) {
        let mut visible = 0.0;
        let mut total = 0.0;
        let mut widest: f64 = 0.0;
        let mut full = false;
        for i in 0..self.source.item_count() {
            let h = self.source.row_height(i);
            // Only whole rows are shown.
            if !full {
                if visible + h > self.max_height {
                    full = true;
                } else {
                    visible += h;
                }
            }
            total += h;
            widest = widest.max(self.source.item_width(i));
        }
        let mut width = self
            .base_width
            .max(widest + self.settings.item_padding * 2.0);
        if total > visible {
            width += self.settings.scrollbar_thickness;
        }
        width = width.min(self.max_width).max(0.0);

        self.content_height = total;
        self.visible_height = visible;
        self.size = Size::new(width, visible);
        self.scroll_to(self.scroll_y);
    }

    fn popup_content_height(&self) -> f64 {
        self.visible_height
    }
}
