// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup lifecycle: show, place, route input, dismiss.
//!
//! ## Overview
//!
//! A [`Popup`] owns a [`ListPanel`] framed by a border. It is shared through
//! `Rc` so the host can keep it alive while it is on screen; entry points
//! that talk to the host take `self: &Rc<Self>`.
//!
//! ## States
//!
//! `Closed → Open → Closed`. [`Popup::open`] moves to `Open` after the host
//! places the floating surface. [`Popup::notify_closed`] moves back and tells
//! the host once; repeated calls do nothing. Dismissals that start in the
//! panel (accepting a row, clicking outside, Escape) end in
//! [`Popup::notify_closed`] as well.
//!
//! ## Lifetime during dispatch
//!
//! Dispatching input can dismiss the popup, and the host may drop its last
//! reference when told. Input entry points hold a strong reference for the
//! duration of the call.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Cell, Ref, RefCell};

use kurbo::{Point, Rect, Size, Vec2};

use crate::damage::Damage;
use crate::event::{GestureEvent, KeyEvent, PointerEvent, TouchEvent, WheelEvent};
use crate::host::HostSurface;
use crate::panel::{ContentSource, ListPanel, PopupContent, Response, ScrollbarMode};
use crate::placement::{PlacementRequest, compute_placement};
use crate::router::{EventRouter, GestureRoute, Localizer};
use crate::settings::PopupSettings;
use crate::types::{AnchorQuad, PopupState, WritingDirection};

/// Anchor geometry recorded by [`Popup::show_in_rect`].
#[derive(Copy, Clone, Debug, PartialEq)]
struct Anchor {
    quad: AnchorQuad,
    control_size: Size,
}

/// A bordered, floating list anchored to a control.
pub struct Popup<S: ContentSource> {
    settings: PopupSettings,
    panel: RefCell<ListPanel<S>>,
    state: Cell<PopupState>,
    frame: Cell<Rect>,
    anchor: Cell<Option<Anchor>>,
    host: RefCell<Option<Rc<dyn HostSurface<S>>>>,
    damage: RefCell<Damage>,
}

impl<S: ContentSource> core::fmt::Debug for Popup<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Popup")
            .field("state", &self.state.get())
            .field("frame", &self.frame.get())
            .field("has_host", &self.host.borrow().is_some())
            .finish_non_exhaustive()
    }
}

impl<S: ContentSource> Popup<S> {
    /// Create a closed popup over `source`.
    pub fn new(source: S, settings: PopupSettings) -> Rc<Self> {
        Rc::new(Self {
            settings,
            panel: RefCell::new(ListPanel::new(source, settings)),
            state: Cell::new(PopupState::Closed),
            frame: Cell::new(Rect::ZERO),
            anchor: Cell::new(None),
            host: RefCell::new(None),
            damage: RefCell::new(Damage::default()),
        })
    }

    /// Settings in use.
    pub fn settings(&self) -> &PopupSettings {
        &self.settings
    }

    /// Lifecycle state.
    pub fn state(&self) -> PopupState {
        self.state.get()
    }

    /// Returns true while the host shows the popup.
    pub fn is_open(&self) -> bool {
        self.state.get() == PopupState::Open
    }

    /// Outer frame, border included. The origin is relative to the floating
    /// surface.
    pub fn frame(&self) -> Rect {
        self.frame.get()
    }

    /// Borrow the list panel.
    pub fn panel(&self) -> Ref<'_, ListPanel<S>> {
        self.panel.borrow()
    }

    /// Highlighted row.
    pub fn selected_index(&self) -> Option<usize> {
        self.panel.borrow().selected_index()
    }

    /// Height of the first row.
    pub fn menu_item_height(&self) -> f64 {
        self.panel.borrow().row_height(0)
    }

    /// Tooltip of the highlighted row.
    pub fn selected_item_tooltip(&self) -> Option<String> {
        self.panel.borrow().selected_item_tooltip()
    }

    /// Direction of the list's text.
    pub fn writing_direction(&self) -> WritingDirection {
        self.panel.borrow().writing_direction()
    }

    /// Drain accumulated repaint requests.
    pub fn take_damage(&self) -> Damage {
        core::mem::take(&mut *self.damage.borrow_mut())
    }

    /// Router from popup space to panel space.
    pub fn router(&self) -> EventRouter {
        let origin = self.panel.borrow().origin();
        EventRouter::new(Localizer::new(origin), self.settings.wheel_tick_divisor)
    }

    fn invalidate(&self) {
        let area = Rect::from_origin_size(Point::ZERO, self.frame.get().size());
        self.damage.borrow_mut().add(area);
    }

    fn host(&self) -> Option<Rc<dyn HostSurface<S>>> {
        self.host.borrow().clone()
    }

    fn base_width(&self, control_size: Size) -> f64 {
        (control_size.width - self.settings.border_pair()).max(0.0)
    }

    /// Place the panel inside the border and size the frame around it.
    fn fit_to_panel(&self) {
        let border = self.settings.border_size;
        let size = {
            let mut panel = self.panel.borrow_mut();
            panel.move_to(Point::new(border, border));
            panel.size()
        };
        let frame = self.frame.get();
        self.frame.set(Rect::from_origin_size(
            frame.origin(),
            Size::new(
                size.width + self.settings.border_pair(),
                size.height + self.settings.border_pair(),
            ),
        ));
        self.invalidate();
    }

    fn layout_and_calculate_rect(
        &self,
        host: &dyn HostSurface<S>,
        control_height: f64,
        transform_offset: Size,
        initial_corner: Point,
    ) -> Option<Rect> {
        let anchor = self.anchor.get()?;
        let placement = {
            let mut panel = self.panel.borrow_mut();
            let request = PlacementRequest {
                anchor: anchor.quad,
                control_height,
                transform_offset,
                initial_corner,
                direction: panel.writing_direction(),
            };
            compute_placement(&mut *panel, host, &request, &self.settings)
        };
        self.fit_to_panel();
        Some(placement.rect)
    }

    /// Show the popup for a control at `quad` (document coordinates).
    ///
    /// `control_size` is the untransformed size of the control. The selection
    /// comes from the content source; `selected_index` is only a hint.
    pub fn show_in_rect(
        self: &Rc<Self>,
        quad: AnchorQuad,
        control_size: Size,
        host: Rc<dyn HostSurface<S>>,
        selected_index: Option<usize>,
    ) {
        {
            let mut panel = self.panel.borrow_mut();
            panel.set_base_width(self.base_width(control_size));
            panel.update_from_source();
            if panel.selected_index() != selected_index {
                tracing::debug!(
                    hint = ?selected_index,
                    source = ?panel.selected_index(),
                    "selection hint differs from source"
                );
            }
        }

        let delta = host.contents_to_window(Point::ZERO).to_vec2();
        self.anchor.set(Some(Anchor {
            quad: quad.translated(delta),
            control_size,
        }));
        self.frame.set(Rect::from_origin_size(Point::ZERO, control_size));
        self.open(host);
    }

    /// Place the popup with `host` and open it.
    ///
    /// Does nothing until [`Popup::show_in_rect`] has recorded an anchor.
    pub fn open(self: &Rc<Self>, host: Rc<dyn HostSurface<S>>) {
        *self.host.borrow_mut() = Some(Rc::clone(&host));
        let Some(anchor) = self.anchor.get() else {
            tracing::warn!("open without an anchor");
            return;
        };

        let height = anchor.control_size.height;
        let transform_offset = anchor.quad.transform_offset(height);
        if let Some(rect) =
            self.layout_and_calculate_rect(&*host, height, transform_offset, anchor.quad.p4)
        {
            host.place_floating_surface(self, rect, false);
            self.state.set(PopupState::Open);
            tracing::debug!(?rect, "popup opened");
        }

        let mut panel = self.panel.borrow_mut();
        if !panel.is_attached() {
            panel.attach();
        }
        // Scrolling needs an attached panel.
        panel.set_vertical_scroll_mode(ScrollbarMode::Auto);
        panel.scroll_to_reveal_selection();
        drop(panel);

        self.invalidate();
    }

    /// Re-place the popup under `target_control_rect` (document coordinates)
    /// after the anchor moved, for example on scroll.
    ///
    /// Returns the new screen rectangle, or `None` before the popup was shown.
    pub fn refresh(self: &Rc<Self>, target_control_rect: Rect) -> Option<Rect> {
        let (Some(host), Some(anchor)) = (self.host(), self.anchor.get()) else {
            tracing::warn!("refresh before show");
            return None;
        };
        {
            let mut panel = self.panel.borrow_mut();
            panel.set_base_width(self.base_width(anchor.control_size));
            panel.update_from_source();
        }

        let location = host.contents_to_window(target_control_rect.origin())
            + Vec2::new(0.0, target_control_rect.height());
        let rect = self.layout_and_calculate_rect(
            &*host,
            target_control_rect.height(),
            Size::ZERO,
            location,
        )?;

        let frame = self.frame.get();
        if frame.size() != rect.size() {
            self.frame.set(Rect::from_origin_size(frame.origin(), rect.size()));
        }
        self.invalidate();
        Some(rect)
    }

    /// Dismiss through the panel, restoring the selection from show time.
    ///
    /// Does nothing unless the popup is open.
    pub fn hide(self: &Rc<Self>) {
        if !self.is_open() {
            return;
        }
        let _guard = Rc::clone(self);
        let response = self.panel.borrow_mut().abandon();
        let _ = self.settle(response);
    }

    /// The popup was closed; tell the host once.
    pub fn notify_closed(self: &Rc<Self>) {
        if self.state.get() != PopupState::Open {
            return;
        }
        self.state.set(PopupState::Closed);
        tracing::debug!("popup closed");
        if let Some(host) = self.host() {
            host.notify_floating_surface_closed(self);
        }
    }

    fn settle(self: &Rc<Self>, response: Response) -> bool {
        match response {
            Response::Ignored => {}
            Response::Handled => self.invalidate(),
            Response::Dismissed => self.notify_closed(),
        }
        response.is_handled()
    }

    /// Handle a popup-space pointer event.
    pub fn handle_pointer(self: &Rc<Self>, event: &PointerEvent) -> bool {
        let _guard = Rc::clone(self);
        let local = self.router().route_pointer(event);
        let response = self.panel.borrow_mut().handle_pointer(&local);
        self.settle(response)
    }

    /// Handle a popup-space wheel event.
    pub fn handle_wheel(self: &Rc<Self>, event: &WheelEvent) -> bool {
        let _guard = Rc::clone(self);
        let local = self.router().route_wheel(event);
        let response = self.panel.borrow_mut().handle_wheel(&local);
        self.settle(response)
    }

    /// Touch input is not consumed.
    pub fn handle_touch(&self, _event: &TouchEvent) -> bool {
        false
    }

    /// Handle a popup-space gesture by decomposing it into pointer or wheel
    /// events.
    pub fn handle_gesture(self: &Rc<Self>, event: &GestureEvent) -> bool {
        let _guard = Rc::clone(self);
        match self.router().decompose_gesture(event) {
            GestureRoute::Tap { down, up } => {
                let _ = self.handle_pointer(&down);
                let _ = self.handle_pointer(&up);
                true
            }
            GestureRoute::Wheel(wheel) => {
                let _ = self.handle_wheel(&wheel);
                true
            }
            GestureRoute::Drop => false,
            GestureRoute::Unsupported => {
                debug_assert!(false, "unexpected gesture {:?}", event.kind);
                false
            }
        }
    }

    /// Handle a key press.
    pub fn handle_key(self: &Rc<Self>, event: &KeyEvent) -> bool {
        let _guard = Rc::clone(self);
        let response = self.panel.borrow_mut().handle_key(event);
        self.settle(response)
    }

    /// Whether the popup wants key presses for `event`'s key.
    pub fn is_interested_in_key(&self, event: &KeyEvent) -> bool {
        self.panel.borrow().is_interested_in_key(event.key)
    }
}

impl<S: ContentSource> Drop for Popup<S> {
    fn drop(&mut self) {
        let panel = self.panel.get_mut();
        if panel.is_attached() {
            panel.detach();
        }
    }
}
