// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Popup: placement and input routing for anchored popup lists.
//!
//! ## Overview
//!
//! A popup list (the drop-down of a `<select>`-style control) floats over its
//! window, anchored below a control. This crate decides where it goes and how
//! big it may be, and routes input into the list it hosts.
//!
//! - [`placement`] aligns the popup under its anchor and keeps it on screen:
//!   it picks the alignment that clips less, opens upward when there is no
//!   room below, and shrinks the list when neither side fits.
//! - [`router`] translates popup-space input into the list's local space and
//!   decomposes gestures into pointer and wheel events.
//! - [`popup`] owns the lifecycle: show, re-place on anchor changes, dismiss,
//!   and tell the host exactly once that the popup closed.
//! - [`panel`] is the list itself: whole-row layout, selection, scroll, and
//!   keyboard navigation over a [`ContentSource`](crate::panel::ContentSource).
//!
//! The window system is reached through [`HostSurface`](crate::host::HostSurface),
//! which places the floating surface and supplies screen geometry.
//!
//! ## Coordinate spaces
//!
//! - Document: where the anchor control lives; may be scrolled.
//! - Window: document converted with
//!   [`contents_to_window`](crate::host::ScreenMetrics::contents_to_window).
//! - Screen: window converted with
//!   [`rect_to_screen`](crate::host::ScreenMetrics::rect_to_screen). All
//!   containment happens here.
//! - Popup and panel: the list sits one border width inside the popup frame.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::{Rect, Size};
//! use understory_popup::host::{HostSurface, ScreenMetrics};
//! use understory_popup::panel::ContentSource;
//! use understory_popup::popup::Popup;
//! use understory_popup::settings::PopupSettings;
//! use understory_popup::types::AnchorQuad;
//!
//! struct Fruit {
//!     selected: Option<usize>,
//! }
//!
//! impl ContentSource for Fruit {
//!     fn refresh_items_and_selection(&mut self) {}
//!     fn item_count(&self) -> usize { 3 }
//!     fn current_selection_index(&self) -> Option<usize> { self.selected }
//!     fn row_height(&self, _index: usize) -> f64 { 20.0 }
//!     fn item_width(&self, _index: usize) -> f64 { 60.0 }
//!     fn item_tooltip(&self, _index: usize) -> String { String::new() }
//!     fn value_changed(&mut self, index: usize) { self.selected = Some(index); }
//! }
//!
//! struct Window {
//!     placed: Cell<Option<Rect>>,
//! }
//!
//! impl ScreenMetrics for Window {
//!     fn rect_to_screen(&self, rect: Rect) -> Rect { rect }
//!     fn current_window_rect(&self) -> Rect { Rect::new(0.0, 0.0, 800.0, 600.0) }
//!     fn current_screen_bounds(&self, _hint: Rect) -> Rect { self.current_window_rect() }
//! }
//!
//! impl HostSurface<Fruit> for Window {
//!     fn place_floating_surface(&self, _popup: &Rc<Popup<Fruit>>, rect: Rect, _activate: bool) {
//!         self.placed.set(Some(rect));
//!     }
//!     fn notify_floating_surface_closed(&self, _popup: &Rc<Popup<Fruit>>) {}
//! }
//!
//! let window = Rc::new(Window { placed: Cell::new(None) });
//! let popup = Popup::new(Fruit { selected: Some(1) }, PopupSettings::default());
//! let anchor = Rect::new(40.0, 100.0, 160.0, 120.0);
//! popup.show_in_rect(AnchorQuad::from_rect(anchor), anchor.size(), window.clone(), Some(1));
//!
//! // Three 20px rows plus a 1px border, directly below the control.
//! assert_eq!(window.placed.get(), Some(Rect::new(40.0, 120.0, 160.0, 182.0)));
//! assert!(popup.is_open());
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo, `tracing`, and `thiserror`.
//! - `libm`: Kurbo's `no_std` float math.
//! - `serde`: serialization for [`PopupSettings`](crate::settings::PopupSettings)
//!   and the plain value types.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod damage;
pub mod event;
pub mod host;
pub mod panel;
pub mod placement;
pub mod popup;
pub mod router;
pub mod settings;
pub mod types;
