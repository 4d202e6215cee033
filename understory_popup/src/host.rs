// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interfaces a popup needs from the embedding window system.
//!
//! ## Overview
//!
//! [`ScreenMetrics`] is the read-only geometry the
//! [placement engine](crate::placement) consults. [`HostSurface`] adds the
//! calls that put a popup on screen and report its closing.
//!
//! Hosts are shared with the popup through `Rc` and are called with `&self`;
//! implementations use interior mutability for any state they keep.

use alloc::rc::Rc;

use kurbo::{Point, Rect};

use crate::panel::ContentSource;
use crate::popup::Popup;

/// Screen and window geometry around a popup's anchor.
pub trait ScreenMetrics {
    /// Convert a rectangle in window coordinates to screen coordinates.
    fn rect_to_screen(&self, rect: Rect) -> Rect;

    /// The containing window, in screen coordinates.
    fn current_window_rect(&self) -> Rect;

    /// Usable area of the display showing `anchor_hint` (screen coordinates).
    fn current_screen_bounds(&self, anchor_hint: Rect) -> Rect;

    /// Convert a point in scrolled document coordinates to window coordinates.
    ///
    /// The default treats both spaces as the same.
    fn contents_to_window(&self, pt: Point) -> Point {
        pt
    }
}

/// The window system that shows a popup as a floating surface.
pub trait HostSurface<S: ContentSource>: ScreenMetrics {
    /// Create or move the floating surface for `popup` to `rect` (screen space).
    ///
    /// Popups pass `activate = false`: the surface must not take focus from the
    /// document that opened it.
    fn place_floating_surface(&self, popup: &Rc<Popup<S>>, rect: Rect, activate: bool);

    /// `popup` closed. Called once per open.
    ///
    /// The host may release its last reference to `popup` here.
    fn notify_floating_surface_closed(&self, popup: &Rc<Popup<S>>);
}
