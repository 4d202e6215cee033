// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input event values.
//!
//! ## Overview
//!
//! Events are plain values. Positioned events expose `translated`, which
//! returns a moved copy; nothing in this crate rewrites an event in place.
//! `position` is in the coordinate space of whoever receives the event,
//! `global_position` is in screen space and is never translated.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

bitflags::bitflags! {
    /// Keyboard modifiers held while an event was generated.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows.
        const META  = 0b0000_1000;
    }
}

/// Mouse button associated with a pointer event.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    /// No button (plain motion).
    #[default]
    None,
    /// Primary button.
    Left,
    /// Middle button / wheel press.
    Middle,
    /// Secondary button.
    Right,
}

/// Kind of pointer transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerKind {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
}

/// A mouse-style pointer event.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    /// Down, move, or up.
    pub kind: PointerKind,
    /// Position in the receiver's coordinate space.
    pub position: Point,
    /// Position in screen space.
    pub global_position: Point,
    /// Button that changed state, or [`MouseButton::None`] for motion.
    pub button: MouseButton,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Consecutive click count.
    pub click_count: u8,
    /// Timestamp in seconds.
    pub timestamp: f64,
}

impl PointerEvent {
    /// A primary-button event of `kind` at `position` with no modifiers.
    pub fn new(kind: PointerKind, position: Point) -> Self {
        let button = match kind {
            PointerKind::Move => MouseButton::None,
            PointerKind::Down | PointerKind::Up => MouseButton::Left,
        };
        Self {
            kind,
            position,
            global_position: position,
            button,
            modifiers: Modifiers::empty(),
            click_count: 1,
            timestamp: 0.0,
        }
    }

    /// Return a copy whose `position` is moved by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            position: self.position + delta,
            ..*self
        }
    }
}

/// Unit a wheel delta is expressed in.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WheelGranularity {
    /// Delta is in pixels.
    #[default]
    Pixel,
    /// Delta is in pages.
    Page,
}

/// A wheel or scroll event.
///
/// Positive `delta.y` scrolls content toward its start (wheel rolled away
/// from the user).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelEvent {
    /// Position in the receiver's coordinate space.
    pub position: Point,
    /// Position in screen space.
    pub global_position: Point,
    /// Scroll delta in `granularity` units.
    pub delta: Vec2,
    /// Delta expressed in wheel ticks.
    pub ticks: Vec2,
    /// Unit of `delta`.
    pub granularity: WheelGranularity,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Timestamp in seconds.
    pub timestamp: f64,
}

impl WheelEvent {
    /// A pixel-granularity wheel event with no modifiers.
    pub fn new(position: Point, delta: Vec2) -> Self {
        Self {
            position,
            global_position: position,
            delta,
            ticks: Vec2::ZERO,
            granularity: WheelGranularity::Pixel,
            modifiers: Modifiers::empty(),
            timestamp: 0.0,
        }
    }

    /// Return a copy whose `position` is moved by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            position: self.position + delta,
            ..*self
        }
    }
}

/// Kind of high-level gesture.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureKind {
    /// Finger went down; a tap may follow.
    TapDown,
    /// Completed tap.
    Tap,
    /// Scroll started.
    ScrollBegin,
    /// Scroll moved.
    ScrollUpdate,
    /// Scroll moved, without propagating to enclosing scrollers.
    ScrollUpdateWithoutPropagation,
    /// Scroll ended.
    ScrollEnd,
    /// Fling started.
    FlingStart,
    /// Long press.
    LongPress,
    /// Two-finger tap.
    TwoFingerTap,
    /// Pinch started.
    PinchBegin,
    /// Pinch changed.
    PinchUpdate,
    /// Pinch ended.
    PinchEnd,
}

/// A high-level gesture event.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureEvent {
    /// Gesture kind.
    pub kind: GestureKind,
    /// Position in the receiver's coordinate space.
    pub position: Point,
    /// Position in screen space.
    pub global_position: Point,
    /// Raw scroll delta for scroll updates.
    pub delta: Vec2,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Timestamp in seconds.
    pub timestamp: f64,
}

impl GestureEvent {
    /// A gesture of `kind` at `position` with no delta or modifiers.
    pub fn new(kind: GestureKind, position: Point) -> Self {
        Self {
            kind,
            position,
            global_position: position,
            delta: Vec2::ZERO,
            modifiers: Modifiers::empty(),
            timestamp: 0.0,
        }
    }

    /// Set the scroll delta.
    #[must_use]
    pub fn with_delta(mut self, delta: Vec2) -> Self {
        self.delta = delta;
        self
    }
}

/// A single touch contact.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchPoint {
    /// Contact identifier.
    pub id: u32,
    /// Position in the receiver's coordinate space.
    pub position: Point,
}

/// A raw touch event. Popups do not consume these.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchEvent {
    /// Active contacts.
    pub points: Vec<TouchPoint>,
    /// Timestamp in seconds.
    pub timestamp: f64,
}

/// Navigation keys understood by the list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Any other key, by platform key code.
    Other(u32),
}

/// A key press.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyEvent {
    /// Key pressed.
    pub key: Key,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_translation_leaves_other_fields() {
        let ev = PointerEvent {
            kind: PointerKind::Up,
            position: Point::new(10.0, 10.0),
            global_position: Point::new(510.0, 310.0),
            button: MouseButton::Right,
            modifiers: Modifiers::SHIFT | Modifiers::META,
            click_count: 2,
            timestamp: 4.5,
        };
        let moved = ev.translated(Vec2::new(-1.0, -1.0));
        assert_eq!(moved.position, Point::new(9.0, 9.0));
        assert_eq!(moved.global_position, ev.global_position);
        assert_eq!(moved.button, MouseButton::Right);
        assert_eq!(moved.modifiers, Modifiers::SHIFT | Modifiers::META);
        assert_eq!(moved.click_count, 2);
        assert_eq!(moved.timestamp, 4.5);
        // The source value is untouched.
        assert_eq!(ev.position, Point::new(10.0, 10.0));
    }

    #[test]
    fn wheel_translation_keeps_delta() {
        let ev = WheelEvent::new(Point::new(3.0, 4.0), Vec2::new(0.0, -120.0));
        let moved = ev.translated(Vec2::new(2.0, 2.0));
        assert_eq!(moved.position, Point::new(5.0, 6.0));
        assert_eq!(moved.delta, Vec2::new(0.0, -120.0));
        assert_eq!(moved.granularity, WheelGranularity::Pixel);
    }

    #[test]
    fn pointer_new_picks_button_from_kind() {
        assert_eq!(
            PointerEvent::new(PointerKind::Move, Point::ZERO).button,
            MouseButton::None
        );
        assert_eq!(
            PointerEvent::new(PointerKind::Down, Point::ZERO).button,
            MouseButton::Left
        );
    }
}
