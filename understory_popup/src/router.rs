// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event coordinate router.
//!
//! ## Overview
//!
//! The popup receives input in its own coordinate space; the list panel
//! expects input in its local space. [`EventRouter`] produces translated
//! copies of pointer and wheel events and decomposes gestures into the
//! pointer/wheel events the panel understands.
//!
//! ## Gestures
//!
//! - `Tap` becomes a pointer down immediately followed by a pointer up.
//! - `ScrollUpdate` (with or without propagation) becomes a wheel event with
//!   the gesture's delta and `delta / divisor` ticks.
//! - `TapDown`, `ScrollBegin`, and `ScrollEnd` are accepted and dropped.
//! - Other kinds never reach a popup; they trip a debug assertion.
//!
//! Touch events are not routed.

use kurbo::{Point, Vec2};

use crate::event::{
    GestureEvent, GestureKind, MouseButton, PointerEvent, PointerKind, WheelEvent,
    WheelGranularity,
};

/// Parent-to-child coordinate conversion.
///
/// Carries the child's origin inside its parent. [`Localizer::to_local`] and
/// [`Localizer::to_parent`] are inverses.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Localizer {
    origin: Vec2,
}

impl Localizer {
    /// A localizer for a child whose top-left sits at `origin` in parent space.
    pub fn new(origin: Point) -> Self {
        Self {
            origin: origin.to_vec2(),
        }
    }

    /// Child origin in parent space.
    pub fn origin(&self) -> Point {
        self.origin.to_point()
    }

    /// Parent-space point to child space.
    pub fn to_local(&self, pt: Point) -> Point {
        pt - self.origin
    }

    /// Child-space point to parent space.
    pub fn to_parent(&self, pt: Point) -> Point {
        pt + self.origin
    }
}

/// Result of decomposing a gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureRoute {
    /// Accepted, nothing to forward.
    Drop,
    /// A tap: deliver `down` then `up`, both in popup space.
    Tap {
        /// Synthesized button press.
        down: PointerEvent,
        /// Synthesized button release.
        up: PointerEvent,
    },
    /// A scroll step, in popup space.
    Wheel(WheelEvent),
    /// Not a gesture a popup handles.
    Unsupported,
}

/// Maps popup-space input to panel-local input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EventRouter {
    localizer: Localizer,
    wheel_tick_divisor: f64,
}

impl EventRouter {
    /// Create a router for a panel placed by `localizer`.
    pub fn new(localizer: Localizer, wheel_tick_divisor: f64) -> Self {
        Self {
            localizer,
            wheel_tick_divisor,
        }
    }

    /// The popup-to-panel conversion in use.
    pub fn localizer(&self) -> Localizer {
        self.localizer
    }

    /// Translate a popup-space pointer event into panel space.
    pub fn route_pointer(&self, event: &PointerEvent) -> PointerEvent {
        let local = event.translated(-self.localizer.origin);
        tracing::trace!(kind = ?event.kind, from = ?event.position, to = ?local.position, "route pointer");
        local
    }

    /// Translate a popup-space wheel event into panel space.
    pub fn route_wheel(&self, event: &WheelEvent) -> WheelEvent {
        let local = event.translated(-self.localizer.origin);
        tracing::trace!(from = ?event.position, to = ?local.position, delta = ?event.delta, "route wheel");
        local
    }

    /// Map a panel-space pointer event back into popup space.
    pub fn unroute_pointer(&self, event: &PointerEvent) -> PointerEvent {
        event.translated(self.localizer.origin)
    }

    /// Map a panel-space wheel event back into popup space.
    pub fn unroute_wheel(&self, event: &WheelEvent) -> WheelEvent {
        event.translated(self.localizer.origin)
    }

    /// Decompose a popup-space gesture into popup-space pointer or wheel events.
    pub fn decompose_gesture(&self, gesture: &GestureEvent) -> GestureRoute {
        match gesture.kind {
            GestureKind::Tap => {
                let pointer = |kind| PointerEvent {
                    kind,
                    position: gesture.position,
                    global_position: gesture.global_position,
                    button: MouseButton::Left,
                    modifiers: gesture.modifiers,
                    click_count: 1,
                    timestamp: gesture.timestamp,
                };
                GestureRoute::Tap {
                    down: pointer(PointerKind::Down),
                    up: pointer(PointerKind::Up),
                }
            }
            GestureKind::ScrollUpdate | GestureKind::ScrollUpdateWithoutPropagation => {
                GestureRoute::Wheel(WheelEvent {
                    position: gesture.position,
                    global_position: gesture.global_position,
                    delta: gesture.delta,
                    ticks: gesture.delta / self.wheel_tick_divisor,
                    granularity: WheelGranularity::Pixel,
                    modifiers: gesture.modifiers,
                    timestamp: gesture.timestamp,
                })
            }
            GestureKind::ScrollBegin | GestureKind::ScrollEnd | GestureKind::TapDown => {
                GestureRoute::Drop
            }
            GestureKind::FlingStart
            | GestureKind::LongPress
            | GestureKind::TwoFingerTap
            | GestureKind::PinchBegin
            | GestureKind::PinchUpdate
            | GestureKind::PinchEnd => GestureRoute::Unsupported,
        }
    }
}
