// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core value types: anchor geometry, writing direction, and popup state.
//!
//! ## Overview
//!
//! These types describe the inputs the [placement engine](crate::placement) reads
//! and the lifecycle state the [popup](crate::popup) tracks.
//! All geometry is expressed with Kurbo types in window coordinates unless noted.

use kurbo::{Point, Rect, Size, Vec2};

/// The four corners of the anchor control in window coordinates.
///
/// A quad rather than a rectangle so that transformed (rotated, skewed)
/// anchors keep their real corner positions.
///
/// Corner order follows the usual clockwise convention starting at the
/// top-left: `p1` top-left, `p2` top-right, `p3` bottom-right, `p4` bottom-left.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorQuad {
    /// Top-left corner.
    pub p1: Point,
    /// Top-right corner.
    pub p2: Point,
    /// Bottom-right corner.
    pub p3: Point,
    /// Bottom-left corner.
    pub p4: Point,
}

impl AnchorQuad {
    /// Create a quad from its four corners.
    pub const fn new(p1: Point, p2: Point, p3: Point, p4: Point) -> Self {
        Self { p1, p2, p3, p4 }
    }

    /// The quad covering an axis-aligned rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            p1: Point::new(rect.x0, rect.y0),
            p2: Point::new(rect.x1, rect.y0),
            p3: Point::new(rect.x1, rect.y1),
            p4: Point::new(rect.x0, rect.y1),
        }
    }

    /// Return a copy moved by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            p1: self.p1 + delta,
            p2: self.p2 + delta,
            p3: self.p3 + delta,
            p4: self.p4 + delta,
        }
    }

    /// Axis-aligned bounding box of the four corners.
    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(self.p1, self.p3)
            .union_pt(self.p2)
            .union_pt(self.p4)
    }

    /// Horizontal extent of the top edge (`p2.x - p1.x`).
    ///
    /// This is the width the popup right-aligns against in right-to-left layouts.
    pub fn width_along_top(&self) -> f64 {
        self.p2.x - self.p1.x
    }

    /// Vertical skew of the bottom edge (`p3.y - p4.y`).
    ///
    /// Zero for untransformed anchors.
    pub fn bottom_skew(&self) -> f64 {
        self.p3.y - self.p4.y
    }

    /// Offset between the untransformed and the actual bottom-left corner.
    ///
    /// `control_height` is the untransformed height of the anchor control.
    /// Both components are zero for an axis-aligned anchor of that height.
    pub fn transform_offset(&self, control_height: f64) -> Size {
        Size::new(
            self.p4.x - self.p1.x,
            self.p4.y - self.p1.y - control_height,
        )
    }
}

/// Text flow direction of the popup content.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WritingDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl WritingDirection {
    /// Returns true for [`WritingDirection::Rtl`].
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

/// Lifecycle state of a popup.
///
/// Transitions: `Closed → Open → Closed`. Leaving `Open` notifies the host
/// exactly once.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PopupState {
    /// Not shown, or dismissed.
    #[default]
    Closed,
    /// Placed on screen by the host.
    Open,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_from_rect_corners() {
        let q = AnchorQuad::from_rect(Rect::new(10.0, 20.0, 110.0, 40.0));
        assert_eq!(q.p1, Point::new(10.0, 20.0));
        assert_eq!(q.p2, Point::new(110.0, 20.0));
        assert_eq!(q.p3, Point::new(110.0, 40.0));
        assert_eq!(q.p4, Point::new(10.0, 40.0));
        assert_eq!(q.width_along_top(), 100.0);
        assert_eq!(q.bottom_skew(), 0.0);
        assert_eq!(q.bounding_box(), Rect::new(10.0, 20.0, 110.0, 40.0));
    }

    #[test]
    fn axis_aligned_quad_has_no_transform_offset() {
        let q = AnchorQuad::from_rect(Rect::new(0.0, 0.0, 80.0, 24.0));
        assert_eq!(q.transform_offset(24.0), Size::ZERO);
    }

    #[test]
    fn skewed_quad_reports_offsets() {
        // Bottom edge sheared 6px to the right and dropped 2px on the right side.
        let q = AnchorQuad::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(106.0, 22.0),
            Point::new(6.0, 20.0),
        );
        assert_eq!(q.transform_offset(20.0), Size::new(6.0, 0.0));
        assert_eq!(q.bottom_skew(), 2.0);
        assert_eq!(q.bounding_box(), Rect::new(0.0, 0.0, 106.0, 22.0));
    }

    #[test]
    fn translated_moves_every_corner() {
        let q = AnchorQuad::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0)).translated(Vec2::new(5.0, -3.0));
        assert_eq!(q.bounding_box(), Rect::new(5.0, -3.0, 15.0, 7.0));
    }

    #[test]
    fn writing_direction_default_is_ltr() {
        assert!(!WritingDirection::default().is_rtl());
        assert!(WritingDirection::Rtl.is_rtl());
    }
}
