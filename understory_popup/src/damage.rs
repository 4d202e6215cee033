// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Repaint requests accumulated by a popup.

use alloc::vec::Vec;

use kurbo::Rect;

/// Popup-space rectangles that need repainting.
///
/// Drained with [`Popup::take_damage`](crate::popup::Popup::take_damage).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Damage {
    /// Rectangles to repaint, in popup coordinates.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// True if nothing was invalidated.
    pub fn is_empty(&self) -> bool {
        self.dirty_rects.is_empty()
    }

    /// Record a rectangle; empty rectangles and rectangles already pending are
    /// ignored.
    pub fn add(&mut self, rect: Rect) {
        if rect.area() > 0.0 && !self.dirty_rects.contains(&rect) {
            self.dirty_rects.push(rect);
        }
    }

    /// Returns the union of all damage rects.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }
}
