// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement engine: where a popup goes on screen and how big it may be.
//!
//! ## Overview
//!
//! [`compute_placement`] lays out the content at its preferred size, aligns the
//! popup under its anchor, converts the result to screen space, and then runs
//! the containment pass ([`contain`]):
//!
//! 1. Horizontal. Only when the window lies entirely within the screen
//!    horizontally. The opposite alignment is tried and kept if it clips
//!    strictly fewer pixels; any remaining overflow is clamped to the screen
//!    edge and the content is narrowed to match.
//! 2. Vertical. If the popup runs past the bottom of the screen it opens
//!    upward when there is room. Otherwise the content is limited to the
//!    larger of the space above and below the anchor, and the popup opens on
//!    that side.
//!
//! This is a layout algorithm: the content's limits and layout are changed as
//! a side effect. Limits are reset at the start of every computation.

use kurbo::{Point, Rect, Size, Vec2};

use crate::host::ScreenMetrics;
use crate::panel::PopupContent;
use crate::settings::PopupSettings;
use crate::types::{AnchorQuad, WritingDirection};

/// Inputs to [`compute_placement`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// Anchor corners in window coordinates.
    pub anchor: AnchorQuad,
    /// Untransformed height of the anchor control.
    pub control_height: f64,
    /// See [`AnchorQuad::transform_offset`].
    pub transform_offset: Size,
    /// Window-space point the popup's top-left starts at (normally the
    /// anchor's bottom-left corner).
    pub initial_corner: Point,
    /// Text direction of the content.
    pub direction: WritingDirection,
}

/// Which horizontal alignment the containment pass settled on.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Alignment {
    /// Left edges aligned (LTR) or right edges aligned (RTL).
    #[default]
    Natural,
    /// The opposite of [`Alignment::Natural`].
    Inverted,
}

/// Which side of the anchor the popup opens on.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Opening {
    /// Below the anchor.
    #[default]
    Below,
    /// Above the anchor.
    Above,
}

/// Result of a placement pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Popup rectangle in screen coordinates, border included.
    pub rect: Rect,
    /// Border inset on each side.
    pub border: f64,
    /// Horizontal alignment chosen.
    pub alignment: Alignment,
    /// Side the popup opens on.
    pub opening: Opening,
    /// The content's height limit was lowered; the owner must re-fit its frame
    /// to the content's new size.
    pub needs_refit: bool,
}

/// Screen and window rectangles for a containment pass, in screen coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    /// Usable display area.
    pub screen: Rect,
    /// Containing window.
    pub window: Rect,
}

/// Offsets derived from the anchor, shared between alignment and containment.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AnchorOffsets {
    /// Shift that right-aligns the popup with the anchor; negative when the
    /// popup is wider than the anchor.
    pub rtl_offset: f64,
    /// Vertical skew of the anchor's bottom edge.
    pub vertical_offset: f64,
    /// Untransformed height of the anchor control.
    pub control_height: f64,
    /// See [`AnchorQuad::transform_offset`].
    pub transform_offset: Size,
}

/// Pixels of `rect` cut off by the left and right edges of `screen`.
pub fn horizontal_cutoff(rect: Rect, screen: Rect) -> f64 {
    (screen.x0 - rect.x0).max(0.0) + (rect.x1 - screen.x1).max(0.0)
}

/// Lay out `content` and compute where its popup goes.
///
/// `metrics` converts window coordinates to screen coordinates and supplies
/// the screen and window bounds.
pub fn compute_placement<P, M>(
    content: &mut P,
    metrics: &M,
    request: &PlacementRequest,
    settings: &PopupSettings,
) -> Placement
where
    P: PopupContent + ?Sized,
    M: ScreenMetrics + ?Sized,
{
    content.set_max_height(settings.default_max_height);
    content.set_max_width(f64::INFINITY);
    content.layout();

    let rtl = request.direction.is_rtl();
    let preferred = content.size();
    let target = Size::new(
        preferred.width + settings.border_pair(),
        preferred.height + settings.border_pair(),
    );

    let offsets = AnchorOffsets {
        rtl_offset: request.anchor.width_along_top() - target.width,
        vertical_offset: request.anchor.bottom_skew(),
        control_height: request.control_height,
        transform_offset: request.transform_offset,
    };
    let start = Vec2::new(
        if rtl { offsets.rtl_offset } else { 0.0 },
        if rtl { offsets.vertical_offset } else { 0.0 },
    );

    let window_rect = Rect::from_origin_size(request.initial_corner + start, target);
    let rect = metrics.rect_to_screen(window_rect);
    let bounds = Bounds {
        screen: metrics
            .current_screen_bounds(metrics.rect_to_screen(request.anchor.bounding_box())),
        window: metrics.current_window_rect(),
    };
    tracing::debug!(?rect, screen = ?bounds.screen, rtl, "placement start");

    contain(rect, &bounds, request.direction, &offsets, content, settings)
}

/// Containment pass over a screen-space `rect`.
///
/// May narrow or shorten `content`. See the [module docs](self).
pub fn contain<P>(
    mut rect: Rect,
    bounds: &Bounds,
    direction: WritingDirection,
    offsets: &AnchorOffsets,
    content: &mut P,
    settings: &PopupSettings,
) -> Placement
where
    P: PopupContent + ?Sized,
{
    let screen = bounds.screen;
    let window = bounds.window;
    let border_pair = settings.border_pair();
    let mut alignment = Alignment::Natural;
    let mut opening = Opening::Below;
    let mut needs_refit = false;

    let window_fits = window.x0 >= screen.x0 && window.x1 <= screen.x1;
    if window_fits && (rect.x0 < screen.x0 || rect.x1 > screen.x1) {
        let flip = if direction.is_rtl() { -1.0 } else { 1.0 };
        let inverse = rect
            + Vec2::new(
                flip * offsets.rtl_offset,
                flip * offsets.vertical_offset,
            );
        let original_cutoff = horizontal_cutoff(rect, screen);
        let inverse_cutoff = horizontal_cutoff(inverse, screen);
        if inverse_cutoff < original_cutoff {
            tracing::debug!(original_cutoff, inverse_cutoff, "invert alignment");
            rect = inverse;
            alignment = Alignment::Inverted;
        }

        // The rect may lie entirely past the edge; its width then comes from
        // the narrowed content, never from the clamped edges.
        if rect.x0 < screen.x0 {
            rect.x0 = screen.x0;
            content.set_max_width_and_layout((rect.width() - border_pair).max(0.0));
            rect.x1 = rect.x0 + content.size().width + border_pair;
            tracing::debug!(width = rect.width(), "clamp to left screen edge");
        } else if rect.x1 > screen.x1 {
            rect.x1 = screen.x1;
            content.set_max_width_and_layout((rect.width() - border_pair).max(0.0));
            rect.x0 = rect.x1 - (content.size().width + border_pair);
            tracing::debug!(width = rect.width(), "clamp to right screen edge");
        }
    }

    if rect.y1 > screen.y1 {
        let height = rect.height();
        let tf = offsets.transform_offset;
        if rect.y0 - height - offsets.control_height - tf.height > 0.0 {
            tracing::debug!(height, "open upward");
            rect = rect - Vec2::new(tf.width, height + offsets.control_height + tf.height);
            opening = Opening::Above;
        } else {
            let space_above = rect.y0 - offsets.control_height + tf.height;
            let space_below = screen.y1 - rect.y0;
            content.set_max_height(space_above.max(space_below));
            content.layout();
            needs_refit = true;
            rect.y1 = rect.y0 + content.popup_content_height() + border_pair;
            tracing::debug!(
                space_above,
                space_below,
                height = rect.height(),
                "shrink to available space"
            );
            if space_above > space_below {
                rect = rect
                    - Vec2::new(
                        tf.width,
                        rect.height() + offsets.control_height + tf.height,
                    );
                opening = Opening::Above;
            }
        }
    }

    Placement {
        rect,
        border: settings.border_size,
        alignment,
        opening,
        needs_refit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::ListPanel;
    use crate::panel::tests::Rows;

    /// Window coordinates are screen coordinates.
    struct Screen {
        screen: Rect,
        window: Rect,
    }

    impl Screen {
        fn new(screen: Rect) -> Self {
            Self {
                screen,
                window: screen,
            }
        }
    }

    impl ScreenMetrics for Screen {
        fn rect_to_screen(&self, rect: Rect) -> Rect {
            rect
        }
        fn current_window_rect(&self) -> Rect {
            self.window
        }
        fn current_screen_bounds(&self, _anchor_hint: Rect) -> Rect {
            self.screen
        }
    }

    /// Content with a fixed preferred size, clipped by its limits.
    struct Fixed {
        preferred: Size,
        max: Size,
        size: Size,
        layouts: usize,
    }

    impl Fixed {
        fn new(width: f64, height: f64) -> Self {
            Self {
                preferred: Size::new(width, height),
                // Stale limits from an earlier pass.
                max: Size::new(1.0, 1.0),
                size: Size::ZERO,
                layouts: 0,
            }
        }
    }

    impl PopupContent for Fixed {
        fn size(&self) -> Size {
            self.size
        }
        fn set_max_width(&mut self, width: f64) {
            self.max.width = width;
        }
        fn set_max_height(&mut self, height: f64) {
            self.max.height = height;
        }
        fn layout(&mut self) {
            self.layouts += 1;
            self.size = Size::new(
                self.preferred.width.min(self.max.width),
                self.preferred.height.min(self.max.height),
            );
        }
        fn popup_content_height(&self) -> f64 {
            self.size.height
        }
    }

    fn request(anchor: Rect, direction: WritingDirection) -> PlacementRequest {
        let quad = AnchorQuad::from_rect(anchor);
        PlacementRequest {
            anchor: quad,
            control_height: anchor.height(),
            transform_offset: quad.transform_offset(anchor.height()),
            initial_corner: quad.p4,
            direction,
        }
    }

    #[test]
    fn fits_below_without_adjustment() {
        let screen = Screen::new(Rect::new(0.0, 0.0, 1024.0, 768.0));
        let mut content = Fixed::new(198.0, 100.0);
        let req = request(Rect::new(100.0, 100.0, 300.0, 120.0), WritingDirection::Ltr);
        let p = compute_placement(&mut content, &screen, &req, &PopupSettings::default());
        assert_eq!(p.rect, Rect::new(100.0, 120.0, 300.0, 222.0));
        assert_eq!(p.border, 1.0);
        assert_eq!(p.alignment, Alignment::Natural);
        assert_eq!(p.opening, Opening::Below);
        assert!(!p.needs_refit);
        // Limits were reset, not inherited.
        assert_eq!(content.max, Size::new(f64::INFINITY, 500.0));
    }

    #[test]
    fn flips_upward_when_bottom_overflows() {
        let screen = Screen::new(Rect::new(0.0, 0.0, 1024.0, 600.0));
        let mut content = Fixed::new(200.0, 300.0);
        let req = request(Rect::new(100.0, 500.0, 300.0, 520.0), WritingDirection::Ltr);
        let p = compute_placement(&mut content, &screen, &req, &PopupSettings::default());
        assert_eq!(p.opening, Opening::Above);
        assert_eq!(p.rect.height(), 302.0);
        // Bottom of the popup meets the top of the anchor.
        assert_eq!(p.rect, Rect::new(100.0, 198.0, 302.0, 500.0));
        assert!(!p.needs_refit);
    }

    #[test]
    fn rtl_right_aligns_with_anchor() {
        let screen = Screen::new(Rect::new(0.0, 0.0, 1024.0, 768.0));
        let mut content = Fixed::new(298.0, 50.0);
        let req = request(Rect::new(400.0, 100.0, 600.0, 120.0), WritingDirection::Rtl);
        let p = compute_placement(&mut content, &screen, &req, &PopupSettings::default());
        assert_eq!(p.rect, Rect::new(300.0, 120.0, 600.0, 172.0));
    }

    #[test]
    fn rtl_inverts_when_that_clips_less_then_clamps() {
        // The RTL alignment shifts the popup 150px left of the anchor and clips
        // 40px at the left edge; the inverted one clips 10px at the right.
        let screen = Screen::new(Rect::new(0.0, 0.0, 1000.0, 800.0));
        let mut content = Fixed::new(898.0, 100.0);
        let req = request(Rect::new(110.0, 20.0, 860.0, 40.0), WritingDirection::Rtl);
        let p = compute_placement(&mut content, &screen, &req, &PopupSettings::default());
        assert_eq!(p.alignment, Alignment::Inverted);
        assert_eq!(p.rect, Rect::new(110.0, 40.0, 1000.0, 142.0));
        assert_eq!(content.max.width, 888.0);
        assert_eq!(content.size.width, 888.0);
    }

    #[test]
    fn equal_cutoff_keeps_natural_alignment() {
        let screen = Screen::new(Rect::new(0.0, 0.0, 1000.0, 800.0));
        let mut content = Fixed::new(98.0, 50.0);
        // Natural clips 20px on the left; inverted would clip 20px on the right.
        let req = request(Rect::new(-20.0, 0.0, 1020.0, 20.0), WritingDirection::Ltr);
        let p = compute_placement(&mut content, &screen, &req, &PopupSettings::default());
        assert_eq!(p.alignment, Alignment::Natural);
        assert_eq!(p.rect, Rect::new(0.0, 20.0, 80.0, 72.0));
        assert_eq!(content.size.width, 78.0);
    }

    #[test]
    fn ltr_inversion_minimizes_cutoff() {
        let screen = Screen::new(Rect::new(0.0, 0.0, 1000.0, 800.0));
        let mut content = Fixed::new(298.0, 50.0);
        // Anchor hugs the right edge; natural placement clips 100px.
        let req = request(Rect::new(800.0, 0.0, 1000.0, 20.0), WritingDirection::Ltr);
        let p = compute_placement(&mut content, &screen, &req, &PopupSettings::default());
        assert_eq!(p.alignment, Alignment::Inverted);
        assert_eq!(p.rect, Rect::new(700.0, 20.0, 1000.0, 72.0));
        assert_eq!(content.size.width, 298.0);
    }

    #[test]
    fn straddling_window_skips_horizontal_containment() {
        let mut screen = Screen::new(Rect::new(0.0, 0.0, 1000.0, 800.0));
        screen.window = Rect::new(-200.0, 0.0, 900.0, 800.0);
        let mut content = Fixed::new(298.0, 50.0);
        let req = request(Rect::new(800.0, 0.0, 1000.0, 20.0), WritingDirection::Ltr);
        let p = compute_placement(&mut content, &screen, &req, &PopupSettings::default());
        assert_eq!(p.alignment, Alignment::Natural);
        assert_eq!(p.rect, Rect::new(800.0, 20.0, 1100.0, 72.0));
    }

    #[test]
    fn shrinks_below_when_below_is_larger() {
        let screen = Screen::new(Rect::new(0.0, 0.0, 1024.0, 600.0));
        let mut panel = ListPanel::new(Rows::uniform(40, 20.0, 100.0), PopupSettings::default());
        panel.update_from_source();
        let req = request(Rect::new(100.0, 280.0, 300.0, 300.0), WritingDirection::Ltr);
        let p = compute_placement(&mut panel, &screen, &req, &PopupSettings::default());
        assert!(p.needs_refit);
        assert_eq!(p.opening, Opening::Below);
        assert_eq!(panel.max_height(), 300.0);
        assert!(panel.popup_content_height() <= 300.0);
        assert_eq!(p.rect.y0, 300.0);
        assert_eq!(p.rect.height(), panel.popup_content_height() + 2.0);
    }

    #[test]
    fn shrinks_above_when_above_is_larger() {
        let screen = Screen::new(Rect::new(0.0, 0.0, 1024.0, 600.0));
        let mut panel = ListPanel::new(Rows::uniform(40, 20.0, 100.0), PopupSettings::default());
        panel.update_from_source();
        let req = request(Rect::new(100.0, 480.0, 300.0, 500.0), WritingDirection::Ltr);
        let p = compute_placement(&mut panel, &screen, &req, &PopupSettings::default());
        assert!(p.needs_refit);
        assert_eq!(p.opening, Opening::Above);
        assert_eq!(panel.popup_content_height(), 480.0);
        assert_eq!(p.rect.y1, 480.0);
        assert_eq!(p.rect.height(), 482.0);
    }

    #[test]
    fn height_never_exceeds_available_space() {
        let screen = Screen::new(Rect::new(0.0, 0.0, 800.0, 700.0));
        for anchor_top in [0.0, 90.0, 250.0, 333.0, 420.0, 560.0, 680.0] {
            let mut panel =
                ListPanel::new(Rows::uniform(60, 17.0, 120.0), PopupSettings::default());
            panel.update_from_source();
            let anchor = Rect::new(50.0, anchor_top, 250.0, anchor_top + 20.0);
            let req = request(anchor, WritingDirection::Ltr);
            let p = compute_placement(&mut panel, &screen, &req, &PopupSettings::default());
            let above = anchor.y1 - 20.0;
            let below = 700.0 - anchor.y1;
            let content = panel.popup_content_height();
            assert!(content <= 500.0, "over default cap at {anchor_top}");
            if p.needs_refit {
                assert!(
                    content <= above.max(below),
                    "over available space at {anchor_top}"
                );
            }
        }
    }

    #[test]
    fn anchor_past_either_edge_clamps_to_border_width() {
        let screen = Screen::new(Rect::new(0.0, 0.0, 1000.0, 800.0));
        let settings = PopupSettings::default();

        let mut content = Fixed::new(98.0, 50.0);
        let req = request(Rect::new(-500.0, 100.0, -400.0, 120.0), WritingDirection::Ltr);
        let p = compute_placement(&mut content, &screen, &req, &settings);
        assert_eq!(p.rect, Rect::new(0.0, 120.0, 2.0, 172.0));
        assert_eq!(p.rect.width(), content.size.width + 2.0);

        let mut content = Fixed::new(98.0, 50.0);
        let req = request(Rect::new(1400.0, 100.0, 1500.0, 120.0), WritingDirection::Ltr);
        let p = compute_placement(&mut content, &screen, &req, &settings);
        assert_eq!(p.rect, Rect::new(998.0, 120.0, 1000.0, 172.0));
        assert_eq!(p.rect.width(), content.size.width + 2.0);
    }

    fn skewed(
        x0: f64,
        x1: f64,
        y0: f64,
        skew: f64,
        direction: WritingDirection,
    ) -> PlacementRequest {
        // Bottom-right corner sits `skew` below bottom-left.
        let quad = AnchorQuad::new(
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y0 + 20.0 + skew),
            Point::new(x0, y0 + 20.0),
        );
        PlacementRequest {
            anchor: quad,
            control_height: 20.0,
            transform_offset: quad.transform_offset(20.0),
            initial_corner: quad.p4,
            direction,
        }
    }

    #[test]
    fn rtl_start_includes_bottom_skew() {
        let screen = Screen::new(Rect::new(0.0, 0.0, 1024.0, 768.0));
        let mut content = Fixed::new(298.0, 50.0);
        let req = skewed(400.0, 600.0, 100.0, 4.0, WritingDirection::Rtl);
        let p = compute_placement(&mut content, &screen, &req, &PopupSettings::default());
        assert_eq!(p.alignment, Alignment::Natural);
        assert_eq!(p.rect, Rect::new(300.0, 124.0, 600.0, 176.0));
    }

    #[test]
    fn rtl_inversion_drops_bottom_skew() {
        let screen = Screen::new(Rect::new(0.0, 0.0, 1024.0, 768.0));
        let mut content = Fixed::new(298.0, 50.0);
        // Right-aligned start clips 50px at the left edge.
        let req = skewed(50.0, 250.0, 100.0, 4.0, WritingDirection::Rtl);
        let p = compute_placement(&mut content, &screen, &req, &PopupSettings::default());
        assert_eq!(p.alignment, Alignment::Inverted);
        assert_eq!(p.rect, Rect::new(50.0, 120.0, 350.0, 172.0));
    }

    #[test]
    fn ltr_inversion_adds_bottom_skew() {
        let screen = Screen::new(Rect::new(0.0, 0.0, 1000.0, 800.0));
        let mut content = Fixed::new(298.0, 50.0);
        let req = skewed(800.0, 1000.0, 0.0, 4.0, WritingDirection::Ltr);
        let p = compute_placement(&mut content, &screen, &req, &PopupSettings::default());
        assert_eq!(p.alignment, Alignment::Inverted);
        assert_eq!(p.rect, Rect::new(700.0, 24.0, 1000.0, 76.0));
    }

    #[test]
    fn cutoff_counts_both_edges() {
        let screen = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(horizontal_cutoff(Rect::new(10.0, 0.0, 90.0, 1.0), screen), 0.0);
        assert_eq!(horizontal_cutoff(Rect::new(-5.0, 0.0, 90.0, 1.0), screen), 5.0);
        assert_eq!(horizontal_cutoff(Rect::new(-5.0, 0.0, 107.0, 1.0), screen), 12.0);
    }

    #[test]
    fn transformed_anchor_shifts_upward_flip() {
        let screen = Screen::new(Rect::new(0.0, 0.0, 1024.0, 600.0));
        let mut content = Fixed::new(98.0, 200.0);
        let quad = AnchorQuad::new(
            Point::new(100.0, 480.0),
            Point::new(200.0, 480.0),
            Point::new(206.0, 500.0),
            Point::new(106.0, 500.0),
        );
        let req = PlacementRequest {
            anchor: quad,
            control_height: 20.0,
            transform_offset: quad.transform_offset(20.0),
            initial_corner: quad.p4,
            direction: WritingDirection::Ltr,
        };
        let p = compute_placement(&mut content, &screen, &req, &PopupSettings::default());
        assert_eq!(p.opening, Opening::Above);
        assert_eq!(p.rect, Rect::new(100.0, 278.0, 200.0, 480.0));
    }
}
