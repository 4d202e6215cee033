// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where a popup lands for anchors around the screen.
//!
//! This example loads popup settings from RON, then shows a popup under
//! controls near each screen edge and prints the rectangle the host was asked
//! to place. Set `RUST_LOG=understory_popup=debug` to trace the containment
//! decisions.
//!
//! Run:
//! - `cargo run -p understory_demos --example popup_placement`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_popup::host::{HostSurface, ScreenMetrics};
use understory_popup::panel::ContentSource;
use understory_popup::popup::Popup;
use understory_popup::settings::PopupSettings;
use understory_popup::types::{AnchorQuad, WritingDirection};

const SETTINGS: &str = "(border_size: 1.0, default_max_height: 240.0, item_padding: 4.0)";

struct Menu {
    items: Vec<&'static str>,
    selected: Option<usize>,
    direction: WritingDirection,
}

impl ContentSource for Menu {
    fn refresh_items_and_selection(&mut self) {}
    fn item_count(&self) -> usize {
        self.items.len()
    }
    fn current_selection_index(&self) -> Option<usize> {
        self.selected
    }
    fn row_height(&self, _index: usize) -> f64 {
        18.0
    }
    fn item_width(&self, index: usize) -> f64 {
        // Roughly 7px per glyph.
        self.items[index].len() as f64 * 7.0
    }
    fn item_tooltip(&self, index: usize) -> String {
        self.items[index].to_string()
    }
    fn writing_direction_of_style(&self) -> WritingDirection {
        self.direction
    }
    fn value_changed(&mut self, index: usize) {
        self.selected = Some(index);
    }
}

/// A single 1280x800 display with the window filling it.
struct Display {
    placed: RefCell<Vec<Rect>>,
}

impl ScreenMetrics for Display {
    fn rect_to_screen(&self, rect: Rect) -> Rect {
        rect
    }
    fn current_window_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 800.0)
    }
    fn current_screen_bounds(&self, _anchor_hint: Rect) -> Rect {
        self.current_window_rect()
    }
}

impl HostSurface<Menu> for Display {
    fn place_floating_surface(&self, _popup: &Rc<Popup<Menu>>, rect: Rect, _activate: bool) {
        self.placed.borrow_mut().push(rect);
    }
    fn notify_floating_surface_closed(&self, _popup: &Rc<Popup<Menu>>) {}
}

fn menu(direction: WritingDirection) -> Menu {
    Menu {
        items: (0..30)
            .map(|i| if i % 7 == 0 { "A considerably longer entry" } else { "Entry" })
            .collect(),
        selected: Some(3),
        direction,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings: PopupSettings = match ron::from_str(SETTINGS) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("bad settings: {err}");
            return;
        }
    };
    if let Err(err) = settings.validate() {
        eprintln!("bad settings: {err}");
        return;
    }
    tracing::info!(?settings, "loaded settings");

    let cases = [
        ("top left", Rect::new(20.0, 20.0, 160.0, 42.0), WritingDirection::Ltr),
        ("right edge", Rect::new(1180.0, 300.0, 1270.0, 322.0), WritingDirection::Ltr),
        ("bottom", Rect::new(400.0, 760.0, 560.0, 782.0), WritingDirection::Ltr),
        ("middle, short both ways", Rect::new(400.0, 380.0, 560.0, 402.0), WritingDirection::Ltr),
        ("rtl near left edge", Rect::new(10.0, 200.0, 90.0, 222.0), WritingDirection::Rtl),
    ];

    for (label, anchor, direction) in cases {
        let display = Rc::new(Display {
            placed: RefCell::new(Vec::new()),
        });
        let popup = Popup::new(menu(direction), settings);
        popup.show_in_rect(
            AnchorQuad::from_rect(anchor),
            Size::new(anchor.width(), anchor.height()),
            display.clone(),
            Some(3),
        );
        let placed = display.placed.borrow();
        println!("== {label} ==");
        println!("  anchor: {anchor:?}");
        println!("  popup:  {:?}", placed.last());
        println!(
            "  list:   {:?}, scrolled {}",
            popup.panel().frame(),
            popup.panel().scroll_offset()
        );
        popup.hide();
    }
}
