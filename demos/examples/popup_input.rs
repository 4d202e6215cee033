// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving an open popup with pointer, gesture, and key input.
//!
//! Input arrives in popup coordinates. The popup routes it one border width
//! inward to the list, which highlights, scrolls, and finally accepts a row.
//! The host releases the popup when told it closed.
//!
//! Run:
//! - `cargo run -p understory_demos --example popup_input`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Point, Rect, Size, Vec2};
use tracing_subscriber::EnvFilter;
use understory_popup::event::{GestureEvent, GestureKind, Key, KeyEvent, PointerEvent, PointerKind};
use understory_popup::host::{HostSurface, ScreenMetrics};
use understory_popup::panel::ContentSource;
use understory_popup::popup::Popup;
use understory_popup::settings::PopupSettings;
use understory_popup::types::AnchorQuad;

struct Colors {
    names: Vec<String>,
    selected: Option<usize>,
}

impl ContentSource for Colors {
    fn refresh_items_and_selection(&mut self) {}
    fn item_count(&self) -> usize {
        self.names.len()
    }
    fn current_selection_index(&self) -> Option<usize> {
        self.selected
    }
    fn row_height(&self, _index: usize) -> f64 {
        20.0
    }
    fn item_width(&self, _index: usize) -> f64 {
        80.0
    }
    fn item_tooltip(&self, index: usize) -> String {
        format!("Pick {}", self.names[index])
    }
    fn selection_changed(&mut self, index: Option<usize>) {
        println!("  highlight -> {index:?}");
    }
    fn value_changed(&mut self, index: usize) {
        println!("  chose {}", self.names[index]);
        self.selected = Some(index);
    }
    fn popup_did_hide(&mut self) {
        println!("  list hidden");
    }
}

struct Window {
    open: RefCell<Option<Rc<Popup<Colors>>>>,
    closes: Cell<u32>,
}

impl ScreenMetrics for Window {
    fn rect_to_screen(&self, rect: Rect) -> Rect {
        // The window sits at (100, 50) on screen.
        rect + Vec2::new(100.0, 50.0)
    }
    fn current_window_rect(&self) -> Rect {
        Rect::new(100.0, 50.0, 900.0, 650.0)
    }
    fn current_screen_bounds(&self, _anchor_hint: Rect) -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 800.0)
    }
}

impl HostSurface<Colors> for Window {
    fn place_floating_surface(&self, popup: &Rc<Popup<Colors>>, rect: Rect, activate: bool) {
        println!("  place at {rect:?} (activate: {activate})");
        *self.open.borrow_mut() = Some(Rc::clone(popup));
    }
    fn notify_floating_surface_closed(&self, _popup: &Rc<Popup<Colors>>) {
        self.closes.set(self.closes.get() + 1);
        self.open.borrow_mut().take();
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let names = [
        "red", "orange", "yellow", "green", "blue", "indigo", "violet", "black", "white",
    ];
    let colors = Colors {
        names: names.iter().map(|s| s.to_string()).collect(),
        selected: Some(0),
    };
    let settings = PopupSettings {
        default_max_height: 100.0,
        ..PopupSettings::default()
    };

    let window = Rc::new(Window {
        open: RefCell::new(None),
        closes: Cell::new(0),
    });
    let popup = Popup::new(colors, settings);
    let anchor = Rect::new(40.0, 40.0, 160.0, 60.0);

    println!("== Show ==");
    popup.show_in_rect(
        AnchorQuad::from_rect(anchor),
        Size::new(anchor.width(), anchor.height()),
        window.clone(),
        Some(0),
    );
    println!("  frame {:?}, list at {:?}", popup.frame(), popup.panel().origin());

    println!("== Hover the third row ==");
    // One border pixel above the list, so row 2 starts at y = 41.
    popup.handle_pointer(&PointerEvent::new(PointerKind::Move, Point::new(30.0, 45.0)));
    println!("  tooltip: {:?}", popup.selected_item_tooltip());

    println!("== Scroll gesture ==");
    let scroll = GestureEvent::new(GestureKind::ScrollUpdate, Point::new(30.0, 45.0))
        .with_delta(Vec2::new(0.0, -40.0));
    popup.handle_gesture(&scroll);
    println!("  scrolled to {}", popup.panel().scroll_offset());

    println!("== Arrow down, then Enter ==");
    popup.handle_key(&KeyEvent::new(Key::Down));
    popup.handle_key(&KeyEvent::new(Key::Enter));

    println!("== After close ==");
    println!(
        "  open: {}, host notified {} time(s), host holds popup: {}",
        popup.is_open(),
        window.closes.get(),
        window.open.borrow().is_some()
    );
    popup.notify_closed();
    assert_eq!(window.closes.get(), 1);
}
