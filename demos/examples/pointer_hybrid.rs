// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hybrid device: a tap reaches the click handler once.
//!
//! This example registers `click` and `mousedown` on a hybrid laptop, then
//! replays a tap followed by the mouse events the host synthesizes for it, and
//! finally a genuine mouse click a second later.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example pointer_hybrid`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use understory_pointer::dispatcher::Dispatcher;
use understory_pointer::profile::{DeviceProfile, DeviceType};
use understory_pointer::types::{EventTarget, Handler, InputEvent, Listener, ListenerOptions};

/// Minimal host: listeners fire in registration order.
#[derive(Default)]
struct Host {
    listeners: RefCell<Vec<(String, Listener)>>,
}

impl EventTarget for Host {
    fn add_event_listener(&self, name: &str, listener: Listener, options: ListenerOptions) {
        println!("  listen {name:<12} {options:?}");
        self.listeners.borrow_mut().push((name.into(), listener));
    }
}

impl Host {
    fn fire(&self, ev: InputEvent) {
        println!("-> {:<10} t={:>6}", ev.name, ev.time_stamp);
        for (name, listener) in self.listeners.borrow().iter() {
            if *name == ev.name {
                listener(&ev);
            }
        }
    }
}

fn logger(label: &'static str) -> Handler {
    Rc::new(move |ev: &InputEvent| {
        println!("   {label} handled {} at {:?}", ev.name, ev.position);
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let profile = DeviceProfile {
        has_touch_events_api: true,
        has_pointer_events_api: true,
        has_touch: true,
        ..DeviceProfile::new(DeviceType::Hybrid)
    };
    let dispatcher = Dispatcher::new(profile, true);
    println!("== Strategy: {:?} ==", dispatcher.strategy());

    let host = Host::default();
    dispatcher.register(
        &host,
        [
            ("click", logger("click")),
            ("mousedown passive", logger("press")),
        ],
        None,
    );

    let at = Point::new(40.0, 12.0);
    println!("== Tap ==");
    host.fire(InputEvent::new("touchstart", 0.0).with_touches(1).with_position(at));
    host.fire(InputEvent::new("touchend", 90.0).with_position(at));
    println!("== Synthetic mouse events (ignored) ==");
    host.fire(InputEvent::new("mousedown", 390.0).with_position(at));
    host.fire(InputEvent::new("click", 395.0).with_position(at));
    println!("== Genuine mouse click ==");
    host.fire(InputEvent::new("mousedown", 1_500.0).with_position(at));
    host.fire(InputEvent::new("click", 1_580.0).with_position(at));
}
