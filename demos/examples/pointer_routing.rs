// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events: touch and mouse handlers split by pointer type.
//!
//! A touch screen that only exposes pointer events gets the pointer strategy.
//! `touchmove` and `mousemove` share `pointermove`, which is switched off here
//! through [`PointerOptions`].
//!
//! Run:
//! - `cargo run -p understory_demos --example pointer_routing`

use std::cell::RefCell;
use std::rc::Rc;

use understory_pointer::dispatcher::{Dispatcher, PointerOptions};
use understory_pointer::profile::{DeviceProfile, DeviceType};
use understory_pointer::types::{
    EventTarget, Handler, InputEvent, Listener, ListenerOptions, PointerType,
};

#[derive(Default)]
struct Host {
    listeners: RefCell<Vec<(String, Listener)>>,
}

impl EventTarget for Host {
    fn add_event_listener(&self, name: &str, listener: Listener, _options: ListenerOptions) {
        self.listeners.borrow_mut().push((name.into(), listener));
    }
}

impl Host {
    fn fire(&self, ev: InputEvent) {
        for (name, listener) in self.listeners.borrow().iter() {
            if *name == ev.name {
                listener(&ev);
            }
        }
    }
}

fn logger(label: &'static str) -> Handler {
    Rc::new(move |ev: &InputEvent| println!("  {label}: {} {:?}", ev.name, ev.pointer_type))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let profile = DeviceProfile {
        has_pointer_events_api: true,
        has_touch: true,
        ..DeviceProfile::new(DeviceType::TouchOnly)
    };
    let dispatcher = Dispatcher::new(profile, false);
    let host = Host::default();
    let opts = PointerOptions::new().suppress("pointermove");
    dispatcher.register(
        &host,
        [
            ("touchstart", logger("touch")),
            ("mousedown", logger("mouse")),
            ("touchmove mousemove", logger("move")),
        ],
        Some(&opts),
    );

    let names: Vec<String> = host.listeners.borrow().iter().map(|(n, _)| n.clone()).collect();
    println!("== Registered: {names:?} ==");
    for pointer_type in [
        PointerType::Touch,
        PointerType::Pen,
        PointerType::Mouse,
        PointerType::Legacy(4),
        PointerType::Unknown,
    ] {
        println!("== pointerdown from {pointer_type:?} ==");
        host.fire(InputEvent::new("pointerdown", 0.0).with_pointer_type(pointer_type));
    }
    host.fire(InputEvent::new("pointermove", 1.0).with_pointer_type(PointerType::Touch));
}
