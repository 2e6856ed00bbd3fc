// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host target for unit tests.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::types::{EventTarget, Handler, InputEvent, Listener, ListenerOptions};

/// Records registrations and fires events at matching listeners in registration order.
#[derive(Default)]
pub(crate) struct RecordingTarget {
    listeners: RefCell<Vec<(String, ListenerOptions, Listener)>>,
}

impl EventTarget for RecordingTarget {
    fn add_event_listener(&self, name: &str, listener: Listener, options: ListenerOptions) {
        self.listeners
            .borrow_mut()
            .push((String::from(name), options, listener));
    }
}

impl RecordingTarget {
    pub(crate) fn fire(&self, ev: &InputEvent) {
        for (name, _, listener) in self.listeners.borrow().iter() {
            if *name == ev.name {
                listener(ev);
            }
        }
    }

    pub(crate) fn registrations(&self) -> Vec<(String, ListenerOptions)> {
        self.listeners
            .borrow()
            .iter()
            .map(|(name, options, _)| (name.clone(), *options))
            .collect()
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.listeners
            .borrow()
            .iter()
            .map(|(name, _, _)| name.clone())
            .collect()
    }

    pub(crate) fn count(&self, name: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(n, _, _)| n == name)
            .count()
    }
}

/// A handler that counts its invocations.
pub(crate) fn counter() -> (Handler, Rc<Cell<u32>>) {
    let hits = Rc::new(Cell::new(0));
    let seen = Rc::clone(&hits);
    let handler: Handler = Rc::new(move |_: &InputEvent| seen.set(seen.get() + 1));
    (handler, hits)
}
