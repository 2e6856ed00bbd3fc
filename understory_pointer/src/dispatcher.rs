// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registration entry point.
//!
//! ## Usage
//!
//! - Build a [`Dispatcher`] from the device's [`DeviceProfile`] and whether the
//!   host supports passive listeners. Both are resolved by the embedder and stay
//!   fixed for the process.
//! - Call [`Dispatcher::register`] with a target and `(key, handler)` pairs.
//!   Each key is parsed with [`ParsedKey::parse`] and every event it names is
//!   attached through the selected [`Strategy`].
//!
//! Keys are processed in iteration order. The same event named in two keys gets
//! two independent native listeners; nothing is deduplicated across keys.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use understory_pointer::dispatcher::Dispatcher;
//! use understory_pointer::profile::{DeviceProfile, DeviceType};
//! use understory_pointer::strategy::Strategy;
//! use understory_pointer::types::{EventTarget, Handler, InputEvent, Listener, ListenerOptions};
//!
//! # #[derive(Default)]
//! # struct Target(std::cell::RefCell<Vec<String>>);
//! # impl EventTarget for Target {
//! #     fn add_event_listener(&self, name: &str, _: Listener, _: ListenerOptions) {
//! #         self.0.borrow_mut().push(name.into());
//! #     }
//! # }
//! let mut profile = DeviceProfile::new(DeviceType::Hybrid);
//! profile.has_touch_events_api = true;
//! let dispatcher = Dispatcher::new(profile, true);
//! assert_eq!(dispatcher.strategy(), Strategy::Hybrid);
//!
//! let clicks = Rc::new(Cell::new(0));
//! let seen = clicks.clone();
//! let on_click: Handler = Rc::new(move |_: &InputEvent| seen.set(seen.get() + 1));
//!
//! let target = Target::default();
//! dispatcher.register(&target, [("click", on_click)], None);
//! // Touch tracker, tap-to-click and guarded native click.
//! assert_eq!(*target.0.borrow(), ["touchstart", "touchend", "touchcancel", "touchend", "click"]);
//! ```

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::key::ParsedKey;
use crate::profile::DeviceProfile;
use crate::strategy::{Binding, Strategy};
use crate::touch::TouchTracker;
use crate::types::{EventTarget, Handler};

/// Pointer channels the caller wants left alone.
///
/// Only consulted by [`Strategy::Pointer`]. A name set to `false`, either a
/// pointer event name such as `pointermove` or a canonical mouse or touch name,
/// stops that channel from being registered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointerOptions {
    enabled: BTreeMap<String, bool>,
}

impl PointerOptions {
    /// No channels suppressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the channel `name`.
    pub fn suppress(mut self, name: impl Into<String>) -> Self {
        self.set(name, false);
        self
    }

    /// Enable or suppress the channel `name`.
    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.enabled.insert(name.into(), enabled);
    }

    /// Whether `name` was explicitly suppressed.
    pub fn is_suppressed(&self, name: &str) -> bool {
        self.enabled.get(name) == Some(&false)
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for PointerOptions {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Attaches semantic handlers to targets for one device.
#[derive(Copy, Clone, Debug)]
pub struct Dispatcher {
    profile: DeviceProfile,
    passive_supported: bool,
}

impl Dispatcher {
    /// Create a dispatcher for `profile`.
    pub fn new(profile: DeviceProfile, passive_supported: bool) -> Self {
        Self {
            profile,
            passive_supported,
        }
    }

    /// The device profile handlers are attached for.
    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Whether the host supports passive listeners.
    pub fn passive_supported(&self) -> bool {
        self.passive_supported
    }

    /// The strategy [`register`](Self::register) uses.
    pub fn strategy(&self) -> Strategy {
        Strategy::select(&self.profile)
    }

    /// Register every `(key, handler)` pair on `target`.
    ///
    /// The strategy is resolved once for the call. Under [`Strategy::Hybrid`] a
    /// single [`TouchTracker`] is attached first and shared by every binding of
    /// the call, so all handlers see the same touch timing.
    pub fn register<T, I, K>(
        &self,
        target: &T,
        handlers: I,
        pointer_options: Option<&PointerOptions>,
    ) where
        T: EventTarget + ?Sized,
        I: IntoIterator<Item = (K, Handler)>,
        K: AsRef<str>,
    {
        let strategy = self.strategy();
        tracing::debug!(
            ?strategy,
            device_type = ?self.profile.device_type,
            "registering handlers"
        );
        let touch = (strategy == Strategy::Hybrid)
            .then(|| TouchTracker::attach(target, self.passive_supported));

        for (key, handler) in handlers {
            let parsed = ParsedKey::parse(key.as_ref(), self.passive_supported);
            for event in &parsed.events {
                let binding = Binding {
                    event: event.as_str(),
                    handler: &handler,
                    options: parsed.options,
                    qualifier: parsed.qualifier,
                    touch: touch.as_ref(),
                    pointer_options,
                };
                strategy.attach(target, &binding, &self.profile, self.passive_supported);
            }
        }
    }
}
