// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser adapter: register listeners on DOM event targets through `web-sys`.
//!
//! Listener closures are leaked to the JavaScript side and live as long as the
//! target does. Nothing here removes listeners.

use alloc::boxed::Box;

use kurbo::Point;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::types::{EventTarget, InputEvent, Listener, ListenerOptions, PointerType};

/// A DOM event target.
#[derive(Clone, Debug)]
pub struct WebTarget {
    inner: web_sys::EventTarget,
}

impl WebTarget {
    /// Wrap a DOM event target.
    pub fn new(inner: web_sys::EventTarget) -> Self {
        Self { inner }
    }

    /// The wrapped DOM event target.
    pub fn inner(&self) -> &web_sys::EventTarget {
        &self.inner
    }
}

impl From<web_sys::EventTarget> for WebTarget {
    fn from(inner: web_sys::EventTarget) -> Self {
        Self::new(inner)
    }
}

impl EventTarget for WebTarget {
    fn add_event_listener(&self, name: &str, listener: Listener, options: ListenerOptions) {
        let callback = Closure::wrap(Box::new(move |ev: web_sys::Event| {
            listener(&input_event_from(&ev));
        }) as Box<dyn FnMut(web_sys::Event)>);
        let function = callback.as_ref().unchecked_ref();

        let result = match options {
            ListenerOptions::Capture(capture) => self
                .inner
                .add_event_listener_with_callback_and_bool(name, function, capture),
            ListenerOptions::Options { capture, passive } => {
                let opts = web_sys::AddEventListenerOptions::new();
                opts.set_capture(capture);
                opts.set_passive(passive);
                self.inner
                    .add_event_listener_with_callback_and_add_event_listener_options(
                        name, function, &opts,
                    )
            }
        };
        if let Err(err) = result {
            tracing::warn!(name, ?err, "native listener registration failed");
        }

        callback.forget();
    }
}

/// Convert a DOM event into an [`InputEvent`].
///
/// Touch events report the remaining `touches` and the first changed touch's
/// client position. Mouse and pointer events report their client position.
/// `pointerType` is read as a string, or as a number on legacy implementations.
pub fn input_event_from(ev: &web_sys::Event) -> InputEvent {
    let mut out = InputEvent::new(ev.type_(), ev.time_stamp());
    if let Some(touch) = ev.dyn_ref::<web_sys::TouchEvent>() {
        out.touches = touch.touches().length() as usize;
        if let Some(first) = touch.changed_touches().get(0) {
            out.position = Point::new(first.client_x().into(), first.client_y().into());
        }
    } else if let Some(mouse) = ev.dyn_ref::<web_sys::MouseEvent>() {
        out.position = Point::new(mouse.client_x().into(), mouse.client_y().into());
    }
    if let Ok(raw) = js_sys::Reflect::get(ev, &JsValue::from_str("pointerType")) {
        out.pointer_type = pointer_type_from(&raw);
    }
    out
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "legacy pointerType codes are small integers"
)]
fn pointer_type_from(raw: &JsValue) -> Option<PointerType> {
    if let Some(name) = raw.as_string() {
        Some(PointerType::from_name(&name))
    } else {
        raw.as_f64().map(|code| PointerType::Legacy(code as u32))
    }
}
