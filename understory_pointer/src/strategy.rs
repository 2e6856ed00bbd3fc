// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch strategies.
//!
//! ## Overview
//!
//! A [`Strategy`] turns one `(event, handler)` binding into native listener
//! registrations under one device assumption. It is chosen once from the
//! [`DeviceProfile`] by [`Strategy::select`].
//!
//! ## Selection
//!
//! First match wins:
//!
//! 1. Mouse-only devices use [`Strategy::MouseOnly`].
//! 2. Touch-only devices with touch events use [`Strategy::TouchOnly`].
//! 3. Hybrid devices with touch events use [`Strategy::Hybrid`].
//! 4. Touch devices with pointer events use [`Strategy::Pointer`].
//! 5. Everything else uses [`Strategy::Inert`], which registers nothing.
//!
//! Native touch and mouse pairs are preferred over pointer events whenever both
//! exist. Pointer events do not carry the same click timing guarantees.
//!
//! ## Ghost events
//!
//! Hosts fire mouse events after (sometimes during) a touch interaction. The
//! hybrid strategy drops those with two guards evaluated when the mouse event
//! arrives: no touch may be in progress, and [`GHOST_WINDOW_MS`](crate::touch::GHOST_WINDOW_MS)
//! must have passed since the last touch ended. Neither guard suffices alone:
//! the timestamp cannot tell "still touching" from "touched long ago", and the
//! activity flag cannot bound a long press.

use alloc::boxed::Box;
use alloc::rc::Rc;

use crate::dispatcher::PointerOptions;
use crate::key::Qualifier;
use crate::names;
use crate::profile::{DeviceProfile, DeviceType};
use crate::touch::TouchTracker;
use crate::types::{EventTarget, Handler, InputEvent, Listener, ListenerOptions, PointerClass};

/// How handlers are attached for the current device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Mouse events only.
    MouseOnly,
    /// Touch events only, with clicks synthesized from taps.
    TouchOnly,
    /// Touch events plus mouse events with ghost suppression.
    Hybrid,
    /// Pointer events split by reported pointer type.
    Pointer,
    /// Registers nothing.
    Inert,
}

/// One handler bound to one canonical event name, as produced from a parsed key.
#[derive(Clone, Copy)]
pub struct Binding<'a> {
    /// Canonical event name.
    pub event: &'a str,
    /// Application callback.
    pub handler: &'a Handler,
    /// Options for native listeners registered for this binding.
    pub options: ListenerOptions,
    /// Strategy restriction from the key.
    pub qualifier: Option<Qualifier>,
    /// Touch state shared by every binding of one registration call.
    pub touch: Option<&'a TouchTracker>,
    /// Pointer channels the caller disabled.
    pub pointer_options: Option<&'a PointerOptions>,
}

impl core::fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Binding")
            .field("event", &self.event)
            .field("options", &self.options)
            .field("qualifier", &self.qualifier)
            .field("touch", &self.touch)
            .field("pointer_options", &self.pointer_options)
            .finish_non_exhaustive()
    }
}

impl Strategy {
    /// Choose the strategy for `profile`.
    pub fn select(profile: &DeviceProfile) -> Self {
        match profile.device_type {
            DeviceType::MouseOnly => Self::MouseOnly,
            DeviceType::TouchOnly if profile.has_touch_events_api => Self::TouchOnly,
            DeviceType::Hybrid if profile.has_touch_events_api => Self::Hybrid,
            _ if profile.has_touch && profile.has_pointer_events_api => Self::Pointer,
            _ => Self::Inert,
        }
    }

    /// Attach `binding` to `target`.
    pub fn attach<T: EventTarget + ?Sized>(
        self,
        target: &T,
        binding: &Binding<'_>,
        profile: &DeviceProfile,
        passive_supported: bool,
    ) {
        match self {
            Self::MouseOnly => attach_mouse_only(target, binding),
            Self::TouchOnly => attach_touch_only(target, binding, profile, passive_supported),
            Self::Hybrid => attach_hybrid(target, binding, profile, passive_supported),
            Self::Pointer => attach_pointer(target, binding, profile),
            Self::Inert => {
                tracing::trace!(event = binding.event, "inert strategy, nothing attached");
            }
        }
    }
}

fn listen<T: EventTarget + ?Sized>(
    target: &T,
    name: &str,
    options: ListenerOptions,
    listener: Listener,
) {
    tracing::trace!(name, ?options, "attaching native listener");
    target.add_event_listener(name, listener, options);
}

fn forward(handler: &Handler) -> Listener {
    let handler = Rc::clone(handler);
    Box::new(move |ev| handler(ev))
}

fn forward_if(handler: &Handler, guard: impl Fn(&InputEvent) -> bool + 'static) -> Listener {
    let handler = Rc::clone(handler);
    Box::new(move |ev| {
        if guard(ev) {
            handler(ev);
        }
    })
}

/// Native mouse listeners, plus any custom event that is not a touch event.
///
/// `setWithMouse` forces registration even for touch names.
pub fn attach_mouse_only<T: EventTarget + ?Sized>(target: &T, b: &Binding<'_>) {
    let forced = b.qualifier == Some(Qualifier::WithMouse);
    if b.qualifier.is_some() && !forced {
        tracing::trace!(event = b.event, qualifier = ?b.qualifier, "skipped by qualifier");
        return;
    }
    if names::is_mouse_event(b.event) || !names::is_touch_event(b.event) || forced {
        listen(target, b.event, b.options, forward(b.handler));
    }
}

/// Native touch listeners, with `click` synthesized from short taps.
///
/// A `touchend` within [`TAP_WINDOW_MS`](crate::touch::TAP_WINDOW_MS) of its
/// `touchstart` calls the click handler immediately instead of waiting for the
/// host's delayed click. On touch-only devices a native `click` listener is
/// added too, so clicks synthesized by assistive technology still arrive; it
/// ignores clicks inside the ghost window of a touch.
///
/// Without a shared tracker in the binding, one is attached for this click.
pub fn attach_touch_only<T: EventTarget + ?Sized>(
    target: &T,
    b: &Binding<'_>,
    profile: &DeviceProfile,
    passive_supported: bool,
) {
    let forced = b.qualifier == Some(Qualifier::WithTouch);
    if b.qualifier.is_some() && !forced {
        tracing::trace!(event = b.event, qualifier = ?b.qualifier, "skipped by qualifier");
        return;
    }
    if names::is_touch_event(b.event) {
        listen(target, b.event, b.options, forward(b.handler));
    } else if b.event == "click" {
        let touch_only_device = profile.device_type == DeviceType::TouchOnly;
        let tracker = match b.touch {
            Some(shared) => shared.clone(),
            // The native click guard below needs end and activity state.
            None if touch_only_device => TouchTracker::attach(target, passive_supported),
            None => TouchTracker::attach_start_only(target, passive_supported),
        };
        let taps = tracker.clone();
        listen(
            target,
            "touchend",
            b.options,
            forward_if(b.handler, move |ev| taps.get().is_tap(ev.time_stamp)),
        );
        if touch_only_device {
            listen(
                target,
                "click",
                b.options,
                forward_if(b.handler, move |ev| tracker.get().is_quiet(ev.time_stamp)),
            );
        }
    } else if !names::is_mouse_event(b.event) || forced {
        listen(target, b.event, b.options, forward(b.handler));
    }
}

/// Touch-only behavior, plus mouse listeners that ignore ghost mouse events.
///
/// `setWithHybrid` imposes no restriction here. `setWithTouch` keeps only the
/// touch half, `setWithMouse` keeps only the mouse half and also registers it
/// for custom names. Touch names under `setWithMouse` get nothing: the tracker
/// marks a touch active before any guarded touch listener could run.
pub fn attach_hybrid<T: EventTarget + ?Sized>(
    target: &T,
    b: &Binding<'_>,
    profile: &DeviceProfile,
    passive_supported: bool,
) {
    let qualifier = b.qualifier.filter(|q| *q != Qualifier::WithHybrid);
    let touch_half = Binding { qualifier, ..*b };
    attach_touch_only(target, &touch_half, profile, passive_supported);

    if qualifier == Some(Qualifier::WithTouch) {
        return;
    }
    let forced = qualifier == Some(Qualifier::WithMouse) && !names::is_touch_event(b.event);
    if names::is_mouse_event(b.event) || forced {
        let Some(tracker) = b.touch.cloned() else {
            // Without touch state there is nothing to suppress against.
            listen(target, b.event, b.options, forward(b.handler));
            return;
        };
        listen(
            target,
            b.event,
            b.options,
            forward_if(b.handler, move |ev| tracker.get().is_quiet(ev.time_stamp)),
        );
    }
}

/// Pointer event listeners routed by the reported pointer type.
///
/// Mouse names listen on the pointer equivalent and only pass mouse input,
/// touch names do the same for touch and pen input. `click` and `dblclick` are
/// left as they are; hosts fire them for every pointer type. Any other name is
/// registered unfiltered under its prefixed form.
///
/// If [`PointerOptions`] disables the event or its pointer equivalent, nothing
/// is registered, including for the mouse or touch name that shares it.
/// Options naming a custom event have no effect.
pub fn attach_pointer<T: EventTarget + ?Sized>(
    target: &T,
    b: &Binding<'_>,
    profile: &DeviceProfile,
) {
    let mouse_ptr = names::pointer_for_mouse(b.event);
    let touch_ptr = names::pointer_for_touch(b.event);
    if let Some(opts) = b.pointer_options {
        // Names without a pointer mapping are never suppressed.
        let suppressed = match mouse_ptr.or(touch_ptr) {
            Some(ptr) => opts.is_suppressed(b.event) || opts.is_suppressed(ptr),
            None => false,
        };
        if suppressed {
            tracing::trace!(event = b.event, "pointer channel suppressed");
            return;
        }
    }
    match (mouse_ptr, touch_ptr) {
        (Some(ptr @ ("click" | "dblclick")), _) => {
            listen(target, ptr, b.options, forward(b.handler));
        }
        (Some(ptr), _) => listen(
            target,
            &profile.prefixed(ptr),
            b.options,
            forward_if(b.handler, |ev| ev.pointer_class() == Some(PointerClass::Mouse)),
        ),
        (None, Some(ptr)) => listen(
            target,
            &profile.prefixed(ptr),
            b.options,
            forward_if(b.handler, |ev| ev.pointer_class() == Some(PointerClass::Touch)),
        ),
        (None, None) => listen(
            target,
            &profile.prefixed(b.event),
            b.options,
            forward(b.handler),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingTarget, counter};
    use crate::types::PointerType;
    use alloc::vec;

    fn profile(
        device_type: DeviceType,
        touch_api: bool,
        pointer_api: bool,
        touch: bool,
    ) -> DeviceProfile {
        DeviceProfile {
            has_touch_events_api: touch_api,
            has_pointer_events_api: pointer_api,
            has_touch: touch,
            ..DeviceProfile::new(device_type)
        }
    }

    fn binding<'a>(event: &'a str, handler: &'a Handler) -> Binding<'a> {
        Binding {
            event,
            handler,
            options: ListenerOptions::Capture(false),
            qualifier: None,
            touch: None,
            pointer_options: None,
        }
    }

    #[test]
    fn selection_follows_priority_table() {
        use DeviceType::*;
        let cases = [
            (profile(MouseOnly, true, true, true), Strategy::MouseOnly),
            (profile(TouchOnly, true, true, true), Strategy::TouchOnly),
            (profile(Hybrid, true, true, true), Strategy::Hybrid),
            (profile(TouchOnly, false, true, true), Strategy::Pointer),
            (profile(Hybrid, false, true, true), Strategy::Pointer),
            (profile(Other, false, false, true), Strategy::Inert),
            (profile(Other, true, false, false), Strategy::Inert),
            (profile(Hybrid, false, true, false), Strategy::Inert),
        ];
        for (p, expected) in cases {
            assert_eq!(Strategy::select(&p), expected, "{p:?}");
        }
    }

    #[test]
    fn mouse_only_registers_mouse_and_custom_events() {
        let target = RecordingTarget::default();
        let (h, _) = counter();
        for event in ["mousedown", "click", "my-custom", "touchstart"] {
            attach_mouse_only(&target, &binding(event, &h));
        }
        assert_eq!(target.names(), ["mousedown", "click", "my-custom"]);
    }

    #[test]
    fn mouse_only_respects_qualifiers() {
        let target = RecordingTarget::default();
        let (h, _) = counter();
        let forced = Binding {
            qualifier: Some(Qualifier::WithMouse),
            ..binding("touchstart", &h)
        };
        attach_mouse_only(&target, &forced);
        for q in [Qualifier::WithTouch, Qualifier::WithHybrid] {
            let skipped = Binding {
                qualifier: Some(q),
                ..binding("mousedown", &h)
            };
            attach_mouse_only(&target, &skipped);
        }
        assert_eq!(target.names(), ["touchstart"]);
    }

    #[test]
    fn touch_only_registers_touch_and_custom_events() {
        let target = RecordingTarget::default();
        let p = profile(DeviceType::TouchOnly, true, false, true);
        let (h, _) = counter();
        for event in ["touchstart", "mousedown", "my-custom"] {
            attach_touch_only(&target, &binding(event, &h), &p, true);
        }
        let forced = Binding {
            qualifier: Some(Qualifier::WithTouch),
            ..binding("mouseup", &h)
        };
        attach_touch_only(&target, &forced, &p, true);
        assert_eq!(target.names(), ["touchstart", "my-custom", "mouseup"]);
    }

    #[test]
    fn touch_only_skips_foreign_qualifiers() {
        let target = RecordingTarget::default();
        let p = profile(DeviceType::TouchOnly, true, false, true);
        let (h, _) = counter();
        for (event, qualifier) in [
            ("my-custom", Qualifier::WithHybrid),
            ("my-custom", Qualifier::WithMouse),
            ("click", Qualifier::WithMouse),
        ] {
            let b = Binding {
                qualifier: Some(qualifier),
                ..binding(event, &h)
            };
            attach_touch_only(&target, &b, &p, true);
        }
        assert!(target.names().is_empty());
    }

    #[test]
    fn tap_fires_click_within_window() {
        let p = profile(DeviceType::TouchOnly, true, false, true);
        for (release, expected) in [(499.0, 1), (501.0, 0)] {
            let target = RecordingTarget::default();
            let (h, hits) = counter();
            attach_touch_only(&target, &binding("click", &h), &p, true);
            target.fire(&InputEvent::new("touchstart", 0.0).with_touches(1));
            target.fire(&InputEvent::new("touchend", release));
            assert_eq!(hits.get(), expected, "released at {release}");
        }
    }

    #[test]
    fn touch_only_device_suppresses_trailing_native_click() {
        let target = RecordingTarget::default();
        let p = profile(DeviceType::TouchOnly, true, false, true);
        let (h, hits) = counter();
        attach_touch_only(&target, &binding("click", &h), &p, true);
        assert_eq!(target.count("click"), 1);

        target.fire(&InputEvent::new("touchstart", 0.0).with_touches(1));
        target.fire(&InputEvent::new("touchend", 100.0));
        // Host's delayed click for the same tap.
        target.fire(&InputEvent::new("click", 400.0));
        assert_eq!(hits.get(), 1);

        // Click from assistive technology long after any touch.
        target.fire(&InputEvent::new("click", 5_000.0));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn shared_tracker_is_reused_for_click() {
        let target = RecordingTarget::default();
        let p = profile(DeviceType::Hybrid, true, false, true);
        let tracker = TouchTracker::attach(&target, true);
        let (h, _) = counter();
        let b = Binding {
            touch: Some(&tracker),
            ..binding("click", &h)
        };
        attach_touch_only(&target, &b, &p, true);
        // Tracker's three plus the tap listener; no native click off touch-only devices.
        assert_eq!(target.count("touchstart"), 1);
        assert_eq!(target.count("touchend"), 2);
        assert_eq!(target.count("click"), 0);
    }

    #[test]
    fn hybrid_suppresses_ghost_mouse_events() {
        let target = RecordingTarget::default();
        let p = profile(DeviceType::Hybrid, true, false, true);
        let tracker = TouchTracker::attach(&target, true);
        let (h, hits) = counter();
        let b = Binding {
            touch: Some(&tracker),
            ..binding("mousedown", &h)
        };
        attach_hybrid(&target, &b, &p, true);

        target.fire(&InputEvent::new("touchstart", -50.0).with_touches(1));
        target.fire(&InputEvent::new("touchend", 0.0));
        target.fire(&InputEvent::new("mousedown", 599.0));
        assert_eq!(hits.get(), 0);
        target.fire(&InputEvent::new("mousedown", 601.0));
        assert_eq!(hits.get(), 1);

        target.fire(&InputEvent::new("touchstart", 700.0).with_touches(1));
        target.fire(&InputEvent::new("mousedown", 10_000.0));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn hybrid_passes_mouse_before_any_touch() {
        let target = RecordingTarget::default();
        let p = profile(DeviceType::Hybrid, true, false, true);
        let tracker = TouchTracker::attach(&target, true);
        let (h, hits) = counter();
        let b = Binding {
            touch: Some(&tracker),
            ..binding("mousemove", &h)
        };
        attach_hybrid(&target, &b, &p, true);
        target.fire(&InputEvent::new("mousemove", 1.0));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn hybrid_click_is_served_once_per_tap() {
        let target = RecordingTarget::default();
        let p = profile(DeviceType::Hybrid, true, false, true);
        let tracker = TouchTracker::attach(&target, true);
        let (h, hits) = counter();
        let b = Binding {
            touch: Some(&tracker),
            ..binding("click", &h)
        };
        attach_hybrid(&target, &b, &p, true);

        target.fire(&InputEvent::new("touchstart", 0.0).with_touches(1));
        target.fire(&InputEvent::new("touchend", 80.0));
        target.fire(&InputEvent::new("click", 380.0));
        assert_eq!(hits.get(), 1);

        target.fire(&InputEvent::new("click", 2_000.0));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn hybrid_qualifiers_pick_halves() {
        let p = profile(DeviceType::Hybrid, true, false, true);
        let (h, _) = counter();
        let cases = [
            (Some(Qualifier::WithHybrid), "touchstart", vec!["touchstart"]),
            (Some(Qualifier::WithTouch), "mousedown", vec!["mousedown"]),
            (Some(Qualifier::WithMouse), "touchstart", vec![]),
            (Some(Qualifier::WithMouse), "mousedown", vec!["mousedown"]),
            (Some(Qualifier::WithMouse), "my-custom", vec!["my-custom"]),
        ];
        for (qualifier, event, expected) in cases {
            let target = RecordingTarget::default();
            let b = Binding {
                qualifier,
                ..binding(event, &h)
            };
            attach_hybrid(&target, &b, &p, true);
            assert_eq!(target.names(), expected, "{qualifier:?} {event}");
        }
    }

    #[test]
    fn pointer_routes_by_pointer_type() {
        let target = RecordingTarget::default();
        let p = profile(DeviceType::Hybrid, false, true, true);
        let (touch_h, touch_hits) = counter();
        let (mouse_h, mouse_hits) = counter();
        attach_pointer(&target, &binding("touchstart", &touch_h), &p);
        attach_pointer(&target, &binding("mousedown", &mouse_h), &p);
        assert_eq!(target.names(), ["pointerdown", "pointerdown"]);

        let down = |pt| InputEvent::new("pointerdown", 0.0).with_pointer_type(pt);
        for pt in [
            PointerType::Touch,
            PointerType::Pen,
            PointerType::Legacy(2),
            PointerType::Legacy(3),
        ] {
            target.fire(&down(pt));
        }
        assert_eq!((touch_hits.get(), mouse_hits.get()), (4, 0));

        target.fire(&down(PointerType::Mouse));
        target.fire(&down(PointerType::Legacy(4)));
        assert_eq!((touch_hits.get(), mouse_hits.get()), (4, 2));

        target.fire(&down(PointerType::Unknown));
        target.fire(&down(PointerType::Legacy(7)));
        target.fire(&InputEvent::new("pointerdown", 0.0));
        assert_eq!((touch_hits.get(), mouse_hits.get()), (4, 2));
    }

    #[test]
    fn pointer_keeps_click_and_prefixes_the_rest() {
        let target = RecordingTarget::default();
        let mut p = profile(DeviceType::Hybrid, false, true, true);
        p.pointer_event_prefix = crate::profile::ms_prefixed;
        let (h, hits) = counter();
        for event in ["click", "dblclick", "mouseup", "touchcancel", "my-custom"] {
            attach_pointer(&target, &binding(event, &h), &p);
        }
        assert_eq!(
            target.names(),
            ["click", "dblclick", "MSPointerUp", "MSPointerCancel", "my-custom"]
        );
        target.fire(&InputEvent::new("my-custom", 0.0));
        target.fire(&InputEvent::new("click", 0.0).with_pointer_type(PointerType::Touch));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn pointer_options_ignore_custom_names() {
        let target = RecordingTarget::default();
        let p = profile(DeviceType::TouchOnly, false, true, true);
        let opts = PointerOptions::new().suppress("my-custom");
        let (h, _) = counter();
        let b = Binding {
            pointer_options: Some(&opts),
            ..binding("my-custom", &h)
        };
        attach_pointer(&target, &b, &p);
        assert_eq!(target.names(), ["my-custom"]);
    }

    #[test]
    fn pointer_options_accept_canonical_names() {
        let target = RecordingTarget::default();
        let p = profile(DeviceType::TouchOnly, false, true, true);
        let opts = PointerOptions::new().suppress("mousemove");
        let (h, _) = counter();
        let b = Binding {
            pointer_options: Some(&opts),
            ..binding("mousemove", &h)
        };
        attach_pointer(&target, &b, &p);
        assert!(target.names().is_empty());
    }

    #[test]
    fn pointer_options_suppress_shared_channel() {
        let target = RecordingTarget::default();
        let p = profile(DeviceType::TouchOnly, false, true, true);
        let opts = PointerOptions::new().suppress("pointermove");
        let (h, _) = counter();
        for event in ["mousemove", "touchmove", "mousedown"] {
            let b = Binding {
                pointer_options: Some(&opts),
                ..binding(event, &h)
            };
            attach_pointer(&target, &b, &p);
        }
        assert_eq!(target.names(), ["pointerdown"]);
    }

    #[test]
    fn inert_registers_nothing() {
        let target = RecordingTarget::default();
        let p = profile(DeviceType::Other, false, false, false);
        let (h, _) = counter();
        Strategy::Inert.attach(&target, &binding("click", &h), &p, true);
        assert!(target.names().is_empty());
    }
}
