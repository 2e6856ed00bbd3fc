// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device capability profile consumed by strategy selection.
//!
//! The profile is resolved by the embedder once and never changes for the life
//! of the process. Capability changes mid-session require a restart.

use alloc::string::String;

/// Kind of pointing hardware the device exposes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeviceType {
    /// Only a mouse (or trackpad).
    MouseOnly,
    /// Only touch input.
    TouchOnly,
    /// Both touch and mouse input.
    Hybrid,
    /// Anything else, or unknown.
    Other,
}

/// Read-only description of a device's input capabilities.
#[derive(Copy, Clone, Debug)]
pub struct DeviceProfile {
    /// Hardware kind.
    pub device_type: DeviceType,
    /// The host implements touch events.
    pub has_touch_events_api: bool,
    /// The host implements pointer events.
    pub has_pointer_events_api: bool,
    /// The device has a touch screen.
    pub has_touch: bool,
    /// Maps an unprefixed pointer event name to the name the host fires.
    pub pointer_event_prefix: fn(&str) -> String,
}

impl DeviceProfile {
    /// A profile of the given device type with no event APIs and unprefixed pointer events.
    pub fn new(device_type: DeviceType) -> Self {
        Self {
            device_type,
            has_touch_events_api: false,
            has_pointer_events_api: false,
            has_touch: false,
            pointer_event_prefix: unprefixed,
        }
    }

    /// Native name for a pointer event.
    pub fn prefixed(&self, name: &str) -> String {
        (self.pointer_event_prefix)(name)
    }
}

/// Pointer event names as standardized.
pub fn unprefixed(name: &str) -> String {
    String::from(name)
}

/// Pointer event names in the legacy vendor-prefixed form, e.g. `MSPointerDown`.
///
/// Names that do not start with `pointer` pass through untouched.
pub fn ms_prefixed(name: &str) -> String {
    let Some(rest) = name.strip_prefix("pointer") else {
        return String::from(name);
    };
    let mut out = String::with_capacity(name.len() + 2);
    out.push_str("MSPointer");
    let mut chars = rest.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
    out
}
