// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonical event names and their pointer event equivalents.
//!
//! Two fixed tables translate mouse and touch names to pointer names. They also
//! answer membership ("is this a mouse event?") for the strategies. The key sets
//! are disjoint, so a canonical name resolves through at most one table.

/// Mouse name → pointer name.
pub const MOUSE_TO_POINTER: &[(&str, &str)] = &[
    ("mousedown", "pointerdown"),
    ("mouseup", "pointerup"),
    ("mousemove", "pointermove"),
    ("mouseover", "pointerover"),
    ("mouseout", "pointerout"),
    ("mouseenter", "pointerenter"),
    ("mouseleave", "pointerleave"),
    ("click", "click"),
    ("dblclick", "dblclick"),
];

/// Touch name → pointer name.
pub const TOUCH_TO_POINTER: &[(&str, &str)] = &[
    ("touchstart", "pointerdown"),
    ("touchend", "pointerup"),
    ("touchmove", "pointermove"),
    ("touchcancel", "pointercancel"),
];

fn lookup(table: &'static [(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == name)
        .map(|&(_, to)| to)
}

/// Pointer name for a mouse event name.
pub fn pointer_for_mouse(name: &str) -> Option<&'static str> {
    lookup(MOUSE_TO_POINTER, name)
}

/// Pointer name for a touch event name.
pub fn pointer_for_touch(name: &str) -> Option<&'static str> {
    lookup(TOUCH_TO_POINTER, name)
}

/// Whether `name` is a known mouse event.
pub fn is_mouse_event(name: &str) -> bool {
    pointer_for_mouse(name).is_some()
}

/// Whether `name` is a known touch event.
pub fn is_touch_event(name: &str) -> bool {
    pointer_for_touch(name).is_some()
}
