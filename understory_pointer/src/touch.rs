// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch timing state: when the last touch started and ended, and whether one is in progress.
//!
//! ## Usage
//!
//! [`TouchTracker::attach`] registers `touchstart`, `touchend` and `touchcancel`
//! listeners on a target. Those listeners are the only writers of the shared
//! [`TouchState`]. Strategy listeners read a [`TouchState`] snapshot when their
//! own event arrives and compare it against that event's timestamp.
//!
//! ```
//! use understory_pointer::touch::{TouchState, GHOST_WINDOW_MS};
//!
//! let mut state = TouchState::default();
//! assert!(state.is_quiet(0.0));
//! state.start(10.0);
//! assert!(!state.is_quiet(10_000.0));
//! state.end(40.0, 0);
//! assert!(state.is_tap(40.0));
//! assert!(!state.is_quiet(40.0 + GHOST_WINDOW_MS));
//! assert!(state.is_quiet(41.0 + GHOST_WINDOW_MS));
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;

use crate::types::{EventTarget, InputEvent, ListenerOptions, Timestamp};

/// A touch released sooner than this after it started counts as a tap.
pub const TAP_WINDOW_MS: Timestamp = 500.0;

/// Mouse events this soon after the last touch ended are treated as synthetic.
pub const GHOST_WINDOW_MS: Timestamp = 600.0;

/// Touch timing for one target.
///
/// `active` is true strictly between a `touchstart` and the `touchend` or
/// `touchcancel` that leaves no touch points. `end_time` is only written at that
/// closing transition and `start_time` only at `touchstart`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TouchState {
    /// Time of the most recent `touchstart`.
    pub start_time: Option<Timestamp>,
    /// Time the most recent touch sequence finished.
    pub end_time: Option<Timestamp>,
    /// A touch is in progress.
    pub active: bool,
}

impl TouchState {
    /// Record a `touchstart`.
    pub fn start(&mut self, now: Timestamp) {
        self.start_time = Some(now);
        self.active = true;
    }

    /// Record a `touchend` or `touchcancel` leaving `remaining` touch points.
    ///
    /// Only the last lifted finger closes the sequence.
    pub fn end(&mut self, now: Timestamp, remaining: usize) {
        if remaining == 0 {
            self.end_time = Some(now);
            self.active = false;
        }
    }

    /// Whether a touch released at `now` was short enough to act as a click.
    ///
    /// False when no touch was ever seen to start.
    pub fn is_tap(&self, now: Timestamp) -> bool {
        self.start_time.is_some_and(|start| now - start < TAP_WINDOW_MS)
    }

    /// Whether mouse input at `now` can be trusted as a genuine mouse action.
    ///
    /// Requires no touch in progress and the quiet window since the last touch
    /// to have passed. A target that never finished a touch is quiet.
    pub fn is_quiet(&self, now: Timestamp) -> bool {
        !self.active && self.end_time.is_none_or(|end| now - end > GHOST_WINDOW_MS)
    }
}

/// Shared handle on a [`TouchState`] kept current by listeners on one target.
///
/// Cloning the tracker shares the state; it never duplicates it.
#[derive(Clone, Debug, Default)]
pub struct TouchTracker {
    state: Rc<Cell<TouchState>>,
}

impl TouchTracker {
    /// Track start, end and activity of touches on `target`.
    pub fn attach<T: EventTarget + ?Sized>(target: &T, passive_supported: bool) -> Self {
        let tracker = Self::default();
        let options = ListenerOptions::tracking(passive_supported);
        tracker.listen(target, "touchstart", options, |s, ev| s.start(ev.time_stamp));
        tracker.listen(target, "touchend", options, |s, ev| {
            s.end(ev.time_stamp, ev.touches);
        });
        tracker.listen(target, "touchcancel", options, |s, ev| {
            s.end(ev.time_stamp, ev.touches);
        });
        tracing::debug!(passive_supported, "attached touch tracker");
        tracker
    }

    /// Track only touch start times on `target`.
    ///
    /// Enough for tap detection; activity and end time are never updated.
    pub fn attach_start_only<T: EventTarget + ?Sized>(
        target: &T,
        passive_supported: bool,
    ) -> Self {
        let tracker = Self::default();
        let options = ListenerOptions::tracking(passive_supported);
        tracker.listen(target, "touchstart", options, |s, ev| s.start(ev.time_stamp));
        tracing::debug!(passive_supported, "attached start-only touch tracker");
        tracker
    }

    /// Current state.
    pub fn get(&self) -> TouchState {
        self.state.get()
    }

    fn listen<T: EventTarget + ?Sized>(
        &self,
        target: &T,
        name: &str,
        options: ListenerOptions,
        update: fn(&mut TouchState, &InputEvent),
    ) {
        let state = Rc::clone(&self.state);
        target.add_event_listener(
            name,
            Box::new(move |ev| {
                let mut s = state.get();
                update(&mut s, ev);
                state.set(s);
            }),
            options,
        );
    }
}
