// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the dispatcher: native events, pointer classification, listener options and the host target.
//!
//! ## Overview
//!
//! These types describe the contract with the host's event delivery.
//! The host fires [`InputEvent`]s at listeners it received through [`EventTarget::add_event_listener`];
//! the [`strategy`](crate::strategy) module decides which listeners to register and when they forward to a [`Handler`].

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;

use kurbo::Point;

/// Milliseconds on the host's event clock.
///
/// Every timing rule compares the timestamp of the event being handled against
/// timestamps recorded from earlier events, so only differences matter.
pub type Timestamp = f64;

/// Application callback for one semantic interaction.
///
/// A single handler may back several native listeners (one key can name many
/// events, and the hybrid strategy listens on both touch and mouse), so it is
/// reference counted rather than boxed.
pub type Handler = Rc<dyn Fn(&InputEvent)>;

/// Native listener handed to an [`EventTarget`].
pub type Listener = Box<dyn Fn(&InputEvent)>;

/// Pointer origin reported by a native pointer event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerType {
    /// `"mouse"`.
    Mouse,
    /// `"pen"`.
    Pen,
    /// `"touch"`.
    Touch,
    /// Numeric code from legacy pointer event implementations.
    Legacy(u32),
    /// Any other reported value.
    Unknown,
}

/// Coarse input class used to route pointer events to touch or mouse handlers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerClass {
    /// Mouse input.
    Mouse,
    /// Touch or pen input.
    Touch,
}

impl PointerType {
    /// Parse a reported `pointerType` string.
    pub fn from_name(name: &str) -> Self {
        match name {
            "mouse" => Self::Mouse,
            "pen" => Self::Pen,
            "touch" => Self::Touch,
            _ => Self::Unknown,
        }
    }

    /// Classify this origin, or `None` when it is neither mouse nor touch.
    ///
    /// Pen input counts as touch. Legacy codes `2` and `3` are touch and pen,
    /// `4` is mouse.
    pub fn class(&self) -> Option<PointerClass> {
        match self {
            Self::Touch | Self::Pen | Self::Legacy(2 | 3) => Some(PointerClass::Touch),
            Self::Mouse | Self::Legacy(4) => Some(PointerClass::Mouse),
            Self::Legacy(_) | Self::Unknown => None,
        }
    }
}

/// A native input event as delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct InputEvent {
    /// Native event name, e.g. `touchend` or `pointerdown`.
    pub name: String,
    /// Time the host stamped on the event.
    pub time_stamp: Timestamp,
    /// Reported pointer origin, for pointer events.
    pub pointer_type: Option<PointerType>,
    /// Touch points still active after this event, for touch events.
    pub touches: usize,
    /// Event position in the target's viewport coordinates.
    pub position: Point,
}

impl InputEvent {
    /// Create an event with no pointer origin, no active touches and a zero position.
    pub fn new(name: impl Into<String>, time_stamp: Timestamp) -> Self {
        Self {
            name: name.into(),
            time_stamp,
            pointer_type: None,
            touches: 0,
            position: Point::ZERO,
        }
    }

    /// Set the reported pointer origin.
    pub fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = Some(pointer_type);
        self
    }

    /// Set the number of touch points that remain active.
    pub fn with_touches(mut self, touches: usize) -> Self {
        self.touches = touches;
        self
    }

    /// Set the event position.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Classify the event's pointer origin, if it reported one.
    pub fn pointer_class(&self) -> Option<PointerClass> {
        self.pointer_type.as_ref().and_then(PointerType::class)
    }
}

/// Options passed alongside a native listener registration.
///
/// Hosts without passive listener support only understand the boolean capture
/// form, so the record form is produced only when passive support is known.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListenerOptions {
    /// Boolean capture flag.
    Capture(bool),
    /// Full options record.
    Options {
        /// Listen during the capture phase.
        capture: bool,
        /// Promise never to suppress the default action.
        passive: bool,
    },
}

impl ListenerOptions {
    /// Options for internal touch tracking listeners: passive capture where supported, else capture.
    pub fn tracking(passive_supported: bool) -> Self {
        if passive_supported {
            Self::Options {
                capture: true,
                passive: true,
            }
        } else {
            Self::Capture(true)
        }
    }

    /// Whether these options listen during the capture phase.
    pub fn capture(self) -> bool {
        match self {
            Self::Capture(capture) | Self::Options { capture, .. } => capture,
        }
    }
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self::Capture(false)
    }
}

/// A host object that accepts native listeners.
///
/// Registration is infallible; hosts that can fail report it out of band.
pub trait EventTarget {
    /// Register `listener` for native events called `name`.
    fn add_event_listener(&self, name: &str, listener: Listener, options: ListenerOptions);
}

impl<T: EventTarget + ?Sized> EventTarget for &T {
    fn add_event_listener(&self, name: &str, listener: Listener, options: ListenerOptions) {
        (**self).add_event_listener(name, listener, options);
    }
}
