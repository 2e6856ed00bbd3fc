// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration key parsing.
//!
//! ## Grammar
//!
//! A key is a whitespace separated list of tokens. The tokens `passive`,
//! `capture`, `setWithMouse`, `setWithTouch` and `setWithHybrid` are modifiers.
//! Every other token is an event name, including tokens nobody has heard of:
//! custom events are registered as written.
//!
//! ```
//! use understory_pointer::key::{ParsedKey, Qualifier};
//! use understory_pointer::types::ListenerOptions;
//!
//! let key = ParsedKey::parse("mousedown touchstart capture setWithHybrid", true);
//! assert_eq!(key.events, ["mousedown", "touchstart"]);
//! assert_eq!(key.options, ListenerOptions::Capture(true));
//! assert_eq!(key.qualifier, Some(Qualifier::WithHybrid));
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::ListenerOptions;

bitflags::bitflags! {
    /// Modifier tokens present in a key.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// `passive`.
        const PASSIVE         = 0b0000_0001;
        /// `capture`.
        const CAPTURE         = 0b0000_0010;
        /// `setWithMouse`.
        const SET_WITH_MOUSE  = 0b0000_0100;
        /// `setWithTouch`.
        const SET_WITH_TOUCH  = 0b0000_1000;
        /// `setWithHybrid`.
        const SET_WITH_HYBRID = 0b0001_0000;
    }
}

impl Modifiers {
    /// The modifier spelled by `token`, if it is one.
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "passive" => Self::PASSIVE,
            "capture" => Self::CAPTURE,
            "setWithMouse" => Self::SET_WITH_MOUSE,
            "setWithTouch" => Self::SET_WITH_TOUCH,
            "setWithHybrid" => Self::SET_WITH_HYBRID,
            _ => return None,
        })
    }

    /// Listener options these modifiers ask for.
    ///
    /// The record form is only used when `passive` was requested and the host
    /// supports it; otherwise hosts get the plain capture flag.
    pub fn listener_options(self, passive_supported: bool) -> ListenerOptions {
        let capture = self.contains(Self::CAPTURE);
        if self.contains(Self::PASSIVE) && passive_supported {
            ListenerOptions::Options {
                capture,
                passive: true,
            }
        } else {
            ListenerOptions::Capture(capture)
        }
    }

    /// Strategy restriction these modifiers ask for.
    ///
    /// `setWithHybrid` wins over everything. `setWithMouse` together with
    /// `setWithTouch` cancels out to no restriction.
    pub fn qualifier(self) -> Option<Qualifier> {
        let mouse = self.contains(Self::SET_WITH_MOUSE);
        let touch = self.contains(Self::SET_WITH_TOUCH);
        if self.contains(Self::SET_WITH_HYBRID) {
            Some(Qualifier::WithHybrid)
        } else if mouse && !touch {
            Some(Qualifier::WithMouse)
        } else if touch && !mouse {
            Some(Qualifier::WithTouch)
        } else {
            None
        }
    }
}

/// Restricts which dispatch strategy acts on a key's handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Qualifier {
    /// Only the mouse-only strategy, and force registration there.
    WithMouse,
    /// Only the touch-only strategy, and force registration there.
    WithTouch,
    /// Only the hybrid strategy.
    WithHybrid,
}

/// A configuration key broken into events, listener options and qualifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedKey {
    /// Event names in first-seen order, without duplicates.
    pub events: Vec<String>,
    /// Options for every native listener registered for this key.
    pub options: ListenerOptions,
    /// Strategy restriction, if any.
    pub qualifier: Option<Qualifier>,
}

impl ParsedKey {
    /// Parse `key`. Never fails.
    pub fn parse(key: &str, passive_supported: bool) -> Self {
        let mut modifiers = Modifiers::empty();
        let mut events: Vec<String> = Vec::new();
        for token in key.split_whitespace() {
            match Modifiers::from_token(token) {
                Some(m) => modifiers |= m,
                None if events.iter().any(|e| e == token) => {}
                None => events.push(String::from(token)),
            }
        }
        Self {
            events,
            options: modifiers.listener_options(passive_supported),
            qualifier: modifiers.qualifier(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_passive_with_support() {
        let key = ParsedKey::parse("touchstart capture passive", true);
        assert_eq!(key.events, ["touchstart"]);
        assert_eq!(
            key.options,
            ListenerOptions::Options {
                capture: true,
                passive: true
            }
        );
        assert_eq!(key.qualifier, None);
    }

    #[test]
    fn capture_passive_without_support() {
        let key = ParsedKey::parse("touchstart capture passive", false);
        assert_eq!(key.events, ["touchstart"]);
        assert_eq!(key.options, ListenerOptions::Capture(true));
    }

    #[test]
    fn passive_without_capture() {
        let key = ParsedKey::parse("passive touchmove", true);
        assert_eq!(
            key.options,
            ListenerOptions::Options {
                capture: false,
                passive: true
            }
        );
        assert_eq!(
            ParsedKey::parse("touchmove", true).options,
            ListenerOptions::Capture(false)
        );
    }

    #[test]
    fn unknown_tokens_are_event_names() {
        let key = ParsedKey::parse("  my-drag\tcapture  Passive click ", true);
        assert_eq!(key.events, ["my-drag", "Passive", "click"]);
        assert_eq!(key.options, ListenerOptions::Capture(true));
    }

    #[test]
    fn duplicate_events_collapse() {
        let key = ParsedKey::parse("click click mouseup", false);
        assert_eq!(key.events, ["click", "mouseup"]);
    }

    #[test]
    fn modifiers_only_key_has_no_events() {
        let key = ParsedKey::parse("capture passive", true);
        assert!(key.events.is_empty());
    }

    #[test]
    fn qualifier_precedence() {
        let q = |key: &str| ParsedKey::parse(key, true).qualifier;
        assert_eq!(q("click setWithMouse"), Some(Qualifier::WithMouse));
        assert_eq!(q("click setWithTouch"), Some(Qualifier::WithTouch));
        assert_eq!(q("click setWithHybrid"), Some(Qualifier::WithHybrid));
        assert_eq!(
            q("click setWithMouse setWithHybrid"),
            Some(Qualifier::WithHybrid)
        );
        assert_eq!(
            q("click setWithTouch setWithMouse setWithHybrid"),
            Some(Qualifier::WithHybrid)
        );
        assert_eq!(q("click setWithMouse setWithTouch"), None);
        assert_eq!(q("click"), None);
    }

    #[test]
    fn modifier_tokens_are_case_sensitive() {
        assert_eq!(Modifiers::from_token("capture"), Some(Modifiers::CAPTURE));
        assert_eq!(Modifiers::from_token("Capture"), None);
        assert_eq!(Modifiers::from_token("setwithmouse"), None);
    }
}
