// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Pointer: one handler per interaction across mouse, touch and pen.
//!
//! ## Overview
//!
//! Hosts report the same gesture through several event streams. A tap on a
//! hybrid device fires touch events and then mouse events; pointer events fire
//! for every kind of input. This crate registers native listeners so that an
//! application handler bound to an interaction runs once per interaction and
//! not once per stream.
//!
//! It does not detect device capabilities. Feed it a [`DeviceProfile`](crate::profile::DeviceProfile)
//! and whether the host supports passive listeners; both are fixed for the
//! life of the process.
//!
//! ## Keys
//!
//! Handlers are registered under configuration keys such as
//! `"touchstart capture passive"` or `"mousedown touchstart setWithHybrid"`.
//! See [`key`](crate::key) for the grammar. Unknown tokens are treated as event
//! names, so custom events pass straight through.
//!
//! ## Strategies
//!
//! The [`Strategy`](crate::strategy::Strategy) is selected from the profile:
//!
//! - Mouse-only: mouse listeners.
//! - Touch-only: touch listeners; `click` fires on a short tap without waiting for the host's delayed click.
//! - Hybrid: touch-only behavior plus mouse listeners that ignore mouse events caused by touch.
//! - Pointer: pointer listeners filtered by reported pointer type.
//! - Inert: nothing is registered.
//!
//! ## Workflow
//!
//! 1) Build a [`Dispatcher`](crate::dispatcher::Dispatcher) from the profile.
//! 2) Implement [`EventTarget`](crate::types::EventTarget) for your host's
//!    targets, or enable `web_adapter` and use [`adapters::web`](crate::adapters).
//! 3) Call [`Dispatcher::register`](crate::dispatcher::Dispatcher::register)
//!    with a target and `(key, handler)` pairs.
//!
//! The host delivers [`InputEvent`](crate::types::InputEvent)s to the native
//! listeners on a single thread. Timing rules compare event timestamps, so a
//! handler's behavior depends only on the order and stamps of the events.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatcher;
pub mod key;
pub mod names;
pub mod profile;
pub mod strategy;
pub mod touch;
pub mod types;

#[cfg(test)]
mod testing;
