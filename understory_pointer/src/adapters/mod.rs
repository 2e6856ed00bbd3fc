// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters binding [`EventTarget`](crate::types::EventTarget) to real hosts.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(feature = "web_adapter")]
pub mod web;
