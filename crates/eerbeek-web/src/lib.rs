// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP surface of the ICT Eerbeek website.
//!
//! Serves the marketing pages, accepts contact-form submissions on
//! `POST /contact` and relays chat messages to the optional chat adapter.
//! The store and chat adapter are injected through [`WebState`], so tests
//! and the binary wire the same router with different backends.

pub mod handlers;
pub mod pages;
pub mod server;

pub use pages::{Page, PageRenderer};
pub use server::{HealthState, WebState, router, start_server};
