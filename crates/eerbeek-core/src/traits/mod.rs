// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` so they can be shared as `Arc<dyn _>` in handler state.

pub mod adapter;
pub mod chat;
pub mod storage;

pub use adapter::PluginAdapter;
pub use chat::ChatAdapter;
pub use storage::StorageAdapter;
