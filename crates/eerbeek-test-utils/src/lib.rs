// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for ICT Eerbeek integration tests.
//!
//! Provides mock adapters and a test harness for fast, deterministic tests
//! without external services.
//!
//! # Components
//!
//! - [`MockStorage`] - In-memory contact store with a failure switch
//! - [`MockChat`] - Chat adapter with pre-configured replies
//! - [`TestHarness`] - The full router wired to a temp SQLite store or mocks

pub mod harness;
pub mod mock_chat;
pub mod mock_storage;

pub use harness::TestHarness;
pub use mock_chat::MockChat;
pub use mock_storage::MockStorage;
