#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Property-based tests for the client's identifier handling and gating.
//!
//! ```bash
//! cargo test -p medchain_client --test property
//! ```

mod access;
