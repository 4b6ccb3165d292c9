//! Shared identifier rules for the MedChain ledger and its client.
//!
//! This crate provides:
//! - [`formats`]: byte-level checks for the national identity number and
//!   the account address format, usable from `no_std` contract code and from
//!   the host-side client alike.

#![cfg_attr(not(feature = "std"), no_std)]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod formats;

pub use formats::*;
