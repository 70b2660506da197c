//! Prelude module for card_expiry crate.
//!
//! Re-exports the derive macros used across the crate.

pub use derive_more::Display;
