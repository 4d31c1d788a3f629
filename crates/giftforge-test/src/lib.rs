//! Shared test fixtures for GiftForge crates.
//!
//! This crate provides data types and pure functions for testing.
//! It depends only on `giftforge-core` so the engine can use it as a
//! dev-dependency without a cycle.
//!
//! - [`roster`] - named participant rosters
//! - [`exhaustive`] - brute-force enumeration of valid assignments
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! giftforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use giftforge_test::roster::{named_roster, ids};
//! use giftforge_test::exhaustive::enumerate_valid;
//! ```

pub mod exhaustive;
pub mod roster;

pub use exhaustive::{cycle_count, enumerate_valid, is_feasible};
pub use roster::{ids, named_roster, roster};
