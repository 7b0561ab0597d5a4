//! Hulara Core - Shared types library.
//!
//! This crate provides common types used across all Hulara components:
//! - `client` - WooCommerce synchronization client, analytics, and AI chat
//! - `cli` - Command-line front end for store management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and store-domain enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
