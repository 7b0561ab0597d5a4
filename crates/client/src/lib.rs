//! Hulara Client - WooCommerce store-synchronization client.
//!
//! Everything the Hulara CLI (or any other front end) needs to manage a
//! WooCommerce store: credential storage, an authenticated REST transport,
//! paginated collection fetching, a TTL cache for interactive product
//! listings, a mutation gateway for writes, analytics aggregation, report
//! rows, bulk product creation, and the optional AI chat sidebar.
//!
//! # Architecture
//!
//! - The remote store is the single source of truth. Local copies are
//!   transient: they expire after a fixed TTL and are dropped wholesale
//!   after any successful write.
//! - All I/O is sequential. One request is in flight at a time, with a
//!   courtesy pause between paginated requests. There is no retry,
//!   backoff, or cancellation; a failed call is terminal for that call.
//! - Writes never raise past the mutation gateway: callers receive a
//!   success/failure outcome carrying the decoded body or the raw error
//!   text, and display it verbatim.
//!
//! # Example
//!
//! ```rust,ignore
//! use hulara_client::config::Credentials;
//! use hulara_client::session::Session;
//!
//! let session = Session::connect(credentials).await?;
//! let page = session.cache().page(1, 20).await?;
//! println!("{} of {} products", page.products.len(), page.total);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod ai;
pub mod analytics;
pub mod bulk;
pub mod commands;
pub mod config;
pub mod report;
pub mod session;
pub mod woo;
