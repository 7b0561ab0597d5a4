//! Shared domain types.

mod id;
mod status;

pub use id::*;
pub use status::*;
