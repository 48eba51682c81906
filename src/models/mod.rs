//! Data models for gitnotes.
//!
//! This module contains the session state built once per invocation and the
//! values derived from it for each operation.

mod location;
mod session;

pub use location::ResolvedLocation;
pub use session::{Author, DEFAULT_EDITOR, Session};
