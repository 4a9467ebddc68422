//! Shared types for the webpane workspace: session identifiers and the
//! error taxonomy used across the adapter crates.

pub mod errors;
pub mod id;

pub use errors::{CommandError, WidgetError};
pub use id::SessionId;
