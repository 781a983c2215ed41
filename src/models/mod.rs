//! Data models for the CampusCircle marketplace.
//!
//! Field names serialize in camelCase to match the web client.

mod offer;
mod request;
mod snapshot;

pub use offer::*;
pub use request::*;
pub use snapshot::*;
