//! Data-access boundary.
//!
//! Listings arrive with inconsistent field names (`createdAt` vs
//! `created_at`, `department` as a name, id, or object, ids as numbers or
//! strings). This crate maps every known spelling onto the canonical
//! `ticketdesk_core` records so the domain logic never sees an alias.

pub mod directory;
pub mod error;
pub mod models;
pub mod normalize;
pub mod snapshot;
pub mod status;

pub use directory::UserDirectory;
pub use error::RecordError;
pub use snapshot::{RawSnapshot, Snapshot};
