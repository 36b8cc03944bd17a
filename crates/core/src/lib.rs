//! Ticket lifecycle domain logic.
//!
//! Maturity classification, view routing, and department attribution and
//! aggregation over already-fetched record snapshots. This crate performs no
//! I/O and reads no clock; `now` and the current user are always arguments.

pub mod aggregation;
pub mod attribution;
pub mod clock;
pub mod directory;
pub mod error;
pub mod maturity;
pub mod routing;
pub mod task;
pub mod ticket;
pub mod types;
