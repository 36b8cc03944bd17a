//! Raw record DTOs.
//!
//! Each submodule contains a `Deserialize` struct that accepts every field
//! spelling the listings are known to use, and a conversion into the
//! canonical `ticketdesk_core` record.

pub mod common;
pub mod department;
pub mod task;
pub mod ticket;
pub mod user;
