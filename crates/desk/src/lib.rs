//! Ticket desk service layer.
//!
//! Wires a data source and a clock to the `ticketdesk_core` domain logic and
//! loads configuration from the environment.

pub mod config;
pub mod desk;
pub mod error;
pub mod source;

pub use config::DeskConfig;
pub use desk::{DepartmentReport, Desk, TicketRow};
pub use error::{DeskError, DeskResult};
pub use source::{load_snapshot, DeskSource};
