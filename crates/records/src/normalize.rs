//! Batch normalization of raw listings.
//!
//! Each entry is decoded and converted on its own: an entry that cannot be
//! used is recorded as [`Rejected`] and logged, and the rest of the batch
//! goes through.

use serde::de::DeserializeOwned;
use serde_json::Value;
use ticketdesk_core::directory::{Department, User};
use ticketdesk_core::task::Task;
use ticketdesk_core::ticket::Ticket;

use crate::directory::UserDirectory;
use crate::error::{RecordError, RecordResult};
use crate::models::department::RawDepartment;
use crate::models::task::RawTask;
use crate::models::ticket::RawTicket;
use crate::models::user::RawUser;

/// A listing entry that was dropped during normalization.
#[derive(Debug)]
pub struct Rejected {
    pub entity: &'static str,
    /// Position of the entry in its listing.
    pub index: usize,
    pub error: RecordError,
}

/// Normalized records plus whatever was dropped on the way.
#[derive(Debug)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    pub rejected: Vec<Rejected>,
}

impl<T> Default for Normalized<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

fn normalize_each<R, T, F>(entity: &'static str, values: Vec<Value>, mut convert: F) -> Normalized<T>
where
    R: DeserializeOwned,
    F: FnMut(R) -> RecordResult<T>,
{
    let mut out = Normalized::default();

    for (index, value) in values.into_iter().enumerate() {
        let result = serde_json::from_value::<R>(value)
            .map_err(|source| RecordError::Decode { entity, source })
            .and_then(&mut convert);

        match result {
            Ok(record) => out.records.push(record),
            Err(error) => {
                tracing::warn!(entity, index, error = %error, "Rejected listing entry");
                out.rejected.push(Rejected {
                    entity,
                    index,
                    error,
                });
            }
        }
    }

    out
}

pub fn departments(values: Vec<Value>) -> Normalized<Department> {
    normalize_each("department", values, RawDepartment::into_department)
}

pub fn users(values: Vec<Value>) -> Normalized<User> {
    normalize_each("user", values, RawUser::into_user)
}

/// Normalize tickets, expanding embedded users from `users` and filling the
/// department head from `departments` where the listing left it out.
pub fn tickets(
    values: Vec<Value>,
    users: &UserDirectory,
    departments: &[Department],
) -> Normalized<Ticket> {
    let mut out = normalize_each("ticket", values, |raw: RawTicket| raw.into_ticket(users));
    assign_department_heads(&mut out.records, departments);
    out
}

pub fn tasks(values: Vec<Value>, users: &UserDirectory) -> Normalized<Task> {
    normalize_each("task", values, |raw: RawTask| raw.into_task(users))
}

/// Set `department_head_id` from the department listing on tickets that
/// reference a department directly (by id, loosely, or by name) but carry
/// no head themselves.
pub fn assign_department_heads(tickets: &mut [Ticket], departments: &[Department]) {
    for ticket in tickets.iter_mut().filter(|t| t.department_head_id.is_none()) {
        let department = departments.iter().find(|d| {
            ticket
                .department_id
                .as_ref()
                .is_some_and(|id| id.loose_eq(&d.id))
                || ticket.department_name.as_deref() == Some(d.name.as_str())
        });
        if let Some(head) = department.and_then(|d| d.head_id.clone()) {
            ticket.department_head_id = Some(head);
        }
    }
}
