//! Per-department task and ticket statistics.
//!
//! Records are first restricted to the date window, then bucketed into the
//! first department they are attributed to. Each bucket is summarized
//! independently; a bucket that cannot be summarized degrades to zeroed
//! stats without affecting the others.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::attribution::{attribute, Attributable, DateWindow};
use crate::directory::Department;
use crate::error::CoreError;
use crate::task::{Task, TaskStatus};
use crate::ticket::{Ticket, TicketStatus};
use crate::types::{RecordId, RecordTime, Timestamp};

/// Label used for the organization-wide totals row.
pub const ORGANIZATION_LABEL: &str = "All departments";

const SECS_PER_HOUR: f64 = 3600.0;

// ---------------------------------------------------------------------------
// Stats types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub in_progress: usize,
    /// Not completed and past due.
    pub overdue: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketStats {
    pub total: usize,
    /// Tickets in the `completed` status.
    pub resolved: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub declined: usize,
}

/// Summary figures for one department (or the whole organization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentStats {
    pub department_name: String,
    pub tasks: TaskStats,
    pub tickets: TicketStats,
    /// `completed / total`, `0.0` when there are no tasks.
    pub task_completion_rate: f64,
    /// `resolved / total`, `0.0` when there are no tickets.
    pub ticket_resolution_rate: f64,
    /// Mean hours from creation to completion over completed tasks with a
    /// completion time. `None` when there are none.
    pub average_task_completion_hours: Option<f64>,
}

impl DepartmentStats {
    /// All-zero stats.
    pub fn empty(department_name: impl Into<String>) -> Self {
        Self {
            department_name: department_name.into(),
            tasks: TaskStats::default(),
            tickets: TicketStats::default(),
            task_completion_rate: 0.0,
            ticket_resolution_rate: 0.0,
            average_task_completion_hours: None,
        }
    }
}

/// Full aggregation result, including attribution diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Stats per department id, in department listing order.
    pub departments: IndexMap<RecordId, DepartmentStats>,
    /// In-window tasks no department claimed.
    pub unattributed_tasks: usize,
    /// In-window tickets no department claimed.
    pub unattributed_tickets: usize,
    /// In-window records that matched more than one department.
    pub ambiguous_records: usize,
    /// Departments whose stats were replaced by zeroes.
    pub degraded_departments: Vec<RecordId>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `part / total`, or `0.0` for an empty total.
pub fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

fn valid_time(
    record: &impl Attributable,
    field: &'static str,
    time: &RecordTime,
) -> Result<Timestamp, CoreError> {
    match time {
        RecordTime::Valid(ts) => Ok(*ts),
        RecordTime::Malformed(raw) => Err(CoreError::MalformedTimestamp {
            entity: record.entity(),
            id: record.record_id().clone(),
            field,
            value: raw.clone(),
        }),
    }
}

fn task_stats(tasks: &[&Task], now: Timestamp) -> Result<TaskStats, CoreError> {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };

    for task in tasks {
        match task.status {
            TaskStatus::Completed => stats.completed += 1,
            TaskStatus::Pending => stats.pending += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
        }

        if let Some(due) = &task.due_date {
            let due = valid_time(*task, "due_date", due)?;
            if due < now && task.status != TaskStatus::Completed {
                stats.overdue += 1;
            }
        }
    }

    Ok(stats)
}

fn ticket_stats(tickets: &[&Ticket]) -> TicketStats {
    let mut stats = TicketStats {
        total: tickets.len(),
        ..TicketStats::default()
    };

    for ticket in tickets {
        match ticket.status {
            TicketStatus::Completed => stats.resolved += 1,
            TicketStatus::Pending => stats.pending += 1,
            TicketStatus::InProgress => stats.in_progress += 1,
            TicketStatus::Declined => stats.declined += 1,
        }
    }

    stats
}

/// Mean creation-to-completion time in hours over completed tasks that carry
/// a completion time.
fn average_completion_hours(tasks: &[&Task]) -> Result<Option<f64>, CoreError> {
    let mut total_secs = 0.0;
    let mut count = 0usize;

    for task in tasks.iter().filter(|t| t.status == TaskStatus::Completed) {
        let Some(completed_at) = &task.completed_at else {
            continue;
        };
        let completed_at = valid_time(*task, "completed_at", completed_at)?;
        let created_at = valid_time(*task, "created_at", &task.created_at)?;

        if completed_at < created_at {
            return Err(CoreError::Inconsistent {
                entity: "task",
                id: task.id.clone(),
                reason: format!("completed_at {completed_at} precedes created_at {created_at}"),
            });
        }

        total_secs += (completed_at - created_at).num_seconds() as f64;
        count += 1;
    }

    if count == 0 {
        Ok(None)
    } else {
        Ok(Some(total_secs / count as f64 / SECS_PER_HOUR))
    }
}

/// Summarize one bucket of records.
///
/// Fails on a malformed due/completion date or a completion time that
/// precedes creation.
pub fn compute_stats(
    name: &str,
    tasks: &[&Task],
    tickets: &[&Ticket],
    now: Timestamp,
) -> Result<DepartmentStats, CoreError> {
    let task_counts = task_stats(tasks, now)?;
    let ticket_counts = ticket_stats(tickets);

    Ok(DepartmentStats {
        department_name: name.to_string(),
        task_completion_rate: ratio(task_counts.completed, task_counts.total),
        ticket_resolution_rate: ratio(ticket_counts.resolved, ticket_counts.total),
        average_task_completion_hours: average_completion_hours(tasks)?,
        tasks: task_counts,
        tickets: ticket_counts,
    })
}

// ---------------------------------------------------------------------------
// Bucketing
// ---------------------------------------------------------------------------

/// Outcome of attributing one record against the department listing.
struct Placement {
    /// Index of the first matching department.
    first: Option<usize>,
    /// Total number of departments that matched.
    matches: usize,
}

fn place<R: Attributable>(record: &R, departments: &[&Department]) -> Placement {
    let mut first = None;
    let mut matches = 0;
    for (idx, department) in departments.iter().enumerate() {
        if attribute(record, *department) {
            matches += 1;
            first.get_or_insert(idx);
        }
    }
    Placement { first, matches }
}

/// Bucket in-window records by first matching department.
///
/// Returns the buckets plus the unattributed and ambiguous counts.
fn bucket<'r, R: Attributable>(
    records: &'r [R],
    departments: &[&Department],
    window: &DateWindow,
) -> (Vec<Vec<&'r R>>, usize, usize) {
    let mut buckets: Vec<Vec<&R>> = vec![Vec::new(); departments.len()];
    let mut unattributed = 0;
    let mut ambiguous = 0;

    for record in records.iter().filter(|r| window.admits(*r)) {
        let placement = place(record, departments);
        if placement.matches > 1 {
            ambiguous += 1;
            tracing::warn!(
                entity = record.entity(),
                record_id = %record.record_id(),
                matches = placement.matches,
                "Record matches several departments; using the first",
            );
        }
        match placement.first {
            Some(idx) => buckets[idx].push(record),
            None => unattributed += 1,
        }
    }

    (buckets, unattributed, ambiguous)
}

/// Drop departments whose id repeats an earlier one (loosely compared).
fn distinct_departments(departments: &[Department]) -> Vec<&Department> {
    let mut out: Vec<&Department> = Vec::with_capacity(departments.len());
    for department in departments {
        if out.iter().any(|d| d.id.loose_eq(&department.id)) {
            tracing::warn!(
                department_id = %department.id,
                department_name = %department.name,
                "Duplicate department id ignored",
            );
            continue;
        }
        out.push(department);
    }
    out
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Per-department stats with attribution diagnostics.
///
/// Every department appears in the result, in listing order, even when no
/// record is attributed to it.
pub fn summarize_report(
    tasks: &[Task],
    tickets: &[Ticket],
    departments: &[Department],
    window: &DateWindow,
    now: Timestamp,
) -> SummaryReport {
    let departments = distinct_departments(departments);
    let (task_buckets, unattributed_tasks, ambiguous_tasks) = bucket(tasks, &departments, window);
    let (ticket_buckets, unattributed_tickets, ambiguous_tickets) =
        bucket(tickets, &departments, window);

    let mut stats = IndexMap::with_capacity(departments.len());
    let mut degraded_departments = Vec::new();

    for (idx, department) in departments.iter().enumerate() {
        let entry = match compute_stats(
            &department.name,
            &task_buckets[idx],
            &ticket_buckets[idx],
            now,
        ) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(
                    department_id = %department.id,
                    error = %e,
                    "Department stats failed; reporting zeroes",
                );
                degraded_departments.push(department.id.clone());
                DepartmentStats::empty(department.name.clone())
            }
        };
        stats.insert(department.id.clone(), entry);
    }

    tracing::debug!(
        departments = stats.len(),
        unattributed_tasks,
        unattributed_tickets,
        ambiguous = ambiguous_tasks + ambiguous_tickets,
        degraded = degraded_departments.len(),
        "Department summary computed",
    );

    SummaryReport {
        departments: stats,
        unattributed_tasks,
        unattributed_tickets,
        ambiguous_records: ambiguous_tasks + ambiguous_tickets,
        degraded_departments,
    }
}

/// Per-department stats keyed by department id.
pub fn summarize(
    tasks: &[Task],
    tickets: &[Ticket],
    departments: &[Department],
    window: &DateWindow,
    now: Timestamp,
) -> IndexMap<RecordId, DepartmentStats> {
    summarize_report(tasks, tickets, departments, window, now).departments
}

/// Organization-wide stats over every in-window record, attributed or not.
///
/// Unlike a department bucket, the totals row never degrades as a whole: a
/// task that would fail summarization is left out and logged, and every
/// other record still counts.
pub fn organization_stats(
    tasks: &[Task],
    tickets: &[Ticket],
    window: &DateWindow,
    now: Timestamp,
) -> DepartmentStats {
    let mut skipped = 0usize;
    let tasks: Vec<&Task> = tasks
        .iter()
        .filter(|t| window.admits(*t))
        .filter(|t| match check_task(t, now) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    task_id = %t.id,
                    error = %e,
                    "Task left out of organization stats",
                );
                skipped += 1;
                false
            }
        })
        .collect();
    let tickets: Vec<&Ticket> = tickets.iter().filter(|t| window.admits(*t)).collect();

    if skipped > 0 {
        tracing::debug!(skipped, "Organization stats computed without failing tasks");
    }

    compute_stats(ORGANIZATION_LABEL, &tasks, &tickets, now).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Organization stats failed; reporting zeroes");
        DepartmentStats::empty(ORGANIZATION_LABEL)
    })
}

/// Whether a single task can be summarized.
fn check_task(task: &Task, now: Timestamp) -> Result<(), CoreError> {
    task_stats(&[task], now)?;
    average_completion_hours(&[task])?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
