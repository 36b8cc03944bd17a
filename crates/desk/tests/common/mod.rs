#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use ticketdesk_core::clock::FixedClock;
use ticketdesk_core::directory::{Department, User};
use ticketdesk_core::maturity::MaturityThresholds;
use ticketdesk_core::task::{Task, TaskStatus};
use ticketdesk_core::ticket::{Ticket, TicketStatus};
use ticketdesk_core::types::{RecordId, RecordTime, Timestamp};
use ticketdesk_desk::{Desk, DeskError, DeskResult, DeskSource};

/// In-memory listings standing in for the data-access layer.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub tickets: Vec<Ticket>,
    pub forwarded_tickets: Vec<Ticket>,
    pub tasks: Vec<Task>,
    pub departments: Vec<Department>,
    pub current_user: Option<RecordId>,
}

impl DeskSource for MemorySource {
    fn tickets(&self) -> DeskResult<Vec<Ticket>> {
        Ok(self.tickets.clone())
    }

    fn forwarded_tickets(&self) -> DeskResult<Vec<Ticket>> {
        Ok(self.forwarded_tickets.clone())
    }

    fn tasks(&self) -> DeskResult<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn departments(&self) -> DeskResult<Vec<Department>> {
        Ok(self.departments.clone())
    }

    fn current_user(&self) -> DeskResult<RecordId> {
        self.current_user.clone().ok_or(DeskError::NoCurrentUser)
    }
}

/// Fixed "now" shared by every fixture: 2024-06-15 12:00 UTC.
pub fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn hours_ago(hours: i64) -> RecordTime {
    RecordTime::Valid(now() - Duration::hours(hours))
}

pub fn hours_ahead(hours: i64) -> RecordTime {
    RecordTime::Valid(now() + Duration::hours(hours))
}

pub fn days_ago(days: i64) -> RecordTime {
    hours_ago(days * 24)
}

pub fn user_in(id: i64, first: &str, last: &str, department_id: i64) -> User {
    let mut user = User::new(id);
    user.first_name = first.to_string();
    user.last_name = last.to_string();
    user.department_id = Some(RecordId::Num(department_id));
    user
}

pub fn desk(source: MemorySource) -> Desk<MemorySource, FixedClock> {
    Desk::new(source, FixedClock(now()), MaturityThresholds::default()).unwrap()
}

// ---------------------------------------------------------------------------
// Fixture: user 7 heads IT
// ---------------------------------------------------------------------------

pub fn departments() -> Vec<Department> {
    let mut it = Department::new(1, "IT");
    it.head_id = Some(RecordId::Num(7));
    let mut hr = Department::new(2, "HR");
    hr.head_id = Some(RecordId::Num(8));
    let legal = Department::new("3", "Legal");
    vec![it, hr, legal]
}

/// Ticket listing as seen by user 7.
///
/// | id | creator | status      | relation to 7                   |
/// |----|---------|-------------|---------------------------------|
/// | 1  | 7       | pending     | sent, due in 12h                |
/// | 2  | 3       | in_progress | assigned to 7, 100h old         |
/// | 3  | 4       | completed   | 7 heads the department          |
/// | 4  | 7       | in_progress | sent and forwarded, 200h old    |
/// | 6  | 6       | declined    | assigned to 7, 40 days old      |
pub fn tickets() -> Vec<Ticket> {
    let mut t1 = Ticket::new(1, "Printer jammed", TicketStatus::Pending, hours_ago(10), 7);
    t1.due_date = Some(hours_ahead(12));
    t1.department_id = Some(RecordId::Num(1));

    let mut t2 = Ticket::new(2, "VPN access", TicketStatus::InProgress, hours_ago(100), 3);
    t2.creator = Some(user_in(3, "Sam", "Lee", 2));
    t2.assignee_id = Some(RecordId::from("7"));
    t2.department_id = Some(RecordId::Num(2));

    let mut t3 = Ticket::new(3, "Payroll question", TicketStatus::Completed, days_ago(5), 4);
    t3.department_id = Some(RecordId::Num(1));
    t3.department_head_id = Some(RecordId::Num(7));

    let mut t4 = Ticket::new(4, "Laptop refresh", TicketStatus::InProgress, hours_ago(200), 7);
    t4.is_forwarded = true;
    t4.forwarded_to_id = Some(RecordId::Num(9));
    t4.department_name = Some("HR".to_string());

    let mut t6 = Ticket::new(6, "Old declined request", TicketStatus::Declined, days_ago(40), 6);
    t6.assignee_id = Some(RecordId::Num(7));
    t6.department_id = Some(RecordId::Num(1));

    vec![t1, t2, t3, t4, t6]
}

/// Separately fetched forwarded listing. Ticket 4 repeats an entry of
/// [`tickets`].
pub fn forwarded_tickets() -> Vec<Ticket> {
    let mut t4 = Ticket::new(4, "Laptop refresh (copy)", TicketStatus::InProgress, hours_ago(200), 7);
    t4.is_forwarded = true;

    let mut t5 = Ticket::new(5, "Contract review", TicketStatus::Pending, hours_ago(1), 5);
    t5.forwarded_from_id = Some(RecordId::Num(7));

    vec![t4, t5]
}

/// Tasks for the department report.
///
/// | id | department       | status      | notes                       |
/// |----|------------------|-------------|-----------------------------|
/// | 1  | IT (direct id)   | completed   | took 24h                    |
/// | 2  | HR (assignee)    | pending     | overdue by a day            |
/// | 3  | IT (direct name) | in_progress | due in two days             |
/// | 4  | none             | pending     |                             |
/// | 5  | IT               | completed   | 60 days old, outside window |
pub fn tasks() -> Vec<Task> {
    let mut k1 = Task::new(1, TaskStatus::Completed, days_ago(10));
    k1.department_id = Some(RecordId::Num(1));
    k1.completed_at = Some(days_ago(9));

    let mut k2 = Task::new(2, TaskStatus::Pending, days_ago(5));
    k2.assigned_to = Some(user_in(11, "Ana", "Ruiz", 2));
    k2.due_date = Some(days_ago(1));

    let mut k3 = Task::new(3, TaskStatus::InProgress, days_ago(3));
    k3.department_name = Some("IT".to_string());
    k3.due_date = Some(hours_ahead(48));

    let k4 = Task::new(4, TaskStatus::Pending, days_ago(2));

    let mut k5 = Task::new(5, TaskStatus::Completed, days_ago(60));
    k5.department_id = Some(RecordId::Num(1));
    k5.completed_at = Some(days_ago(59));

    vec![k1, k2, k3, k4, k5]
}

pub fn source() -> MemorySource {
    MemorySource {
        tickets: tickets(),
        forwarded_tickets: forwarded_tickets(),
        tasks: tasks(),
        departments: departments(),
        current_user: Some(RecordId::from("7")),
    }
}
