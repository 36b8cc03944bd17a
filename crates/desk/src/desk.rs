//! The desk facade.
//!
//! Pulls listings from a [`DeskSource`], reads `now` from a [`Clock`] once
//! per call, and hands both to the pure functions in `ticketdesk_core`.

use serde::Serialize;
use ticketdesk_core::aggregation::{self, DepartmentStats, SummaryReport};
use ticketdesk_core::attribution::DateWindow;
use ticketdesk_core::clock::Clock;
use ticketdesk_core::maturity::{self, Maturity, MaturityThresholds};
use ticketdesk_core::routing::{self, ViewCounts, ViewTab};
use ticketdesk_core::ticket::Ticket;
use ticketdesk_core::types::Timestamp;

use crate::error::DeskResult;
use crate::source::DeskSource;

/// A ticket as shown in a list view, with its maturity badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketRow {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub maturity: Option<Maturity>,
}

/// Department report over one date window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentReport {
    pub generated_at: Timestamp,
    pub window: DateWindow,
    pub summary: SummaryReport,
    pub organization: DepartmentStats,
}

#[derive(Debug)]
pub struct Desk<S, C> {
    source: S,
    clock: C,
    thresholds: MaturityThresholds,
}

impl<S: DeskSource, C: Clock> Desk<S, C> {
    /// Fails when `thresholds` do not validate.
    pub fn new(source: S, clock: C, thresholds: MaturityThresholds) -> DeskResult<Self> {
        thresholds.validate()?;
        Ok(Self {
            source,
            clock,
            thresholds,
        })
    }

    /// Tickets for `tab`, filtered and classified.
    pub fn ticket_view(
        &self,
        tab: ViewTab,
        search_text: &str,
        status_filter: &str,
    ) -> DeskResult<Vec<TicketRow>> {
        let user_id = self.source.current_user()?;
        let tickets = self.source.tickets()?;
        let forwarded = self.source.forwarded_tickets()?;
        let now = self.clock.now();

        let rows: Vec<TicketRow> = routing::route(
            &tickets,
            &forwarded,
            search_text,
            status_filter,
            tab,
            &user_id,
        )
        .into_iter()
        .map(|ticket| TicketRow {
            maturity: maturity::classify_with(ticket, now, &self.thresholds),
            ticket: ticket.clone(),
        })
        .collect();

        tracing::debug!(
            ?tab,
            user_id = %user_id,
            rows = rows.len(),
            "Ticket view built",
        );
        Ok(rows)
    }

    pub fn view_counts(&self) -> DeskResult<ViewCounts> {
        let user_id = self.source.current_user()?;
        let tickets = self.source.tickets()?;
        let forwarded = self.source.forwarded_tickets()?;
        Ok(routing::view_counts(&tickets, &forwarded, &user_id))
    }

    /// The window covering the last `days` days up to now.
    pub fn default_window(&self, days: u32) -> DateWindow {
        DateWindow::last_days(self.clock.now(), days)
    }

    pub fn department_report(&self, window: &DateWindow) -> DeskResult<DepartmentReport> {
        let tasks = self.source.tasks()?;
        let tickets = self.source.tickets()?;
        let departments = self.source.departments()?;
        let now = self.clock.now();

        let summary = aggregation::summarize_report(&tasks, &tickets, &departments, window, now);
        let organization = aggregation::organization_stats(&tasks, &tickets, window, now);

        tracing::info!(
            departments = summary.departments.len(),
            degraded = summary.degraded_departments.len(),
            unattributed_tasks = summary.unattributed_tasks,
            unattributed_tickets = summary.unattributed_tickets,
            "Department report generated",
        );

        Ok(DepartmentReport {
            generated_at: now,
            window: *window,
            summary,
            organization,
        })
    }
}
