// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Finishing ticket queries.

use diesel::dsl::sum;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use time::Date;
use tinturaria_domain::{Allocation, DeliveryEvent, LotLineKey, Quantity, Section, Ticket};

use crate::data_models::{self, DeliveryEventRow, TicketDetail, TicketRow};
use crate::diesel_schema::{delivery_events, lot_lines, ticket_allocations, tickets};
use crate::error::PersistenceError;

/// Fetches a ticket by (section, number), or `None` when absent.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or the row fails to
/// decode.
pub(crate) fn lookup_ticket_opt(
    conn: &mut SqliteConnection,
    section: Section,
    ticket_no: u32,
) -> Result<Option<(i64, Ticket)>, PersistenceError> {
    let row: Option<TicketRow> = tickets::table
        .filter(tickets::section.eq(i32::from(section.value())))
        .filter(tickets::ticket_no.eq(data_models::column_from_u32(ticket_no)?))
        .first::<TicketRow>(conn)
        .optional()?;
    row.map(TicketRow::into_domain).transpose()
}

/// Fetches a ticket by (section, number).
///
/// # Errors
///
/// Returns `TicketNotFound` when no such ticket exists.
pub(crate) fn lookup_ticket(
    conn: &mut SqliteConnection,
    section: Section,
    ticket_no: u32,
) -> Result<(i64, Ticket), PersistenceError> {
    lookup_ticket_opt(conn, section, ticket_no)?.ok_or(PersistenceError::TicketNotFound {
        section: section.value(),
        ticket_no,
    })
}

/// Sums the delivery events registered against a ticket.
///
/// The delivered totals are always derived from the event log, never stored
/// as a counter.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub(crate) fn cumulative_delivered(
    conn: &mut SqliteConnection,
    ticket_id: i64,
) -> Result<Quantity, PersistenceError> {
    let (rolls, weight): (Option<i64>, Option<f64>) = delivery_events::table
        .filter(delivery_events::ticket_id.eq(ticket_id))
        .select((sum(delivery_events::rolls), sum(delivery_events::weight)))
        .first(conn)?;

    let rolls: i32 = rolls
        .unwrap_or(0)
        .to_i32()
        .ok_or_else(|| PersistenceError::Other("Cumulative rolls out of range".to_string()))?;
    Ok(Quantity::new(rolls, weight.unwrap_or(0.0)))
}

/// Fetches a ticket joined with its delivery progress, allocations, and the
/// client/article context of its first allocation.
///
/// # Errors
///
/// Returns `TicketNotFound` when no such ticket exists.
pub(crate) fn ticket_detail(
    conn: &mut SqliteConnection,
    section: Section,
    ticket_no: u32,
) -> Result<TicketDetail, PersistenceError> {
    let (ticket_id, ticket) = lookup_ticket(conn, section, ticket_no)?;
    let cumulative_delivered: Quantity = cumulative_delivered(conn, ticket_id)?;

    let rows: Vec<(i32, String, i32, i32, f64, i32, String, String)> = ticket_allocations::table
        .inner_join(lot_lines::table)
        .filter(ticket_allocations::ticket_id.eq(ticket_id))
        .order(ticket_allocations::allocation_id.asc())
        .select((
            lot_lines::section,
            lot_lines::received_on,
            lot_lines::line_no,
            ticket_allocations::rolls,
            ticket_allocations::weight,
            lot_lines::client_id,
            lot_lines::client_name,
            lot_lines::article_description,
        ))
        .load(conn)?;

    let mut client_id: i32 = 0;
    let mut client_name: String = String::new();
    let mut article_description: String = String::new();
    if let Some((_, _, _, _, _, first_client_id, first_client_name, first_article)) = rows.first() {
        client_id = *first_client_id;
        client_name = first_client_name.clone();
        article_description = first_article.clone();
    }

    let mut allocations: Vec<Allocation> = Vec::with_capacity(rows.len());
    for (raw_section, received_on, line_no, rolls, weight, _, _, _) in rows {
        allocations.push(Allocation {
            lot_line: LotLineKey {
                section: data_models::section_from_row(raw_section)?,
                received_on: data_models::parse_date(&received_on)?,
                line_no,
            },
            amount: Quantity::new(rolls, weight),
        });
    }

    let event_rows: Vec<DeliveryEventRow> = delivery_events::table
        .filter(delivery_events::ticket_id.eq(ticket_id))
        .order(delivery_events::line_no.asc())
        .load(conn)?;
    let deliveries: Vec<DeliveryEvent> = event_rows
        .into_iter()
        .map(DeliveryEventRow::into_domain)
        .collect::<Result<_, _>>()?;

    Ok(TicketDetail {
        ticket,
        client_id,
        client_name,
        article_description,
        cumulative_delivered,
        allocations,
        deliveries,
    })
}

/// The most recent ticket (number, creation date) for a section.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub(crate) fn last_ticket(
    conn: &mut SqliteConnection,
    section: Section,
) -> Result<Option<(u32, Date)>, PersistenceError> {
    let row: Option<(i32, String)> = tickets::table
        .filter(tickets::section.eq(i32::from(section.value())))
        .order(tickets::ticket_no.desc())
        .select((tickets::ticket_no, tickets::created_on))
        .first(conn)
        .optional()?;

    match row {
        None => Ok(None),
        Some((ticket_no, created_on)) => Ok(Some((
            data_models::ticket_no_from_row(ticket_no)?,
            data_models::parse_date(&created_on)?,
        ))),
    }
}
