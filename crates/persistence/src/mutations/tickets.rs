// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Finishing ticket creation.

use std::collections::HashSet;

use diesel::dsl::max;
use diesel::prelude::*;
use time::Date;
use tinturaria_domain::{
    DomainError, LotLine, LotLineKey, Quantity, Section, TicketState, validate_allocation,
    validate_same_client,
};
use tracing::info;

use crate::data_models::{self, CreatedTicket, TicketItem};
use crate::diesel_schema::{lot_lines, ticket_allocations, tickets};
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite;

/// Moves an allocation amount from a lot line's pending balance into a
/// ticket. Only called inside the ticket-creation transaction.
fn allocate(
    conn: &mut SqliteConnection,
    lot_line_id: i64,
    line: &LotLine,
    amount: &Quantity,
) -> Result<(), PersistenceError> {
    validate_allocation(line, amount)?;

    let updated: Quantity = line.delivered.plus(amount);
    diesel::update(lot_lines::table.filter(lot_lines::lot_line_id.eq(lot_line_id)))
        .set((
            lot_lines::delivered_rolls.eq(updated.rolls),
            lot_lines::delivered_weight.eq(updated.weight),
        ))
        .execute(conn)?;
    Ok(())
}

/// Creates a finishing ticket from one or more lot line allocations.
///
/// One transaction computes the next per-section ticket number, validates
/// every item against freshly-read lot lines, inserts the header and the
/// allocation rows, and increments the delivered counters. Any rejection
/// aborts the whole transaction with no observable write.
///
/// # Errors
///
/// Returns `EmptyTicket`, `DuplicateLotLine`, `MixedClients`,
/// `OverAllocation`, `LotLineNotFound`, or a database error.
pub(crate) fn create_ticket(
    conn: &mut SqliteConnection,
    section: Section,
    created_on: Date,
    note: &str,
    items: &[TicketItem],
) -> Result<CreatedTicket, PersistenceError> {
    if items.is_empty() {
        return Err(DomainError::EmptyTicket.into());
    }

    let section_raw: i32 = i32::from(section.value());
    let created: String = data_models::format_date(created_on)?;

    conn.transaction::<CreatedTicket, PersistenceError, _>(|conn| {
        // Items are validated against lot lines read once at transaction
        // start, so a repeated key would check twice against the same
        // pending balance. One allocation per lot line per ticket.
        let mut seen: HashSet<LotLineKey> = HashSet::with_capacity(items.len());
        let mut loaded: Vec<(i64, LotLine)> = Vec::with_capacity(items.len());
        for item in items {
            if !seen.insert(item.lot_line) {
                return Err(DomainError::DuplicateLotLine {
                    lot_line: item.lot_line,
                }
                .into());
            }
            if item.lot_line.section != section {
                return Err(DomainError::InvalidSection(format!(
                    "lot line {} does not belong to section {section}",
                    item.lot_line
                ))
                .into());
            }
            loaded.push(queries::lot_lines::lookup_lot_line(conn, &item.lot_line)?);
        }

        let lines: Vec<LotLine> = loaded.iter().map(|(_, line)| line.clone()).collect();
        validate_same_client(&lines)?;

        let last: Option<i32> = tickets::table
            .filter(tickets::section.eq(section_raw))
            .select(max(tickets::ticket_no))
            .first(conn)?;
        let ticket_no_raw: i32 = last.unwrap_or(0) + 1;

        let totals: Quantity = items
            .iter()
            .fold(Quantity::default(), |acc, item| acc.plus(&item.amount));

        diesel::insert_into(tickets::table)
            .values((
                tickets::section.eq(section_raw),
                tickets::ticket_no.eq(ticket_no_raw),
                tickets::created_on.eq(&created),
                tickets::total_rolls.eq(totals.rolls),
                tickets::total_weight.eq(totals.weight),
                tickets::state.eq(TicketState::Open.as_str()),
                tickets::note.eq(note),
            ))
            .execute(conn)?;
        let ticket_id: i64 = sqlite::get_last_insert_rowid(conn)?;

        for ((lot_line_id, line), item) in loaded.iter().zip(items) {
            allocate(conn, *lot_line_id, line, &item.amount)?;

            diesel::insert_into(ticket_allocations::table)
                .values((
                    ticket_allocations::ticket_id.eq(ticket_id),
                    ticket_allocations::lot_line_id.eq(*lot_line_id),
                    ticket_allocations::rolls.eq(item.amount.rolls),
                    ticket_allocations::weight.eq(item.amount.weight),
                ))
                .execute(conn)?;
        }

        let ticket_no: u32 = data_models::ticket_no_from_row(ticket_no_raw)?;
        info!(
            %section,
            ticket_no,
            allocations = items.len(),
            "Created finishing ticket"
        );

        Ok(CreatedTicket {
            ticket_no,
            created_on,
            totals,
            allocations: items.len(),
        })
    })
}
