// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Process step mutations.

use diesel::dsl::max;
use diesel::prelude::*;
use tinturaria_domain::Section;
use tracing::debug;

use crate::data_models::{self, NewProcessStep};
use crate::diesel_schema::process_steps;
use crate::error::PersistenceError;
use crate::queries::tickets::lookup_ticket;

/// Appends a process step to a ticket, numbering it after the highest
/// existing line.
///
/// Step quantities are informational and not validated against the ticket
/// totals.
///
/// # Errors
///
/// Returns `TicketNotFound` when the ticket does not exist.
pub(crate) fn add_step(
    conn: &mut SqliteConnection,
    section: Section,
    ticket_no: u32,
    step: &NewProcessStep,
) -> Result<i32, PersistenceError> {
    conn.transaction::<i32, PersistenceError, _>(|conn| {
        let (ticket_id, _) = lookup_ticket(conn, section, ticket_no)?;

        let last: Option<i32> = process_steps::table
            .filter(process_steps::ticket_id.eq(ticket_id))
            .select(max(process_steps::line_no))
            .first(conn)?;
        let line_no: i32 = last.unwrap_or(0) + 1;

        let recorded_on: String = data_models::format_date(data_models::today())?;

        diesel::insert_into(process_steps::table)
            .values((
                process_steps::ticket_id.eq(ticket_id),
                process_steps::line_no.eq(line_no),
                process_steps::recorded_on.eq(&recorded_on),
                process_steps::process_def_id.eq(step.process_def_id),
                process_steps::color_id.eq(step.color_id),
                process_steps::rolls.eq(step.amount.rolls),
                process_steps::weight.eq(step.amount.weight),
                process_steps::note.eq(&step.note),
            ))
            .execute(conn)?;

        debug!(%section, ticket_no, line_no, "Added process step");
        Ok(line_no)
    })
}

/// Removes exactly one process step from a ticket.
///
/// # Errors
///
/// Returns `TicketNotFound` when the ticket does not exist and
/// `StepNotFound` when the line does not.
pub(crate) fn remove_step(
    conn: &mut SqliteConnection,
    section: Section,
    ticket_no: u32,
    line_no: i32,
) -> Result<(), PersistenceError> {
    let (ticket_id, _) = lookup_ticket(conn, section, ticket_no)?;

    let affected: usize = diesel::delete(
        process_steps::table
            .filter(process_steps::ticket_id.eq(ticket_id))
            .filter(process_steps::line_no.eq(line_no)),
    )
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::StepNotFound { ticket_no, line_no });
    }

    debug!(%section, ticket_no, line_no, "Removed process step");
    Ok(())
}
