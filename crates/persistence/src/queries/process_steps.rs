// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Process step queries.

use diesel::prelude::*;
use tinturaria_domain::{ProcessStep, Section};

use crate::data_models::ProcessStepRow;
use crate::diesel_schema::process_steps;
use crate::error::PersistenceError;
use crate::queries::tickets::lookup_ticket;

/// Lists the process steps of a ticket, ordered by line number.
///
/// Plain SELECT, recomputed per call.
///
/// # Errors
///
/// Returns `TicketNotFound` when the ticket does not exist.
pub(crate) fn list_steps(
    conn: &mut SqliteConnection,
    section: Section,
    ticket_no: u32,
) -> Result<Vec<ProcessStep>, PersistenceError> {
    let (ticket_id, _) = lookup_ticket(conn, section, ticket_no)?;
    let rows: Vec<ProcessStepRow> = process_steps::table
        .filter(process_steps::ticket_id.eq(ticket_id))
        .order(process_steps::line_no.asc())
        .load(conn)?;
    rows.into_iter().map(ProcessStepRow::into_domain).collect()
}
