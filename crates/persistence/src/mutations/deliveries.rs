// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery event registration.

use diesel::dsl::max;
use diesel::prelude::*;
use tinturaria_domain::{
    DomainError, Quantity, Section, TicketState, validate_delivery_amount,
    validate_delivery_within,
};
use tracing::info;

use crate::data_models::{self, DeliveryOutcome};
use crate::diesel_schema::{delivery_events, tickets};
use crate::error::PersistenceError;
use crate::queries;

/// Registers a partial delivery against an open ticket.
///
/// One transaction re-reads the ticket, derives the cumulative delivered
/// totals from the event log, validates the new amount against the ticket
/// totals, appends the event, and transitions the ticket to `completed` when
/// both cumulative axes reach the totals.
///
/// # Errors
///
/// Returns `TicketNotFound`, `TicketCompleted`, `DeliveryStateNotFound`,
/// `OverDelivery`, or an invalid-quantity error.
pub(crate) fn register_delivery(
    conn: &mut SqliteConnection,
    section: Section,
    ticket_no: u32,
    amount: Quantity,
    state_id: i32,
    note: &str,
) -> Result<DeliveryOutcome, PersistenceError> {
    validate_delivery_amount(&amount)?;

    conn.transaction::<DeliveryOutcome, PersistenceError, _>(|conn| {
        let (ticket_id, ticket) = queries::tickets::lookup_ticket(conn, section, ticket_no)?;
        if ticket.state == TicketState::Completed {
            return Err(DomainError::TicketCompleted { ticket_no }.into());
        }
        if !queries::lookups::delivery_state_known(conn, state_id)? {
            return Err(PersistenceError::DeliveryStateNotFound(state_id));
        }

        let cumulative: Quantity = queries::tickets::cumulative_delivered(conn, ticket_id)?;
        validate_delivery_within(ticket_no, &cumulative, &amount, &ticket.totals)?;

        let last: Option<i32> = delivery_events::table
            .filter(delivery_events::ticket_id.eq(ticket_id))
            .select(max(delivery_events::line_no))
            .first(conn)?;
        let line_no: i32 = last.unwrap_or(0) + 1;

        let delivered_on: String = data_models::format_date(data_models::today())?;
        diesel::insert_into(delivery_events::table)
            .values((
                delivery_events::ticket_id.eq(ticket_id),
                delivery_events::line_no.eq(line_no),
                delivery_events::delivered_on.eq(&delivered_on),
                delivery_events::rolls.eq(amount.rolls),
                delivery_events::weight.eq(amount.weight),
                delivery_events::state_id.eq(state_id),
                delivery_events::note.eq(note),
            ))
            .execute(conn)?;

        let updated: Quantity = cumulative.plus(&amount);
        let completed: bool =
            updated.rolls >= ticket.totals.rolls && updated.weight >= ticket.totals.weight;
        if completed {
            diesel::update(tickets::table.filter(tickets::ticket_id.eq(ticket_id)))
                .set(tickets::state.eq(TicketState::Completed.as_str()))
                .execute(conn)?;
        }

        let state: TicketState = if completed {
            TicketState::Completed
        } else {
            TicketState::Open
        };
        info!(%section, ticket_no, line_no, %state, "Registered delivery event");

        Ok(DeliveryOutcome {
            line_no,
            cumulative: updated,
            state,
        })
    })
}
