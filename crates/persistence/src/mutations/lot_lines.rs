// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lot reception line mutations.

use diesel::dsl::max;
use diesel::prelude::*;
use tinturaria_domain::{LotLine, LotLineKey, Quantity, validate_deletable, validate_requested};
use tracing::info;

use crate::data_models::{self, NewLotLine};
use crate::diesel_schema::lot_lines;
use crate::error::PersistenceError;
use crate::queries;

/// Inserts a lot reception line, computing the next line number scoped to
/// (section, date) inside the same transaction.
///
/// # Errors
///
/// Returns an error if the requested quantities are non-positive or the
/// insert fails.
pub(crate) fn create_lot_line(
    conn: &mut SqliteConnection,
    new: &NewLotLine,
) -> Result<LotLine, PersistenceError> {
    validate_requested(&new.requested)?;

    let received_on: String = data_models::format_date(new.received_on)?;
    let recorded_at: String = data_models::now_timestamp()?;
    let section_raw: i32 = i32::from(new.section.value());

    conn.transaction::<LotLine, PersistenceError, _>(|conn| {
        let last: Option<i32> = lot_lines::table
            .filter(lot_lines::section.eq(section_raw))
            .filter(lot_lines::received_on.eq(&received_on))
            .select(max(lot_lines::line_no))
            .first(conn)?;
        let line_no: i32 = last.unwrap_or(0) + 1;

        diesel::insert_into(lot_lines::table)
            .values((
                lot_lines::section.eq(section_raw),
                lot_lines::received_on.eq(&received_on),
                lot_lines::line_no.eq(line_no),
                lot_lines::client_id.eq(new.client_id),
                lot_lines::client_name.eq(&new.client_name),
                lot_lines::article_code.eq(new.article_code),
                lot_lines::article_description.eq(&new.article_description),
                lot_lines::composition_code.eq(new.composition_code),
                lot_lines::composition_description.eq(&new.composition_description),
                lot_lines::requested_rolls.eq(new.requested.rolls),
                lot_lines::requested_weight.eq(new.requested.weight),
                lot_lines::requisition.eq(&new.requisition),
                lot_lines::recorded_by.eq(&new.recorded_by),
                lot_lines::recorded_at.eq(&recorded_at),
            ))
            .execute(conn)?;

        info!(section = %new.section, line_no, "Created lot reception line");

        Ok(LotLine {
            key: LotLineKey {
                section: new.section,
                received_on: new.received_on,
                line_no,
            },
            client_id: new.client_id,
            client_name: new.client_name.clone(),
            article_code: new.article_code,
            article_description: new.article_description.clone(),
            composition_code: new.composition_code,
            composition_description: new.composition_description.clone(),
            requested: new.requested,
            delivered: Quantity::default(),
            requisition: new.requisition.clone(),
        })
    })
}

/// Deletes a lot reception line.
///
/// # Errors
///
/// Returns `DeleteAfterAllocation` once any quantity has been allocated into
/// a ticket, or `LotLineNotFound` when the line does not exist.
pub(crate) fn delete_lot_line(
    conn: &mut SqliteConnection,
    key: &LotLineKey,
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        let (lot_line_id, line) = queries::lot_lines::lookup_lot_line(conn, key)?;
        validate_deletable(&line)?;

        diesel::delete(lot_lines::table.filter(lot_lines::lot_line_id.eq(lot_line_id)))
            .execute(conn)?;

        info!(lot_line = %key, "Deleted lot reception line");
        Ok(())
    })
}
