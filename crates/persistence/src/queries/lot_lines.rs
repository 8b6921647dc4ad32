// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lot reception line queries.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use num_traits::ToPrimitive;
use tinturaria_domain::{LotLine, LotLineKey};
use tracing::debug;

use crate::data_models::{self, LotLineRow, PendingFilter, PendingPage};
use crate::diesel_schema::lot_lines;
use crate::error::PersistenceError;

const DEFAULT_PER_PAGE: u32 = 50;

/// Fetches a lot line by its natural key, together with its surrogate ID.
///
/// # Errors
///
/// Returns `LotLineNotFound` when no such line exists.
pub(crate) fn lookup_lot_line(
    conn: &mut SqliteConnection,
    key: &LotLineKey,
) -> Result<(i64, LotLine), PersistenceError> {
    let received_on: String = data_models::format_date(key.received_on)?;
    let row: Option<LotLineRow> = lot_lines::table
        .filter(lot_lines::section.eq(i32::from(key.section.value())))
        .filter(lot_lines::received_on.eq(&received_on))
        .filter(lot_lines::line_no.eq(key.line_no))
        .first::<LotLineRow>(conn)
        .optional()?;

    let row: LotLineRow = row.ok_or(PersistenceError::LotLineNotFound {
        section: key.section.value(),
        received_on,
        line_no: key.line_no,
    })?;
    let lot_line_id: i64 = row.lot_line_id;
    Ok((lot_line_id, row.into_domain()?))
}

/// Fetches a lot line by its natural key.
///
/// # Errors
///
/// Returns `LotLineNotFound` when no such line exists.
pub(crate) fn get_lot_line(
    conn: &mut SqliteConnection,
    key: &LotLineKey,
) -> Result<LotLine, PersistenceError> {
    let (_, line) = lookup_lot_line(conn, key)?;
    Ok(line)
}

/// Applies the pending predicate and the optional filters.
///
/// Pending means not yet fully allocated on the roll axis; the weight axis
/// follows the roll axis in practice and is not consulted here.
fn filtered(filter: &PendingFilter) -> lot_lines::BoxedQuery<'static, Sqlite> {
    let mut query = lot_lines::table
        .filter(lot_lines::delivered_rolls.lt(lot_lines::requested_rolls))
        .into_boxed();

    if let Some(section) = filter.section {
        query = query.filter(lot_lines::section.eq(i32::from(section.value())));
    }
    if let Some(name) = &filter.client_name {
        // SQLite LIKE is case-insensitive for ASCII.
        query = query.filter(lot_lines::client_name.like(format!("%{name}%")));
    }
    if let Some(requisition) = &filter.requisition {
        query = query.filter(lot_lines::requisition.like(format!("%{requisition}%")));
    }
    query
}

/// Lists pending lot lines, most recent first, paginated.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub(crate) fn list_pending(
    conn: &mut SqliteConnection,
    filter: &PendingFilter,
) -> Result<PendingPage, PersistenceError> {
    let page: u32 = filter.page.max(1);
    let per_page: u32 = if filter.per_page == 0 {
        DEFAULT_PER_PAGE
    } else {
        filter.per_page
    };

    let total: i64 = filtered(filter).count().get_result(conn)?;

    let offset: i64 = i64::from(page - 1) * i64::from(per_page);
    let rows: Vec<LotLineRow> = filtered(filter)
        .order((lot_lines::received_on.desc(), lot_lines::line_no.desc()))
        .limit(i64::from(per_page))
        .offset(offset)
        .load(conn)?;

    let mut lines: Vec<LotLine> = Vec::with_capacity(rows.len());
    for row in rows {
        lines.push(row.into_domain()?);
    }

    // The count is non-negative; div_ceil on unsigned values.
    let total_pages: u32 = total
        .to_u64()
        .unwrap_or(0)
        .div_ceil(u64::from(per_page))
        .to_u32()
        .unwrap_or(u32::MAX);

    debug!(total, page, returned = lines.len(), "Listed pending lot lines");

    Ok(PendingPage {
        lines,
        total,
        page,
        total_pages,
    })
}
