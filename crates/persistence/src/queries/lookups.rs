// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference table lookups: machines, operation classes, delivery states.

use std::str::FromStr;

use diesel::prelude::*;
use tinturaria_domain::OperationFlow;

use crate::diesel_schema::{delivery_states, machines, operation_classes};
use crate::error::PersistenceError;

/// The description of a machine, or `None` when it is not registered.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub(crate) fn machine_description(
    conn: &mut SqliteConnection,
    machine_id: i32,
) -> Result<Option<String>, PersistenceError> {
    Ok(machines::table
        .filter(machines::machine_id.eq(machine_id))
        .select(machines::description)
        .first(conn)
        .optional()?)
}

/// The description and goods flow of an operation class, or `None` when the
/// class is not in the reference table.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or the stored flow
/// string fails to parse.
pub(crate) fn operation_class_info(
    conn: &mut SqliteConnection,
    class: i32,
) -> Result<Option<(String, OperationFlow)>, PersistenceError> {
    let row: Option<(String, String)> = operation_classes::table
        .filter(operation_classes::class.eq(class))
        .select((operation_classes::description, operation_classes::flow))
        .first(conn)
        .optional()?;

    match row {
        None => Ok(None),
        Some((description, flow)) => {
            let flow: OperationFlow = OperationFlow::from_str(&flow)?;
            Ok(Some((description, flow)))
        }
    }
}

/// The description of an operation class, or `None` when unknown.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub(crate) fn operation_description(
    conn: &mut SqliteConnection,
    class: i32,
) -> Result<Option<String>, PersistenceError> {
    Ok(operation_class_info(conn, class)?.map(|(description, _)| description))
}

/// Whether a delivery state ID is registered.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub(crate) fn delivery_state_known(
    conn: &mut SqliteConnection,
    state_id: i32,
) -> Result<bool, PersistenceError> {
    let found: Option<i32> = delivery_states::table
        .filter(delivery_states::state_id.eq(state_id))
        .select(delivery_states::state_id)
        .first(conn)
        .optional()?;
    Ok(found.is_some())
}
