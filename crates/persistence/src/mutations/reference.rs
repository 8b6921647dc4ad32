// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference table upserts. These tables are loaded at deployment time and
//! read by the scan and status workflows.

use diesel::prelude::*;
use tinturaria_domain::{OperationFlow, Section};

use crate::diesel_schema::{delivery_states, machines, operation_classes};
use crate::error::PersistenceError;

/// Registers or replaces a machine.
///
/// # Errors
///
/// Returns an error if the write fails.
pub(crate) fn define_machine(
    conn: &mut SqliteConnection,
    machine_id: i32,
    section: Section,
    description: &str,
) -> Result<(), PersistenceError> {
    diesel::replace_into(machines::table)
        .values((
            machines::machine_id.eq(machine_id),
            machines::section.eq(i32::from(section.value())),
            machines::description.eq(description),
        ))
        .execute(conn)?;
    Ok(())
}

/// Registers or replaces a barcode operation class.
///
/// # Errors
///
/// Returns an error if the write fails.
pub(crate) fn define_operation_class(
    conn: &mut SqliteConnection,
    class: i32,
    description: &str,
    flow: OperationFlow,
) -> Result<(), PersistenceError> {
    diesel::replace_into(operation_classes::table)
        .values((
            operation_classes::class.eq(class),
            operation_classes::description.eq(description),
            operation_classes::flow.eq(flow.as_str()),
        ))
        .execute(conn)?;
    Ok(())
}

/// Registers or replaces a delivery state.
///
/// # Errors
///
/// Returns an error if the write fails.
pub(crate) fn define_delivery_state(
    conn: &mut SqliteConnection,
    state_id: i32,
    description: &str,
) -> Result<(), PersistenceError> {
    diesel::replace_into(delivery_states::table)
        .values((
            delivery_states::state_id.eq(state_id),
            delivery_states::description.eq(description),
        ))
        .execute(conn)?;
    Ok(())
}
