// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scan log appends. The log is append-only; every physical scan becomes one
//! row, with no deduplication.

use diesel::prelude::*;
use tinturaria_domain::MACHINE_SELECTION_CLASS;
use tracing::debug;

use crate::data_models;
use crate::diesel_schema::machine_readings;
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite;

/// Appends a machine-selection reading for a terminal.
///
/// # Errors
///
/// Returns `MachineNotFound` when the machine is not in the reference table.
pub(crate) fn record_machine_selection(
    conn: &mut SqliteConnection,
    terminal: &str,
    machine_id: u32,
) -> Result<i64, PersistenceError> {
    let machine_raw: i32 = data_models::column_from_u32(machine_id)?;
    if queries::lookups::machine_description(conn, machine_raw)?.is_none() {
        return Err(PersistenceError::MachineNotFound(machine_raw));
    }

    let recorded_at: String = data_models::now_timestamp()?;
    let selection_class: i32 = data_models::column_from_u32(MACHINE_SELECTION_CLASS)?;

    diesel::insert_into(machine_readings::table)
        .values((
            machine_readings::recorded_at.eq(&recorded_at),
            machine_readings::terminal.eq(terminal),
            machine_readings::machine_id.eq(machine_raw),
            machine_readings::operation_class.eq(selection_class),
            machine_readings::ticket_no.eq(0),
            machine_readings::process_step.eq(0),
        ))
        .execute(conn)?;

    let sequence: i64 = sqlite::get_last_insert_rowid(conn)?;
    debug!(terminal, machine_id = machine_raw, sequence, "Recorded machine selection");
    Ok(sequence)
}

/// Appends a process operation reading for a terminal.
///
/// The reading inherits the machine most recently selected on the same
/// terminal, 0 when the terminal never selected one.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub(crate) fn record_process_reading(
    conn: &mut SqliteConnection,
    terminal: &str,
    operation_class: u32,
    ticket_no: u32,
    process_step: u32,
) -> Result<i64, PersistenceError> {
    let class_raw: i32 = data_models::column_from_u32(operation_class)?;
    let ticket_raw: i32 = data_models::column_from_u32(ticket_no)?;
    let step_raw: i32 = data_models::column_from_u32(process_step)?;

    let machine_raw: i32 =
        queries::machine_status::latest_selected_machine(conn, terminal)?.unwrap_or(0);

    let recorded_at: String = data_models::now_timestamp()?;
    diesel::insert_into(machine_readings::table)
        .values((
            machine_readings::recorded_at.eq(&recorded_at),
            machine_readings::terminal.eq(terminal),
            machine_readings::machine_id.eq(machine_raw),
            machine_readings::operation_class.eq(class_raw),
            machine_readings::ticket_no.eq(ticket_raw),
            machine_readings::process_step.eq(step_raw),
        ))
        .execute(conn)?;

    let sequence: i64 = sqlite::get_last_insert_rowid(conn)?;
    debug!(
        terminal,
        operation_class = class_raw,
        ticket_no = ticket_raw,
        sequence,
        "Recorded process reading"
    );
    Ok(sequence)
}
