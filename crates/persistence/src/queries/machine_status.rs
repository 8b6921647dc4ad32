// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Machine status projection.
//!
//! Pure read over the scan log and reference tables, recomputed per call.
//! Nothing here is cached or persisted.

use diesel::prelude::*;
use tinturaria_domain::{MACHINE_SELECTION_CLASS, OperationFlow, Quantity, Section, classify_activity};

use crate::data_models::{self, MachineReadingRow, MachineRow, MachineStatusRow};
use crate::diesel_schema::{lot_lines, machine_readings, machines, ticket_allocations};
use crate::error::PersistenceError;
use crate::queries::{lookups, tickets};

/// The latest scan log entry for a machine, or `None` when it has none.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub(crate) fn latest_reading_for_machine(
    conn: &mut SqliteConnection,
    machine_id: i32,
) -> Result<Option<MachineReadingRow>, PersistenceError> {
    Ok(machine_readings::table
        .filter(machine_readings::machine_id.eq(machine_id))
        .order(machine_readings::reading_id.desc())
        .first::<MachineReadingRow>(conn)
        .optional()?)
}

/// The machine most recently selected on a terminal, or `None` when the
/// terminal never produced a machine-selection scan.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub(crate) fn latest_selected_machine(
    conn: &mut SqliteConnection,
    terminal: &str,
) -> Result<Option<i32>, PersistenceError> {
    let selection_class: i32 = data_models::column_from_u32(MACHINE_SELECTION_CLASS)?;
    Ok(machine_readings::table
        .filter(machine_readings::terminal.eq(terminal))
        .filter(machine_readings::operation_class.eq(selection_class))
        .order(machine_readings::reading_id.desc())
        .select(machine_readings::machine_id)
        .first(conn)
        .optional()?)
}

/// The status view for every machine in a section.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub(crate) fn machine_status(
    conn: &mut SqliteConnection,
    section: Section,
) -> Result<Vec<MachineStatusRow>, PersistenceError> {
    let machine_rows: Vec<MachineRow> = machines::table
        .filter(machines::section.eq(i32::from(section.value())))
        .order(machines::machine_id.asc())
        .load(conn)?;

    let mut out: Vec<MachineStatusRow> = Vec::with_capacity(machine_rows.len());
    for machine in machine_rows {
        out.push(status_for_machine(conn, section, machine)?);
    }
    Ok(out)
}

fn status_for_machine(
    conn: &mut SqliteConnection,
    section: Section,
    machine: MachineRow,
) -> Result<MachineStatusRow, PersistenceError> {
    let Some(reading) = latest_reading_for_machine(conn, machine.machine_id)? else {
        return Ok(MachineStatusRow {
            machine_id: machine.machine_id,
            description: machine.description,
            activity: classify_activity(None),
            recorded_at: None,
            operation_class: None,
            operation_description: None,
            ticket_no: None,
            process_step: None,
            totals: None,
            client_name: None,
            article_description: None,
        });
    };

    // An operation class missing from the reference table classifies as
    // neutral; the raw class is still reported.
    let (operation_description, flow): (Option<String>, OperationFlow) =
        match lookups::operation_class_info(conn, reading.operation_class)? {
            Some((description, flow)) => (Some(description), flow),
            None => (None, OperationFlow::Neutral),
        };
    let activity = classify_activity(Some((reading.ticket_no, flow)));

    let mut ticket_no: Option<u32> = None;
    let mut totals: Option<Quantity> = None;
    let mut client_name: Option<String> = None;
    let mut article_description: Option<String> = None;
    if reading.ticket_no > 0 {
        let number: u32 = data_models::ticket_no_from_row(reading.ticket_no)?;
        ticket_no = Some(number);
        if let Some((ticket_id, ticket)) = tickets::lookup_ticket_opt(conn, section, number)? {
            totals = Some(ticket.totals);
            let context: Option<(String, String)> = ticket_allocations::table
                .inner_join(lot_lines::table)
                .filter(ticket_allocations::ticket_id.eq(ticket_id))
                .order(ticket_allocations::allocation_id.asc())
                .select((lot_lines::client_name, lot_lines::article_description))
                .first(conn)
                .optional()?;
            if let Some((name, article)) = context {
                client_name = Some(name);
                article_description = Some(article);
            }
        }
    }

    let process_step: Option<i32> = (reading.process_step > 0).then_some(reading.process_step);

    Ok(MachineStatusRow {
        machine_id: machine.machine_id,
        description: machine.description,
        activity,
        recorded_at: Some(reading.recorded_at),
        operation_class: Some(reading.operation_class),
        operation_description,
        ticket_no,
        process_step,
        totals,
        client_name,
        article_description,
    })
}
