// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Tinturaria production system.
//!
//! This crate persists the production flow of a dyeing and finishing plant:
//! lot reception lines, finishing tickets with their allocations, process
//! steps, delivery events, the append-only machine scan log, and the
//! reference tables those workflows join against.
//!
//! It is built on Diesel with a `SQLite` backend. In-memory databases back
//! unit and integration tests; file-based databases run in WAL mode for read
//! concurrency. Every read-check-write workflow (ticket creation, delivery
//! registration, step append) runs inside an explicit transaction.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use time::Date;
use tinturaria_domain::{LotLine, LotLineKey, ProcessStep, Quantity, Section};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{
    CreatedTicket, DeliveryOutcome, MachineStatusRow, NewLotLine, NewProcessStep, PendingFilter,
    PendingPage, TicketDetail, TicketItem,
};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, keeping
/// tests isolated without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter owning a single `SQLite` connection.
///
/// Constructed once and handed to the server; callers serialize access
/// (the server wraps it in a mutex).
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter backed by an in-memory `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter backed by a file-based `SQLite`
    /// database, in WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Lot reception
    // ========================================================================

    /// Creates a lot reception line, computing the next line number scoped
    /// to (section, date).
    ///
    /// # Errors
    ///
    /// Returns an error if the requested quantities are non-positive or the
    /// insert fails.
    pub fn create_lot_line(&mut self, new: &NewLotLine) -> Result<LotLine, PersistenceError> {
        mutations::lot_lines::create_lot_line(&mut self.conn, new)
    }

    /// Fetches a lot line by its natural key.
    ///
    /// # Errors
    ///
    /// Returns `LotLineNotFound` when no such line exists.
    pub fn get_lot_line(&mut self, key: &LotLineKey) -> Result<LotLine, PersistenceError> {
        queries::lot_lines::get_lot_line(&mut self.conn, key)
    }

    /// Lists pending lot lines, most recent first, paginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_pending_lot_lines(
        &mut self,
        filter: &PendingFilter,
    ) -> Result<PendingPage, PersistenceError> {
        queries::lot_lines::list_pending(&mut self.conn, filter)
    }

    /// Deletes a lot reception line that has no allocations yet.
    ///
    /// # Errors
    ///
    /// Returns `DeleteAfterAllocation` once any quantity has been allocated,
    /// or `LotLineNotFound` when the line does not exist.
    pub fn delete_lot_line(&mut self, key: &LotLineKey) -> Result<(), PersistenceError> {
        mutations::lot_lines::delete_lot_line(&mut self.conn, key)
    }

    // ========================================================================
    // Finishing tickets
    // ========================================================================

    /// Creates a finishing ticket from one or more lot line allocations, in
    /// a single transaction.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTicket`, `DuplicateLotLine`, `MixedClients`,
    /// `OverAllocation`, `LotLineNotFound`, or a database error; any
    /// rejection leaves no observable write.
    pub fn create_ticket(
        &mut self,
        section: Section,
        created_on: Date,
        note: &str,
        items: &[TicketItem],
    ) -> Result<CreatedTicket, PersistenceError> {
        mutations::tickets::create_ticket(&mut self.conn, section, created_on, note, items)
    }

    /// Fetches a ticket with its delivery progress, allocations, and client
    /// context.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` when no such ticket exists.
    pub fn get_ticket(
        &mut self,
        section: Section,
        ticket_no: u32,
    ) -> Result<TicketDetail, PersistenceError> {
        queries::tickets::ticket_detail(&mut self.conn, section, ticket_no)
    }

    /// The most recent ticket (number, creation date) for a section, `None`
    /// when the section has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn last_ticket(
        &mut self,
        section: Section,
    ) -> Result<Option<(u32, Date)>, PersistenceError> {
        queries::tickets::last_ticket(&mut self.conn, section)
    }

    // ========================================================================
    // Process steps
    // ========================================================================

    /// Appends a process step to a ticket and returns its line number.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` when the ticket does not exist.
    pub fn add_process_step(
        &mut self,
        section: Section,
        ticket_no: u32,
        step: &NewProcessStep,
    ) -> Result<i32, PersistenceError> {
        mutations::process_steps::add_step(&mut self.conn, section, ticket_no, step)
    }

    /// Removes exactly one process step from a ticket.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` or `StepNotFound`.
    pub fn remove_process_step(
        &mut self,
        section: Section,
        ticket_no: u32,
        line_no: i32,
    ) -> Result<(), PersistenceError> {
        mutations::process_steps::remove_step(&mut self.conn, section, ticket_no, line_no)
    }

    /// Lists the process steps of a ticket, ordered by line number.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` when the ticket does not exist.
    pub fn list_process_steps(
        &mut self,
        section: Section,
        ticket_no: u32,
    ) -> Result<Vec<ProcessStep>, PersistenceError> {
        queries::process_steps::list_steps(&mut self.conn, section, ticket_no)
    }

    // ========================================================================
    // Deliveries
    // ========================================================================

    /// Registers a partial delivery against an open ticket, transitioning it
    /// to `completed` when both cumulative axes reach the totals.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound`, `TicketCompleted`, `DeliveryStateNotFound`,
    /// `OverDelivery`, or an invalid-quantity error.
    pub fn register_delivery(
        &mut self,
        section: Section,
        ticket_no: u32,
        amount: Quantity,
        state_id: i32,
        note: &str,
    ) -> Result<DeliveryOutcome, PersistenceError> {
        mutations::deliveries::register_delivery(
            &mut self.conn,
            section,
            ticket_no,
            amount,
            state_id,
            note,
        )
    }

    // ========================================================================
    // Scan log
    // ========================================================================

    /// Appends a machine-selection reading and returns its sequence number.
    ///
    /// # Errors
    ///
    /// Returns `MachineNotFound` when the machine is not registered.
    pub fn record_machine_selection(
        &mut self,
        terminal: &str,
        machine_id: u32,
    ) -> Result<i64, PersistenceError> {
        mutations::readings::record_machine_selection(&mut self.conn, terminal, machine_id)
    }

    /// Appends a process operation reading and returns its sequence number.
    ///
    /// The reading inherits the machine most recently selected on the same
    /// terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn record_process_reading(
        &mut self,
        terminal: &str,
        operation_class: u32,
        ticket_no: u32,
        process_step: u32,
    ) -> Result<i64, PersistenceError> {
        mutations::readings::record_process_reading(
            &mut self.conn,
            terminal,
            operation_class,
            ticket_no,
            process_step,
        )
    }

    // ========================================================================
    // Machine status & reference data
    // ========================================================================

    /// The status view for every machine in a section, recomputed per call.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn machine_status(
        &mut self,
        section: Section,
    ) -> Result<Vec<MachineStatusRow>, PersistenceError> {
        queries::machine_status::machine_status(&mut self.conn, section)
    }

    /// The description of a machine, or `None` when it is not registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn machine_description(
        &mut self,
        machine_id: i32,
    ) -> Result<Option<String>, PersistenceError> {
        queries::lookups::machine_description(&mut self.conn, machine_id)
    }

    /// The description of an operation class, or `None` when unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn operation_description(
        &mut self,
        operation_class: i32,
    ) -> Result<Option<String>, PersistenceError> {
        queries::lookups::operation_description(&mut self.conn, operation_class)
    }

    /// Registers or replaces a machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn define_machine(
        &mut self,
        machine_id: i32,
        section: Section,
        description: &str,
    ) -> Result<(), PersistenceError> {
        mutations::reference::define_machine(&mut self.conn, machine_id, section, description)
    }

    /// Registers or replaces a barcode operation class.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn define_operation_class(
        &mut self,
        class: i32,
        description: &str,
        flow: tinturaria_domain::OperationFlow,
    ) -> Result<(), PersistenceError> {
        mutations::reference::define_operation_class(&mut self.conn, class, description, flow)
    }

    /// Registers or replaces a delivery state.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn define_delivery_state(
        &mut self,
        state_id: i32,
        description: &str,
    ) -> Result<(), PersistenceError> {
        mutations::reference::define_delivery_state(&mut self.conn, state_id, description)
    }
}
