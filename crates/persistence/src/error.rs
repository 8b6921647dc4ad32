// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tinturaria_domain::DomainError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested lot line was not found.
    LotLineNotFound {
        section: u16,
        received_on: String,
        line_no: i32,
    },
    /// The requested ticket was not found.
    TicketNotFound { section: u16, ticket_no: u32 },
    /// The requested process step was not found.
    StepNotFound { ticket_no: u32, line_no: i32 },
    /// The requested machine was not found.
    MachineNotFound(i32),
    /// The requested delivery state was not found.
    DeliveryStateNotFound(i32),
    /// A domain rule rejected the operation.
    DomainViolation(DomainError),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::LotLineNotFound {
                section,
                received_on,
                line_no,
            } => {
                write!(
                    f,
                    "Lot line not found: section={section}, date={received_on}, line={line_no}"
                )
            }
            Self::TicketNotFound { section, ticket_no } => {
                write!(f, "Ticket not found: section={section}, ticket={ticket_no}")
            }
            Self::StepNotFound { ticket_no, line_no } => {
                write!(
                    f,
                    "Process step not found: ticket={ticket_no}, line={line_no}"
                )
            }
            Self::MachineNotFound(id) => write!(f, "Machine not found: {id}"),
            Self::DeliveryStateNotFound(id) => write!(f, "Delivery state not found: {id}"),
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
