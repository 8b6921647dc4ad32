// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::scan::ScanPolicyError;
use tinturaria_domain::{BarcodeError, DomainError};
use tinturaria_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the API contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ScanPolicyError> for ApiError {
    fn from(err: ScanPolicyError) -> Self {
        Self::InvalidInput {
            field: String::from("terminal"),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidQuantity { field, message } => ApiError::InvalidInput {
            field: String::from(field),
            message,
        },
        DomainError::InvalidSection(msg) => ApiError::InvalidInput {
            field: String::from("seccao"),
            message: msg,
        },
        DomainError::EmptyTicket => ApiError::InvalidInput {
            field: String::from("itens"),
            message: String::from("A finishing ticket requires at least one lot line"),
        },
        DomainError::MixedClients {
            expected_client,
            found_client,
        } => ApiError::DomainRuleViolation {
            rule: String::from("single_client_per_ticket"),
            message: format!(
                "All lot lines on one ticket must belong to the same client: expected {expected_client}, found {found_client}"
            ),
        },
        DomainError::DuplicateLotLine { lot_line } => ApiError::DomainRuleViolation {
            rule: String::from("unique_lines_per_ticket"),
            message: format!("Lot line {lot_line} appears more than once in the ticket"),
        },
        DomainError::OverAllocation {
            lot_line,
            requested_rolls,
            pending_rolls,
            requested_weight,
            pending_weight,
        } => ApiError::DomainRuleViolation {
            rule: String::from("allocation_within_pending"),
            message: format!(
                "Allocation exceeds pending balance of lot line {lot_line}: requested {requested_rolls} rolls / {requested_weight} kg, pending {pending_rolls} rolls / {pending_weight} kg"
            ),
        },
        DomainError::OverDelivery {
            ticket_no,
            cumulative_rolls,
            total_rolls,
            cumulative_weight,
            total_weight,
        } => ApiError::DomainRuleViolation {
            rule: String::from("delivery_within_totals"),
            message: format!(
                "Delivery exceeds totals of ticket {ticket_no}: cumulative {cumulative_rolls} rolls / {cumulative_weight} kg, totals {total_rolls} rolls / {total_weight} kg"
            ),
        },
        DomainError::TicketCompleted { ticket_no } => ApiError::DomainRuleViolation {
            rule: String::from("ticket_open_for_delivery"),
            message: format!("Ticket {ticket_no} is completed and rejects further deliveries"),
        },
        DomainError::DeleteAfterAllocation { lot_line } => ApiError::DomainRuleViolation {
            rule: String::from("delete_before_allocation"),
            message: format!("Lot line {lot_line} has allocated quantity and cannot be deleted"),
        },
        DomainError::InvalidTicketState(msg) => ApiError::Internal {
            message: format!("Stored ticket state did not parse: {msg}"),
        },
        DomainError::InvalidOperationFlow(msg) => ApiError::Internal {
            message: format!("Stored operation flow did not parse: {msg}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("data"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Not-found variants map to `ResourceNotFound`; domain violations are
/// delegated to [`translate_domain_error`]; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        PersistenceError::LotLineNotFound {
            section,
            received_on,
            line_no,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Lot line"),
            message: format!("Lot line {section}/{received_on}/{line_no} does not exist"),
        },
        PersistenceError::TicketNotFound { section, ticket_no } => ApiError::ResourceNotFound {
            resource_type: String::from("Ticket"),
            message: format!("Ticket {ticket_no} does not exist in section {section}"),
        },
        PersistenceError::StepNotFound { ticket_no, line_no } => ApiError::ResourceNotFound {
            resource_type: String::from("Process step"),
            message: format!("Ticket {ticket_no} has no process step with line {line_no}"),
        },
        PersistenceError::MachineNotFound(machine_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Machine"),
            message: format!("Machine {machine_id} is not registered"),
        },
        PersistenceError::DeliveryStateNotFound(state_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Delivery state"),
            message: format!("Delivery state {state_id} is not registered"),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message: msg,
        },
        other => ApiError::Internal {
            message: format!("Persistence failure: {other}"),
        },
    }
}

/// Translates a barcode decoding error into an API error.
#[must_use]
pub fn translate_barcode_error(err: BarcodeError) -> ApiError {
    let message: String = match err {
        BarcodeError::EmptyCode => String::from("The scanned code was empty"),
        BarcodeError::WrongTokenCount {
            operation_class,
            expected,
            found,
        } => format!(
            "Operation class {operation_class} requires {expected} tokens, found {found}"
        ),
        BarcodeError::NonNumericToken { position, token } => {
            format!("Token {position} is not a decimal integer: '{token}'")
        }
        BarcodeError::NonPositiveValue { position } => {
            format!("Token {position} must be positive")
        }
    };
    ApiError::InvalidInput {
        field: String::from("codigoCompleto"),
        message,
    }
}
