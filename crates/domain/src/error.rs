// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::LotLineKey;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A quantity field is outside its valid range.
    InvalidQuantity {
        /// The field that was invalid (e.g. "rolos", "pesos").
        field: &'static str,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Section identifier is zero or out of range.
    InvalidSection(String),
    /// A ticket was requested with no allocation items.
    EmptyTicket,
    /// Allocation items reference lot lines of different clients.
    MixedClients {
        /// The client of the first item.
        expected_client: i32,
        /// The conflicting client.
        found_client: i32,
    },
    /// The same lot line appears more than once in one ticket batch.
    DuplicateLotLine {
        /// The lot line that was repeated.
        lot_line: LotLineKey,
    },
    /// An allocation exceeds the pending balance of its lot line.
    OverAllocation {
        /// The lot line whose balance would be exceeded.
        lot_line: LotLineKey,
        /// The rolls requested.
        requested_rolls: i32,
        /// The rolls still pending on the line.
        pending_rolls: i32,
        /// The weight requested.
        requested_weight: f64,
        /// The weight still pending on the line.
        pending_weight: f64,
    },
    /// A delivery would push cumulative delivered above the ticket totals.
    OverDelivery {
        /// The ticket number.
        ticket_no: u32,
        /// Cumulative rolls after the event.
        cumulative_rolls: i32,
        /// The ticket's total rolls.
        total_rolls: i32,
        /// Cumulative weight after the event.
        cumulative_weight: f64,
        /// The ticket's total weight.
        total_weight: f64,
    },
    /// The ticket is already completed and rejects further deliveries.
    TicketCompleted {
        /// The ticket number.
        ticket_no: u32,
    },
    /// A lot line with allocated quantity cannot be deleted.
    DeleteAfterAllocation {
        /// The lot line that has allocations.
        lot_line: LotLineKey,
    },
    /// Ticket state string did not parse.
    InvalidTicketState(String),
    /// Operation flow string did not parse.
    InvalidOperationFlow(String),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuantity { field, message } => {
                write!(f, "Invalid quantity for '{field}': {message}")
            }
            Self::InvalidSection(msg) => write!(f, "Invalid section: {msg}"),
            Self::EmptyTicket => write!(f, "A finishing ticket requires at least one lot line"),
            Self::MixedClients {
                expected_client,
                found_client,
            } => {
                write!(
                    f,
                    "All lot lines on one ticket must belong to the same client: expected {expected_client}, found {found_client}"
                )
            }
            Self::DuplicateLotLine { lot_line } => {
                write!(
                    f,
                    "Lot line {lot_line} appears more than once in the ticket"
                )
            }
            Self::OverAllocation {
                lot_line,
                requested_rolls,
                pending_rolls,
                requested_weight,
                pending_weight,
            } => {
                write!(
                    f,
                    "Allocation exceeds pending balance of lot line {lot_line}: requested {requested_rolls} rolls / {requested_weight} kg, pending {pending_rolls} rolls / {pending_weight} kg"
                )
            }
            Self::OverDelivery {
                ticket_no,
                cumulative_rolls,
                total_rolls,
                cumulative_weight,
                total_weight,
            } => {
                write!(
                    f,
                    "Delivery exceeds totals of ticket {ticket_no}: cumulative {cumulative_rolls} rolls / {cumulative_weight} kg, totals {total_rolls} rolls / {total_weight} kg"
                )
            }
            Self::TicketCompleted { ticket_no } => {
                write!(f, "Ticket {ticket_no} is completed and rejects further deliveries")
            }
            Self::DeleteAfterAllocation { lot_line } => {
                write!(
                    f,
                    "Lot line {lot_line} has allocated quantity and cannot be deleted"
                )
            }
            Self::InvalidTicketState(msg) => write!(f, "Invalid ticket state: {msg}"),
            Self::InvalidOperationFlow(msg) => write!(f, "Invalid operation flow: {msg}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
