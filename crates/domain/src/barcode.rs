// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Decoder for the dot-separated barcode strings scanned at wall terminals.
//!
//! Codes are short token strings: `"1.06"` selects machine 6,
//! `"2.25352.12"` registers operation class 2 against ticket 25352,
//! process step 12. The decoder is state-free; routing the decoded
//! operation is the API layer's job.

/// The operation class that selects a machine rather than targeting a ticket.
pub const MACHINE_SELECTION_CLASS: u32 = 1;

/// A decoded barcode operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// A terminal selected a machine.
    MachineSelection {
        /// The selected machine.
        machine_id: u32,
    },
    /// A process operation against a ticket step.
    ProcessOperation {
        /// The operation class (entry, exit, ...).
        operation_class: u32,
        /// The target ticket number.
        ticket_number: u32,
        /// The target process step line.
        process_step: u32,
    },
}

/// Errors produced by [`decode`] for malformed codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarcodeError {
    /// The code was empty or whitespace.
    EmptyCode,
    /// The code had the wrong number of dot-separated tokens for its class.
    WrongTokenCount {
        /// The decoded operation class.
        operation_class: u32,
        /// The token count the class requires.
        expected: usize,
        /// The token count found.
        found: usize,
    },
    /// A token was not a decimal integer.
    NonNumericToken {
        /// Zero-based token position.
        position: usize,
        /// The offending token.
        token: String,
    },
    /// A token parsed to zero; all values must be positive.
    NonPositiveValue {
        /// Zero-based token position.
        position: usize,
    },
}

impl std::fmt::Display for BarcodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "Barcode is empty"),
            Self::WrongTokenCount {
                operation_class,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Operation class {operation_class} requires {expected} tokens, found {found}"
                )
            }
            Self::NonNumericToken { position, token } => {
                write!(f, "Token {position} is not a number: '{token}'")
            }
            Self::NonPositiveValue { position } => {
                write!(f, "Token {position} must be a positive integer")
            }
        }
    }
}

impl std::error::Error for BarcodeError {}

/// Parses one token as a positive integer.
fn parse_token(position: usize, token: &str) -> Result<u32, BarcodeError> {
    let value: u32 = token
        .parse()
        .map_err(|_| BarcodeError::NonNumericToken {
            position,
            token: token.to_string(),
        })?;
    if value == 0 {
        return Err(BarcodeError::NonPositiveValue { position });
    }
    Ok(value)
}

/// Decodes a scanned code into a typed operation.
///
/// Token 0 is the operation class. Class 1 (machine selection) requires
/// exactly two tokens; every other class requires exactly three
/// (class, ticket number, process step).
///
/// # Errors
///
/// Returns a [`BarcodeError`] for empty input, wrong token counts,
/// non-numeric tokens, or non-positive values.
pub fn decode(code: &str) -> Result<Operation, BarcodeError> {
    let trimmed: &str = code.trim();
    if trimmed.is_empty() {
        return Err(BarcodeError::EmptyCode);
    }

    let tokens: Vec<&str> = trimmed.split('.').collect();
    let operation_class: u32 = parse_token(0, tokens[0])?;

    if operation_class == MACHINE_SELECTION_CLASS {
        if tokens.len() != 2 {
            return Err(BarcodeError::WrongTokenCount {
                operation_class,
                expected: 2,
                found: tokens.len(),
            });
        }
        let machine_id: u32 = parse_token(1, tokens[1])?;
        return Ok(Operation::MachineSelection { machine_id });
    }

    if tokens.len() != 3 {
        return Err(BarcodeError::WrongTokenCount {
            operation_class,
            expected: 3,
            found: tokens.len(),
        });
    }

    let ticket_number: u32 = parse_token(1, tokens[1])?;
    let process_step: u32 = parse_token(2, tokens[2])?;

    Ok(Operation::ProcessOperation {
        operation_class,
        ticket_number,
        process_step,
    })
}
