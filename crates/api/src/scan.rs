// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scan terminal policy.
//!
//! Shop-floor readings attribute every scan to the terminal that produced
//! it. Requests may omit the terminal, in which case the web reader
//! identifier is assumed.

use thiserror::Error;

/// Terminal assumed when a scan request does not name one.
pub const DEFAULT_TERMINAL: &str = "WEB-LEITOR";

/// Longest accepted terminal identifier.
pub const MAX_TERMINAL_LENGTH: usize = 32;

/// Terminal identifier errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanPolicyError {
    /// The terminal identifier was present but blank.
    #[error("Terminal identifier must not be blank")]
    BlankTerminal,

    /// The terminal identifier is too long.
    #[error("Terminal identifier must be at most {max_length} characters long (found {found})")]
    TerminalTooLong { max_length: usize, found: usize },
}

/// Resolves the terminal identifier for a scan request.
///
/// A missing terminal falls back to [`DEFAULT_TERMINAL`]; a present one is
/// trimmed and validated.
///
/// # Errors
///
/// Returns a `ScanPolicyError` if the identifier is blank or too long.
pub fn resolve_terminal(terminal: Option<&str>) -> Result<String, ScanPolicyError> {
    let Some(raw) = terminal else {
        return Ok(String::from(DEFAULT_TERMINAL));
    };
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return Err(ScanPolicyError::BlankTerminal);
    }
    if trimmed.len() > MAX_TERMINAL_LENGTH {
        return Err(ScanPolicyError::TerminalTooLong {
            max_length: MAX_TERMINAL_LENGTH,
            found: trimmed.len(),
        });
    }
    Ok(String::from(trimmed))
}
