// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quantity reconciliation rules.
//!
//! These are the pure checks behind the workflow invariants: allocations
//! never exceed a lot line's pending balance, deliveries never exceed a
//! ticket's totals, and one ticket never mixes clients. Persistence wraps
//! them in transactions; nothing here touches I/O.

use crate::error::DomainError;
use crate::types::{LotLine, LotLineKey, Quantity};

/// Validates a reception quantity: both axes must be positive.
///
/// # Errors
///
/// Returns `InvalidQuantity` naming the offending axis.
pub fn validate_requested(quantity: &Quantity) -> Result<(), DomainError> {
    if quantity.rolls <= 0 {
        return Err(DomainError::InvalidQuantity {
            field: "rolos",
            message: format!("requested rolls must be positive, got {}", quantity.rolls),
        });
    }
    if quantity.weight <= 0.0 {
        return Err(DomainError::InvalidQuantity {
            field: "pesos",
            message: format!("requested weight must be positive, got {}", quantity.weight),
        });
    }
    Ok(())
}

/// Validates one allocation against the lot line it draws from.
///
/// The amount must be positive on the rolls axis, non-negative on the weight
/// axis, and within the line's pending balance on both axes.
///
/// # Errors
///
/// Returns `InvalidQuantity` for out-of-range amounts and `OverAllocation`
/// when the pending balance would be exceeded.
pub fn validate_allocation(line: &LotLine, amount: &Quantity) -> Result<(), DomainError> {
    if amount.rolls <= 0 {
        return Err(DomainError::InvalidQuantity {
            field: "rolos",
            message: format!("allocated rolls must be positive, got {}", amount.rolls),
        });
    }
    if amount.weight < 0.0 {
        return Err(DomainError::InvalidQuantity {
            field: "pesos",
            message: format!("allocated weight must not be negative, got {}", amount.weight),
        });
    }

    let pending: Quantity = line.pending();
    if amount.exceeds(&pending) {
        return Err(DomainError::OverAllocation {
            lot_line: line.key,
            requested_rolls: amount.rolls,
            pending_rolls: pending.rolls,
            requested_weight: amount.weight,
            pending_weight: pending.weight,
        });
    }
    Ok(())
}

/// Validates that every lot line on a ticket belongs to the same client.
///
/// # Errors
///
/// Returns `EmptyTicket` for an empty batch and `MixedClients` naming the
/// first conflicting client otherwise.
pub fn validate_same_client(lines: &[LotLine]) -> Result<(), DomainError> {
    let Some(first) = lines.first() else {
        return Err(DomainError::EmptyTicket);
    };
    for line in &lines[1..] {
        if line.client_id != first.client_id {
            return Err(DomainError::MixedClients {
                expected_client: first.client_id,
                found_client: line.client_id,
            });
        }
    }
    Ok(())
}

/// Validates a delivery amount: rolls non-negative, weight strictly positive.
///
/// # Errors
///
/// Returns `InvalidQuantity` naming the offending axis.
pub fn validate_delivery_amount(amount: &Quantity) -> Result<(), DomainError> {
    if amount.rolls < 0 {
        return Err(DomainError::InvalidQuantity {
            field: "rolos",
            message: format!("delivered rolls must not be negative, got {}", amount.rolls),
        });
    }
    if amount.weight <= 0.0 {
        return Err(DomainError::InvalidQuantity {
            field: "pesos",
            message: format!("delivered weight must be positive, got {}", amount.weight),
        });
    }
    Ok(())
}

/// Validates that a delivery keeps cumulative delivered within ticket totals.
///
/// `cumulative` is the sum of all prior events; the check applies to
/// `cumulative + amount` on both axes.
///
/// # Errors
///
/// Returns `OverDelivery` when either axis would exceed the totals.
pub fn validate_delivery_within(
    ticket_no: u32,
    cumulative: &Quantity,
    amount: &Quantity,
    totals: &Quantity,
) -> Result<(), DomainError> {
    let after: Quantity = cumulative.plus(amount);
    if after.exceeds(totals) {
        return Err(DomainError::OverDelivery {
            ticket_no,
            cumulative_rolls: after.rolls,
            total_rolls: totals.rolls,
            cumulative_weight: after.weight,
            total_weight: totals.weight,
        });
    }
    Ok(())
}

/// Finds the lot line key for delete validation: a line with any allocated
/// quantity is not deletable.
///
/// # Errors
///
/// Returns `DeleteAfterAllocation` when `delivered` is nonzero on either axis.
pub fn validate_deletable(line: &LotLine) -> Result<(), DomainError> {
    if line.delivered.rolls > 0 || line.delivered.weight > 0.0 {
        return Err(DomainError::DeleteAfterAllocation { lot_line: line.key });
    }
    Ok(())
}
