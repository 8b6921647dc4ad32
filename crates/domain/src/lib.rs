// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod barcode;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use barcode::{BarcodeError, MACHINE_SELECTION_CLASS, Operation, decode};
pub use error::DomainError;
pub use types::{
    Allocation, DeliveryEvent, LotLine, LotLineKey, MachineActivity, OperationFlow, ProcessStep,
    Quantity, Section, Ticket, TicketState, classify_activity,
};
pub use validation::{
    validate_allocation, validate_deletable, validate_delivery_amount, validate_delivery_within,
    validate_requested, validate_same_client,
};
