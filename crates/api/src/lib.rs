// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Tinturaria production backend.
//!
//! This crate translates between the Portuguese wire contract of the
//! legacy shop-floor clients and the English domain types. Handlers are
//! plain functions over the persistence adapter; the HTTP server crate
//! wires them to routes.

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

pub mod error;
pub mod handlers;
pub mod request_response;
pub mod scan;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_barcode_error, translate_domain_error, translate_persistence_error,
};
pub use scan::{DEFAULT_TERMINAL, MAX_TERMINAL_LENGTH, ScanPolicyError, resolve_terminal};
