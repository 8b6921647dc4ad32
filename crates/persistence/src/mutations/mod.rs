// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side operations. Every read-check-write workflow runs inside an
//! explicit transaction so a validation failure leaves no observable write.

pub(crate) mod deliveries;
pub(crate) mod lot_lines;
pub(crate) mod process_steps;
pub(crate) mod readings;
pub(crate) mod reference;
pub(crate) mod tickets;
