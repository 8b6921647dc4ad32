// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side operations. All functions take a `&mut SqliteConnection` and
//! are invoked through the `Persistence` adapter.

pub(crate) mod lookups;
pub(crate) mod lot_lines;
pub(crate) mod machine_status;
pub(crate) mod process_steps;
pub(crate) mod tickets;
