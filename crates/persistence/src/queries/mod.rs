// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `tenders` — Current, historical and listing queries over tender versions
//! - `bids` — The same over bid versions
//! - `directory` — Employee and organization membership lookups
//!
//! "Current" rows are selected by joining through the head index table
//! for the entity kind.

pub mod bids;
pub mod directory;
pub mod tenders;
