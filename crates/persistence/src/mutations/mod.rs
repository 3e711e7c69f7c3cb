// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for the persistence layer.
//!
//! ## Module Organization
//!
//! - `tenders` — Tender creation, version inserts, in-place status updates
//! - `bids` — The same for bids
//! - `decision` — Decision submission across a bid and its tender
//! - `directory` — Employee, organization and membership seeding
//!
//! Functions here never open a transaction themselves unless documented
//! otherwise; callers compose them inside `immediate_transaction`.

pub mod bids;
pub mod decision;
pub mod directory;
pub mod tenders;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// Returns the current UTC time as an RFC 3339 string.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}
