// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The versioned-entity abstraction shared by tenders and bids.
//!
//! A versioned entity is an immutable row identified by `(id, version)`.
//! The row with the highest version for an id is the current one. Content
//! changes never mutate a row: they derive a new row from an existing one
//! and hand it to the store, which assigns the version.

use crate::types::Version;

/// A record kept as an append-only version history.
pub trait Versioned: Clone {
    /// The stable identifier shared by all versions.
    type Id: Copy + Eq + std::fmt::Display;
    /// The closed status enumeration of this entity kind.
    type Status: Copy + Eq + std::fmt::Display;
    /// Partial field overrides accepted by an edit.
    type Edit;

    /// Human-readable entity kind, used in logs and error messages.
    const KIND: &'static str;

    /// Returns the stable identifier.
    fn id(&self) -> Self::Id;

    /// Returns the version of this row.
    fn version(&self) -> Version;

    /// Returns the status of this row.
    fn status(&self) -> Self::Status;

    /// Returns a copy of this row carrying `edit` on top of its fields.
    ///
    /// Fields the edit leaves unset keep this row's value.
    #[must_use]
    fn with_edit(&self, edit: &Self::Edit) -> Self;

    /// Returns a copy of this row re-stamped as a new version.
    ///
    /// Every content field, including status, is carried over unchanged.
    #[must_use]
    fn restamped(&self, version: Version, created_at: String) -> Self;
}
