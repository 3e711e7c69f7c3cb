// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The versioned-entity store protocol.
//!
//! Every versioned table is a set of immutable `(id, version)` rows plus a
//! head index row pointing at the current version. The protocol here is
//! written once against [`VersionedTable`] and shared by tenders and bids.
//!
//! Edits and rollbacks read the current state and insert the next version
//! inside one `BEGIN IMMEDIATE` transaction, so the write lock is held
//! from the read onward. Two writers on the same id therefore always
//! observe each other's versions and never allocate the same number.
//! The `(id, version)` primary key rejects a duplicate outright.

use diesel::SqliteConnection;
use procura_domain::{Bid, BidId, BidStatus, Tender, TenderId, TenderStatus, Version, Versioned};
use tracing::info;

use crate::error::PersistenceError;
use crate::mutations::{self, timestamp};
use crate::queries;

/// Identifier type of a table's entity.
pub type IdOf<T> = <<T as VersionedTable>::Entity as Versioned>::Id;
/// Status type of a table's entity.
pub type StatusOf<T> = <<T as VersionedTable>::Entity as Versioned>::Status;
/// Edit type of a table's entity.
pub type EditOf<T> = <<T as VersionedTable>::Entity as Versioned>::Edit;

/// Row-level storage operations for one versioned table.
///
/// Implementations do not open transactions; the protocol functions do.
pub trait VersionedTable: Sized {
    type Entity: Versioned;

    /// Selects the row the head index points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select_current(
        conn: &mut SqliteConnection,
        id: IdOf<Self>,
    ) -> Result<Option<Self::Entity>, PersistenceError>;

    /// Selects the row at exactly `(id, version)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select_at(
        conn: &mut SqliteConnection,
        id: IdOf<Self>,
        version: Version,
    ) -> Result<Option<Self::Entity>, PersistenceError>;

    /// Selects the highest stored version number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select_max_version(
        conn: &mut SqliteConnection,
        id: IdOf<Self>,
    ) -> Result<Option<Version>, PersistenceError>;

    /// Selects every stored version, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select_history(
        conn: &mut SqliteConnection,
        id: IdOf<Self>,
    ) -> Result<Vec<Self::Entity>, PersistenceError>;

    /// Inserts a row and advances the head index to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert_version(
        conn: &mut SqliteConnection,
        row: &Self::Entity,
    ) -> Result<(), PersistenceError>;

    /// Overwrites the status of the current row.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn update_status_in_place(
        conn: &mut SqliteConnection,
        id: IdOf<Self>,
        status: StatusOf<Self>,
    ) -> Result<Option<Self::Entity>, PersistenceError>;
}

/// The tender version table.
pub struct Tenders;

/// The bid version table.
pub struct Bids;

impl VersionedTable for Tenders {
    type Entity = Tender;

    fn select_current(
        conn: &mut SqliteConnection,
        id: TenderId,
    ) -> Result<Option<Tender>, PersistenceError> {
        queries::tenders::select_current(conn, id)
    }

    fn select_at(
        conn: &mut SqliteConnection,
        id: TenderId,
        version: Version,
    ) -> Result<Option<Tender>, PersistenceError> {
        queries::tenders::select_at(conn, id, version)
    }

    fn select_max_version(
        conn: &mut SqliteConnection,
        id: TenderId,
    ) -> Result<Option<Version>, PersistenceError> {
        queries::tenders::select_max_version(conn, id)
    }

    fn select_history(
        conn: &mut SqliteConnection,
        id: TenderId,
    ) -> Result<Vec<Tender>, PersistenceError> {
        queries::tenders::select_history(conn, id)
    }

    fn insert_version(conn: &mut SqliteConnection, row: &Tender) -> Result<(), PersistenceError> {
        mutations::tenders::insert_version(conn, row)
    }

    fn update_status_in_place(
        conn: &mut SqliteConnection,
        id: TenderId,
        status: TenderStatus,
    ) -> Result<Option<Tender>, PersistenceError> {
        mutations::tenders::update_status_in_place(conn, id, status)
    }
}

impl VersionedTable for Bids {
    type Entity = Bid;

    fn select_current(
        conn: &mut SqliteConnection,
        id: BidId,
    ) -> Result<Option<Bid>, PersistenceError> {
        queries::bids::select_current(conn, id)
    }

    fn select_at(
        conn: &mut SqliteConnection,
        id: BidId,
        version: Version,
    ) -> Result<Option<Bid>, PersistenceError> {
        queries::bids::select_at(conn, id, version)
    }

    fn select_max_version(
        conn: &mut SqliteConnection,
        id: BidId,
    ) -> Result<Option<Version>, PersistenceError> {
        queries::bids::select_max_version(conn, id)
    }

    fn select_history(
        conn: &mut SqliteConnection,
        id: BidId,
    ) -> Result<Vec<Bid>, PersistenceError> {
        queries::bids::select_history(conn, id)
    }

    fn insert_version(conn: &mut SqliteConnection, row: &Bid) -> Result<(), PersistenceError> {
        mutations::bids::insert_version(conn, row)
    }

    fn update_status_in_place(
        conn: &mut SqliteConnection,
        id: BidId,
        status: BidStatus,
    ) -> Result<Option<Bid>, PersistenceError> {
        mutations::bids::update_status_in_place(conn, id, status)
    }
}

fn entity_not_found<T: VersionedTable>(id: IdOf<T>) -> PersistenceError {
    PersistenceError::EntityNotFound {
        kind: T::Entity::KIND,
        id: id.to_string(),
    }
}

fn version_not_found<T: VersionedTable>(id: IdOf<T>, version: Version) -> PersistenceError {
    PersistenceError::VersionNotFound {
        kind: T::Entity::KIND,
        id: id.to_string(),
        version: version.value(),
    }
}

fn next_version(current: Version) -> Result<Version, PersistenceError> {
    current
        .next()
        .map_err(|e| PersistenceError::Other(e.to_string()))
}

/// Returns the current version of an entity.
///
/// # Errors
///
/// Returns `EntityNotFound` if no row exists for `id`.
pub fn get_current<T: VersionedTable>(
    conn: &mut SqliteConnection,
    id: IdOf<T>,
) -> Result<T::Entity, PersistenceError> {
    T::select_current(conn, id)?.ok_or_else(|| entity_not_found::<T>(id))
}

/// Appends a new version carrying `edit` on top of the current row.
///
/// Fields the edit leaves unset (or empty) keep their current value. The
/// new row is written at `current + 1` with the current status.
///
/// # Errors
///
/// Returns `EntityNotFound` if no row exists for `id`.
pub fn edit_current<T: VersionedTable>(
    conn: &mut SqliteConnection,
    id: IdOf<T>,
    edit: &EditOf<T>,
) -> Result<T::Entity, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let current: T::Entity =
            T::select_current(conn, id)?.ok_or_else(|| entity_not_found::<T>(id))?;
        let version: Version = next_version(current.version())?;
        let row: T::Entity = current.with_edit(edit).restamped(version, timestamp()?);

        T::insert_version(conn, &row)?;

        info!(kind = T::Entity::KIND, id = %id, %version, "Appended edited version");
        Ok(row)
    })
}

/// Appends a copy of version `target` as the newest version.
///
/// The copy carries every field of the target row, status included, and is
/// written at `max + 1`. The target row itself is untouched.
///
/// # Errors
///
/// Returns `VersionNotFound` if `(id, target)` does not exist or the
/// current maximum cannot be read.
pub fn rollback<T: VersionedTable>(
    conn: &mut SqliteConnection,
    id: IdOf<T>,
    target: Version,
) -> Result<T::Entity, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let source: T::Entity =
            T::select_at(conn, id, target)?.ok_or_else(|| version_not_found::<T>(id, target))?;
        let max: Version =
            T::select_max_version(conn, id)?.ok_or_else(|| version_not_found::<T>(id, target))?;
        let version: Version = next_version(max)?;
        let row: T::Entity = source.restamped(version, timestamp()?);

        T::insert_version(conn, &row)?;

        info!(
            kind = T::Entity::KIND,
            id = %id,
            from = %target,
            %version,
            "Rolled back to earlier version"
        );
        Ok(row)
    })
}

/// Sets the status of the current row in place.
///
/// Unlike edits and rollbacks this does not append a version: the
/// returned row keeps the current version number.
///
/// # Errors
///
/// Returns `EntityNotFound` if no row exists for `id`.
pub fn set_status<T: VersionedTable>(
    conn: &mut SqliteConnection,
    id: IdOf<T>,
    status: StatusOf<T>,
) -> Result<T::Entity, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let row: T::Entity = T::update_status_in_place(conn, id, status)?
            .ok_or_else(|| entity_not_found::<T>(id))?;

        info!(
            kind = T::Entity::KIND,
            id = %id,
            %status,
            version = %row.version(),
            "Set status in place"
        );
        Ok(row)
    })
}

/// Returns every stored version of an entity, oldest first.
///
/// # Errors
///
/// Returns `EntityNotFound` if no row exists for `id`.
pub fn history<T: VersionedTable>(
    conn: &mut SqliteConnection,
    id: IdOf<T>,
) -> Result<Vec<T::Entity>, PersistenceError> {
    let rows: Vec<T::Entity> = T::select_history(conn, id)?;
    if rows.is_empty() {
        return Err(entity_not_found::<T>(id));
    }
    Ok(rows)
}
