// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Procura tender/bid service.
//!
//! Tenders and bids are stored as append-only version histories in
//! `SQLite` through Diesel. Each entity kind has a version table keyed by
//! `(id, version)` and a head index table mapping every id to its current
//! version. The store protocol in the `versioned` module is shared by both kinds.
//!
//! ## Database Backend
//!
//! - In-memory shared-cache databases for tests, one unique database per
//!   [`Persistence::new_in_memory`] call
//! - File databases in WAL mode with a busy timeout, so writers on separate
//!   connections queue behind each other instead of failing
//!
//! Embedded migrations run at startup and foreign key enforcement is
//! verified before the adapter is handed out.

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

use diesel::SqliteConnection;
use procura_domain::{
    Bid, BidDecision, BidEdit, BidId, BidStatus, EmployeeId, NewBid, NewTender, OrganizationId,
    OrganizationType, Page, ServiceType, Tender, TenderEdit, TenderId, TenderStatus, Version,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod versioned;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use versioned::{Bids, Tenders};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database via an atomic
    /// counter, so instances never see each other's rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:procura_mem_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Directory
    // ========================================================================

    /// Creates an employee and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is already taken.
    pub fn create_employee(
        &mut self,
        username: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<EmployeeId, PersistenceError> {
        mutations::directory::create_employee(&mut self.conn, username, first_name, last_name)
    }

    /// Creates an organization and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_organization(
        &mut self,
        name: &str,
        description: Option<&str>,
        organization_type: OrganizationType,
    ) -> Result<OrganizationId, PersistenceError> {
        mutations::directory::create_organization(
            &mut self.conn,
            name,
            description,
            organization_type,
        )
    }

    /// Makes an employee a responsible member of an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if either side does not exist or the membership
    /// already exists.
    pub fn add_responsible(
        &mut self,
        organization_id: OrganizationId,
        employee_id: EmployeeId,
    ) -> Result<i64, PersistenceError> {
        mutations::directory::add_responsible(&mut self.conn, organization_id, employee_id)
    }

    /// Looks up an employee id by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn employee_id_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<EmployeeId>, PersistenceError> {
        queries::directory::employee_id_by_username(&mut self.conn, username)
    }

    /// Looks up the organization an employee is responsible for.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn organization_id_for_employee(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Option<OrganizationId>, PersistenceError> {
        queries::directory::organization_id_for_employee(&mut self.conn, employee_id)
    }

    /// Checks whether an employee exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn employee_exists(&mut self, employee_id: EmployeeId) -> Result<bool, PersistenceError> {
        queries::directory::employee_exists(&mut self.conn, employee_id)
    }

    // ========================================================================
    // Tenders
    // ========================================================================

    /// Creates a tender at version 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_tender(&mut self, new: NewTender) -> Result<Tender, PersistenceError> {
        mutations::tenders::create_tender(&mut self.conn, new)
    }

    /// Returns the current version of a tender.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the tender does not exist.
    pub fn get_tender(&mut self, id: TenderId) -> Result<Tender, PersistenceError> {
        versioned::get_current::<Tenders>(&mut self.conn, id)
    }

    /// Appends an edited tender version.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the tender does not exist.
    pub fn edit_tender(
        &mut self,
        id: TenderId,
        edit: &TenderEdit,
    ) -> Result<Tender, PersistenceError> {
        versioned::edit_current::<Tenders>(&mut self.conn, id, edit)
    }

    /// Appends a copy of an earlier tender version.
    ///
    /// # Errors
    ///
    /// Returns `VersionNotFound` if the version does not exist.
    pub fn rollback_tender(
        &mut self,
        id: TenderId,
        version: Version,
    ) -> Result<Tender, PersistenceError> {
        versioned::rollback::<Tenders>(&mut self.conn, id, version)
    }

    /// Sets the status of the current tender row in place.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the tender does not exist.
    pub fn set_tender_status(
        &mut self,
        id: TenderId,
        status: TenderStatus,
    ) -> Result<Tender, PersistenceError> {
        versioned::set_status::<Tenders>(&mut self.conn, id, status)
    }

    /// Returns every version of a tender, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the tender does not exist.
    pub fn tender_history(&mut self, id: TenderId) -> Result<Vec<Tender>, PersistenceError> {
        versioned::history::<Tenders>(&mut self.conn, id)
    }

    /// Lists current tenders created by `username`, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tenders_by_creator(
        &mut self,
        username: &str,
        page: Page,
    ) -> Result<Vec<Tender>, PersistenceError> {
        queries::tenders::list_by_creator(&mut self.conn, username, page)
    }

    /// Lists current published tenders of the given service types, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_published_tenders(
        &mut self,
        service_types: &[ServiceType],
        page: Page,
    ) -> Result<Vec<Tender>, PersistenceError> {
        queries::tenders::list_published(&mut self.conn, service_types, page)
    }

    // ========================================================================
    // Bids
    // ========================================================================

    /// Creates a bid at version 1.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the tender does not exist.
    pub fn create_bid(&mut self, new: NewBid) -> Result<Bid, PersistenceError> {
        mutations::bids::create_bid(&mut self.conn, new)
    }

    /// Returns the current version of a bid.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the bid does not exist.
    pub fn get_bid(&mut self, id: BidId) -> Result<Bid, PersistenceError> {
        versioned::get_current::<Bids>(&mut self.conn, id)
    }

    /// Appends an edited bid version.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the bid does not exist.
    pub fn edit_bid(&mut self, id: BidId, edit: &BidEdit) -> Result<Bid, PersistenceError> {
        versioned::edit_current::<Bids>(&mut self.conn, id, edit)
    }

    /// Appends a copy of an earlier bid version.
    ///
    /// # Errors
    ///
    /// Returns `VersionNotFound` if the version does not exist.
    pub fn rollback_bid(&mut self, id: BidId, version: Version) -> Result<Bid, PersistenceError> {
        versioned::rollback::<Bids>(&mut self.conn, id, version)
    }

    /// Sets the status of the current bid row in place.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the bid does not exist.
    pub fn set_bid_status(
        &mut self,
        id: BidId,
        status: BidStatus,
    ) -> Result<Bid, PersistenceError> {
        versioned::set_status::<Bids>(&mut self.conn, id, status)
    }

    /// Returns every version of a bid, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the bid does not exist.
    pub fn bid_history(&mut self, id: BidId) -> Result<Vec<Bid>, PersistenceError> {
        versioned::history::<Bids>(&mut self.conn, id)
    }

    /// Lists current bids authored by `author_id`, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bids_by_author(
        &mut self,
        author_id: EmployeeId,
        page: Page,
    ) -> Result<Vec<Bid>, PersistenceError> {
        queries::bids::list_by_author(&mut self.conn, author_id, page)
    }

    /// Applies a decision on a bid submitted to `tender_id`.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the bid or tender does not exist.
    pub fn submit_decision(
        &mut self,
        tender_id: TenderId,
        bid_id: BidId,
        decision: BidDecision,
    ) -> Result<Bid, PersistenceError> {
        mutations::decision::submit_decision(&mut self.conn, tender_id, bid_id, decision)
    }
}
