// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use procura_domain::{NewTender, Tender, TenderId, TenderStatus};
use tracing::{debug, info};

use crate::diesel_schema::{tender, tender_head};
use crate::error::PersistenceError;
use crate::mutations::timestamp;
use crate::queries;

/// Creates a tender at version 1 with status `Created`.
///
/// Runs in its own immediate transaction.
///
/// # Errors
///
/// Returns an error if the insert fails, for example because the
/// organization or creator does not exist.
pub fn create_tender(
    conn: &mut SqliteConnection,
    new: NewTender,
) -> Result<Tender, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let tender: Tender = Tender::first_version(new, timestamp()?);
        insert_version(conn, &tender)?;

        info!(
            tender_id = %tender.id,
            organization_id = %tender.organization_id,
            creator = %tender.creator_username,
            "Created tender"
        );
        Ok(tender)
    })
}

/// Inserts a tender version row and advances the head index to it.
///
/// # Errors
///
/// Returns an error if the `(id, version)` pair already exists or a
/// referenced row is missing.
pub fn insert_version(conn: &mut SqliteConnection, row: &Tender) -> Result<(), PersistenceError> {
    let id: String = row.id.to_string();
    let version: i32 = row.version.value();

    diesel::insert_into(tender::table)
        .values((
            tender::id.eq(&id),
            tender::version.eq(version),
            tender::name.eq(&row.name),
            tender::description.eq(&row.description),
            tender::service_type.eq(row.service_type.as_str()),
            tender::status.eq(row.status.as_str()),
            tender::organization_id.eq(row.organization_id.to_string()),
            tender::creator_username.eq(&row.creator_username),
            tender::created_at.eq(&row.created_at),
        ))
        .execute(conn)?;

    diesel::insert_into(tender_head::table)
        .values((
            tender_head::tender_id.eq(&id),
            tender_head::current_version.eq(version),
        ))
        .on_conflict(tender_head::tender_id)
        .do_update()
        .set(tender_head::current_version.eq(version))
        .execute(conn)?;

    debug!(tender_id = %id, version, "Inserted tender version");
    Ok(())
}

/// Overwrites the status of the current tender row without adding a version.
///
/// # Errors
///
/// Returns an error if the update fails.
/// Returns `Ok(None)` if the tender does not exist.
pub fn update_status_in_place(
    conn: &mut SqliteConnection,
    id: TenderId,
    status: TenderStatus,
) -> Result<Option<Tender>, PersistenceError> {
    let Some(current) = queries::tenders::select_max_version(conn, id)? else {
        return Ok(None);
    };

    diesel::update(tender::table.find((id.to_string(), current.value())))
        .set(tender::status.eq(status.as_str()))
        .execute(conn)?;

    queries::tenders::select_current(conn, id)
}
