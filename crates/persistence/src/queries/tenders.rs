// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender version queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use procura_domain::{Page, ServiceType, Tender, TenderId, TenderStatus, Version};
use tracing::debug;

use crate::data_models::TenderRow;
use crate::diesel_schema::{tender, tender_head};
use crate::error::PersistenceError;

/// Retrieves the current version of a tender.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
/// Returns `Ok(None)` if the tender does not exist.
pub fn select_current(
    conn: &mut SqliteConnection,
    id: TenderId,
) -> Result<Option<Tender>, PersistenceError> {
    debug!(tender_id = %id, "Selecting current tender version");

    tender::table
        .inner_join(
            tender_head::table.on(tender_head::tender_id
                .eq(tender::id)
                .and(tender_head::current_version.eq(tender::version))),
        )
        .filter(tender::id.eq(id.to_string()))
        .select(TenderRow::as_select())
        .first::<TenderRow>(conn)
        .optional()?
        .map(TenderRow::into_domain)
        .transpose()
}

/// Retrieves one specific version of a tender.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn select_at(
    conn: &mut SqliteConnection,
    id: TenderId,
    version: Version,
) -> Result<Option<Tender>, PersistenceError> {
    debug!(tender_id = %id, %version, "Selecting tender version");

    tender::table
        .find((id.to_string(), version.value()))
        .select(TenderRow::as_select())
        .first::<TenderRow>(conn)
        .optional()?
        .map(TenderRow::into_domain)
        .transpose()
}

/// Retrieves the highest version number stored for a tender.
///
/// The head index always points at the highest version, so this reads the
/// head rather than aggregating over the version rows.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn select_max_version(
    conn: &mut SqliteConnection,
    id: TenderId,
) -> Result<Option<Version>, PersistenceError> {
    let current: Option<i32> = tender_head::table
        .find(id.to_string())
        .select(tender_head::current_version)
        .first::<i32>(conn)
        .optional()?;

    Ok(current
        .map(|value| Version::new(i64::from(value)))
        .transpose()?)
}

/// Retrieves every stored version of a tender, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn select_history(
    conn: &mut SqliteConnection,
    id: TenderId,
) -> Result<Vec<Tender>, PersistenceError> {
    tender::table
        .filter(tender::id.eq(id.to_string()))
        .order(tender::version.asc())
        .select(TenderRow::as_select())
        .load::<TenderRow>(conn)?
        .into_iter()
        .map(TenderRow::into_domain)
        .collect()
}

/// Lists the current versions of tenders created by `username`.
///
/// Results are ordered by name and windowed by `page`.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_by_creator(
    conn: &mut SqliteConnection,
    username: &str,
    page: Page,
) -> Result<Vec<Tender>, PersistenceError> {
    debug!(username, limit = page.limit, offset = page.offset, "Listing tenders by creator");

    tender::table
        .inner_join(
            tender_head::table.on(tender_head::tender_id
                .eq(tender::id)
                .and(tender_head::current_version.eq(tender::version))),
        )
        .filter(tender::creator_username.eq(username))
        .order((tender::name.asc(), tender::id.asc()))
        .limit(page.limit)
        .offset(page.offset)
        .select(TenderRow::as_select())
        .load::<TenderRow>(conn)?
        .into_iter()
        .map(TenderRow::into_domain)
        .collect()
}

/// Lists the current versions of published tenders of the given service types.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_published(
    conn: &mut SqliteConnection,
    service_types: &[ServiceType],
    page: Page,
) -> Result<Vec<Tender>, PersistenceError> {
    let wanted: Vec<&'static str> = service_types.iter().map(ServiceType::as_str).collect();
    debug!(?wanted, limit = page.limit, offset = page.offset, "Listing published tenders");

    tender::table
        .inner_join(
            tender_head::table.on(tender_head::tender_id
                .eq(tender::id)
                .and(tender_head::current_version.eq(tender::version))),
        )
        .filter(tender::status.eq(TenderStatus::Published.as_str()))
        .filter(tender::service_type.eq_any(wanted))
        .order((tender::name.asc(), tender::id.asc()))
        .limit(page.limit)
        .offset(page.offset)
        .select(TenderRow::as_select())
        .load::<TenderRow>(conn)?
        .into_iter()
        .map(TenderRow::into_domain)
        .collect()
}
