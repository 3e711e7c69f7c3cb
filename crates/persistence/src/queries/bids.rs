// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bid version queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use procura_domain::{Bid, BidId, EmployeeId, Page, Version};
use tracing::debug;

use crate::data_models::BidRow;
use crate::diesel_schema::{bid, bid_head};
use crate::error::PersistenceError;

/// Retrieves the current version of a bid.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
/// Returns `Ok(None)` if the bid does not exist.
pub fn select_current(
    conn: &mut SqliteConnection,
    id: BidId,
) -> Result<Option<Bid>, PersistenceError> {
    debug!(bid_id = %id, "Selecting current bid version");

    bid::table
        .inner_join(
            bid_head::table.on(bid_head::bid_id
                .eq(bid::id)
                .and(bid_head::current_version.eq(bid::version))),
        )
        .filter(bid::id.eq(id.to_string()))
        .select(BidRow::as_select())
        .first::<BidRow>(conn)
        .optional()?
        .map(BidRow::into_domain)
        .transpose()
}

/// Retrieves one specific version of a bid.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn select_at(
    conn: &mut SqliteConnection,
    id: BidId,
    version: Version,
) -> Result<Option<Bid>, PersistenceError> {
    bid::table
        .find((id.to_string(), version.value()))
        .select(BidRow::as_select())
        .first::<BidRow>(conn)
        .optional()?
        .map(BidRow::into_domain)
        .transpose()
}

/// Retrieves the highest version number stored for a bid, via the head index.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn select_max_version(
    conn: &mut SqliteConnection,
    id: BidId,
) -> Result<Option<Version>, PersistenceError> {
    let current: Option<i32> = bid_head::table
        .find(id.to_string())
        .select(bid_head::current_version)
        .first::<i32>(conn)
        .optional()?;

    Ok(current
        .map(|value| Version::new(i64::from(value)))
        .transpose()?)
}

/// Retrieves every stored version of a bid, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn select_history(
    conn: &mut SqliteConnection,
    id: BidId,
) -> Result<Vec<Bid>, PersistenceError> {
    bid::table
        .filter(bid::id.eq(id.to_string()))
        .order(bid::version.asc())
        .select(BidRow::as_select())
        .load::<BidRow>(conn)?
        .into_iter()
        .map(BidRow::into_domain)
        .collect()
}

/// Lists the current versions of bids whose author is `author_id`.
///
/// Matches both individual and organization-authored bids. Results are
/// ordered by name and windowed by `page`.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_by_author(
    conn: &mut SqliteConnection,
    author_id: EmployeeId,
    page: Page,
) -> Result<Vec<Bid>, PersistenceError> {
    debug!(author_id = %author_id, limit = page.limit, offset = page.offset, "Listing bids by author");

    bid::table
        .inner_join(
            bid_head::table.on(bid_head::bid_id
                .eq(bid::id)
                .and(bid_head::current_version.eq(bid::version))),
        )
        .filter(bid::author_id.eq(author_id.to_string()))
        .order((bid::name.asc(), bid::id.asc()))
        .limit(page.limit)
        .offset(page.offset)
        .select(BidRow::as_select())
        .load::<BidRow>(conn)?
        .into_iter()
        .map(BidRow::into_domain)
        .collect()
}
