// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bid mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use procura_domain::{Bid, BidId, BidStatus, NewBid, Tender, Versioned};
use tracing::{debug, info};

use crate::diesel_schema::{bid, bid_head};
use crate::error::PersistenceError;
use crate::mutations::timestamp;
use crate::queries;

/// Creates a bid at version 1 with status `Created`.
///
/// Runs in its own immediate transaction.
///
/// # Errors
///
/// Returns `EntityNotFound` if the target tender does not exist, or an
/// error if the insert fails.
pub fn create_bid(conn: &mut SqliteConnection, new: NewBid) -> Result<Bid, PersistenceError> {
    conn.immediate_transaction(|conn| {
        if queries::tenders::select_max_version(conn, new.tender_id)?.is_none() {
            return Err(PersistenceError::EntityNotFound {
                kind: Tender::KIND,
                id: new.tender_id.to_string(),
            });
        }

        let bid: Bid = Bid::first_version(new, timestamp()?);
        insert_version(conn, &bid)?;

        info!(
            bid_id = %bid.id,
            tender_id = %bid.tender_id,
            author_type = %bid.author.kind(),
            author_id = %bid.author.employee_id(),
            "Created bid"
        );
        Ok(bid)
    })
}

/// Inserts a bid version row and advances the head index to it.
///
/// # Errors
///
/// Returns an error if the `(id, version)` pair already exists or a
/// referenced row is missing.
pub fn insert_version(conn: &mut SqliteConnection, row: &Bid) -> Result<(), PersistenceError> {
    let id: String = row.id.to_string();
    let version: i32 = row.version.value();

    diesel::insert_into(bid::table)
        .values((
            bid::id.eq(&id),
            bid::version.eq(version),
            bid::name.eq(&row.name),
            bid::description.eq(&row.description),
            bid::tender_id.eq(row.tender_id.to_string()),
            bid::status.eq(row.status.as_str()),
            bid::author_type.eq(row.author.kind().as_str()),
            bid::author_id.eq(row.author.employee_id().to_string()),
            bid::created_at.eq(&row.created_at),
        ))
        .execute(conn)?;

    diesel::insert_into(bid_head::table)
        .values((bid_head::bid_id.eq(&id), bid_head::current_version.eq(version)))
        .on_conflict(bid_head::bid_id)
        .do_update()
        .set(bid_head::current_version.eq(version))
        .execute(conn)?;

    debug!(bid_id = %id, version, "Inserted bid version");
    Ok(())
}

/// Overwrites the status of the current bid row without adding a version.
///
/// # Errors
///
/// Returns an error if the update fails.
/// Returns `Ok(None)` if the bid does not exist.
pub fn update_status_in_place(
    conn: &mut SqliteConnection,
    id: BidId,
    status: BidStatus,
) -> Result<Option<Bid>, PersistenceError> {
    let Some(current) = queries::bids::select_max_version(conn, id)? else {
        return Ok(None);
    };

    diesel::update(bid::table.find((id.to_string(), current.value())))
        .set(bid::status.eq(status.as_str()))
        .execute(conn)?;

    queries::bids::select_current(conn, id)
}
