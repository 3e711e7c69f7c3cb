// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Decision submission.

use diesel::SqliteConnection;
use procura_domain::{
    Bid, BidDecision, BidId, BidStatus, Tender, TenderId, TenderStatus, Versioned,
};
use tracing::info;

use crate::error::PersistenceError;
use crate::mutations;
use crate::queries;

/// Applies a tender owner's decision on a bid.
///
/// - `Approved`: the tender's current row is set to `Closed`. The bid is
///   left unchanged.
/// - `Rejected`: the bid's current row is set to `Canceled`. The tender is
///   left unchanged.
///
/// Both branches update rows in place and run in one immediate
/// transaction.
///
/// # Returns
///
/// The bid as it stands after the decision.
///
/// # Errors
///
/// Returns `EntityNotFound` if the bid (or, on approval, the tender) does
/// not exist.
pub fn submit_decision(
    conn: &mut SqliteConnection,
    tender_id: TenderId,
    bid_id: BidId,
    decision: BidDecision,
) -> Result<Bid, PersistenceError> {
    conn.immediate_transaction(|conn| match decision {
        BidDecision::Approved => {
            let bid: Bid =
                queries::bids::select_current(conn, bid_id)?.ok_or_else(|| bid_not_found(bid_id))?;

            mutations::tenders::update_status_in_place(conn, tender_id, TenderStatus::Closed)?
                .ok_or_else(|| PersistenceError::EntityNotFound {
                    kind: Tender::KIND,
                    id: tender_id.to_string(),
                })?;

            info!(%bid_id, %tender_id, "Bid approved; tender closed");
            Ok(bid)
        }
        BidDecision::Rejected => {
            let bid: Bid =
                mutations::bids::update_status_in_place(conn, bid_id, BidStatus::Canceled)?
                    .ok_or_else(|| bid_not_found(bid_id))?;

            info!(%bid_id, %tender_id, "Bid rejected; bid canceled");
            Ok(bid)
        }
    })
}

fn bid_not_found(bid_id: BidId) -> PersistenceError {
    PersistenceError::EntityNotFound {
        kind: Bid::KIND,
        id: bid_id.to_string(),
    }
}
