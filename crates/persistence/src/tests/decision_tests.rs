// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use procura_domain::{Author, Bid, BidDecision, BidId, BidStatus, Tender, TenderId, TenderStatus};

use super::{Fixture, new_bid, new_tender, seed};
use crate::PersistenceError;

fn tender_with_bid(fx: &mut Fixture) -> (Tender, Bid) {
    let tender: Tender = fx
        .persistence
        .create_tender(new_tender(fx.org, "alice", "Road repair"))
        .unwrap();
    let tender: Tender = fx
        .persistence
        .set_tender_status(tender.id, TenderStatus::Published)
        .unwrap();
    let bid: Bid = fx
        .persistence
        .create_bid(new_bid(tender.id, Author::Organization(fx.bob), "Asphalt"))
        .unwrap();
    (tender, bid)
}

#[test]
fn test_approval_closes_tender_and_leaves_bid() {
    let mut fx: Fixture = seed();
    let (tender, bid) = tender_with_bid(&mut fx);

    let decided: Bid = fx
        .persistence
        .submit_decision(tender.id, bid.id, BidDecision::Approved)
        .unwrap();

    assert_eq!(decided, bid);
    assert_eq!(fx.persistence.get_bid(bid.id).unwrap().status, BidStatus::Created);

    let closed: Tender = fx.persistence.get_tender(tender.id).unwrap();
    assert_eq!(closed.status, TenderStatus::Closed);
    assert_eq!(closed.version, tender.version);
}

#[test]
fn test_rejection_cancels_bid_and_leaves_tender() {
    let mut fx: Fixture = seed();
    let (tender, bid) = tender_with_bid(&mut fx);

    let decided: Bid = fx
        .persistence
        .submit_decision(tender.id, bid.id, BidDecision::Rejected)
        .unwrap();

    assert_eq!(decided.status, BidStatus::Canceled);
    assert_eq!(decided.version, bid.version);
    assert_eq!(
        fx.persistence.get_tender(tender.id).unwrap().status,
        TenderStatus::Published
    );
}

#[test]
fn test_approval_of_unknown_bid_changes_nothing() {
    let mut fx: Fixture = seed();
    let (tender, _bid) = tender_with_bid(&mut fx);
    let missing: BidId = BidId::generate();

    let result: Result<Bid, PersistenceError> =
        fx.persistence
            .submit_decision(tender.id, missing, BidDecision::Approved);

    assert_eq!(
        result,
        Err(PersistenceError::EntityNotFound {
            kind: "Bid",
            id: missing.to_string(),
        })
    );
    assert_eq!(
        fx.persistence.get_tender(tender.id).unwrap().status,
        TenderStatus::Published
    );
}

#[test]
fn test_approval_against_unknown_tender_is_not_found() {
    let mut fx: Fixture = seed();
    let (_tender, bid) = tender_with_bid(&mut fx);

    let result: Result<Bid, PersistenceError> =
        fx.persistence
            .submit_decision(TenderId::generate(), bid.id, BidDecision::Approved);

    assert!(matches!(
        result,
        Err(PersistenceError::EntityNotFound { kind: "Tender", .. })
    ));
}

#[test]
fn test_rejection_of_unknown_bid_is_not_found() {
    let mut fx: Fixture = seed();
    let (tender, _bid) = tender_with_bid(&mut fx);

    let result: Result<Bid, PersistenceError> =
        fx.persistence
            .submit_decision(tender.id, BidId::generate(), BidDecision::Rejected);

    assert!(matches!(
        result,
        Err(PersistenceError::EntityNotFound { kind: "Bid", .. })
    ));
}
