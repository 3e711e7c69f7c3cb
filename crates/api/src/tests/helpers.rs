// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use procura_domain::{EmployeeId, OrganizationId, OrganizationType};
use procura_persistence::Persistence;

use crate::{
    BidResponse, CreateBidRequest, CreateTenderRequest, TenderResponse, create_bid, create_tender,
};

/// A seeded in-memory database.
///
/// `alice` and `dave` are responsible for `org`, `bob` for `other_org`,
/// and `carol` for nothing.
pub struct Fixture {
    pub persistence: Persistence,
    pub org: OrganizationId,
    pub other_org: OrganizationId,
    pub alice: EmployeeId,
    pub bob: EmployeeId,
    pub carol: EmployeeId,
    pub dave: EmployeeId,
}

pub fn seed() -> Fixture {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let org: OrganizationId = persistence
        .create_organization("Roads Ltd", Some("Road works"), OrganizationType::Llc)
        .unwrap();
    let other_org: OrganizationId = persistence
        .create_organization("Bridges JSC", None, OrganizationType::Jsc)
        .unwrap();

    let alice: EmployeeId = persistence
        .create_employee("alice", Some("Alice"), Some("Archer"))
        .unwrap();
    let bob: EmployeeId = persistence.create_employee("bob", None, None).unwrap();
    let carol: EmployeeId = persistence.create_employee("carol", None, None).unwrap();
    let dave: EmployeeId = persistence.create_employee("dave", None, None).unwrap();

    persistence.add_responsible(org, alice).unwrap();
    persistence.add_responsible(org, dave).unwrap();
    persistence.add_responsible(other_org, bob).unwrap();

    Fixture {
        persistence,
        org,
        other_org,
        alice,
        bob,
        carol,
        dave,
    }
}

pub fn tender_request(org: OrganizationId, creator: &str, name: &str) -> CreateTenderRequest {
    CreateTenderRequest {
        name: name.to_string(),
        description: String::from("Original scope"),
        service_type: String::from("Construction"),
        organization_id: org.to_string(),
        creator_username: creator.to_string(),
    }
}

pub fn bid_request(tender_id: &str, author_type: &str, author: EmployeeId) -> CreateBidRequest {
    CreateBidRequest {
        name: String::from("Offer"),
        description: String::from("Original offer"),
        tender_id: tender_id.to_string(),
        author_type: author_type.to_string(),
        author_id: author.to_string(),
    }
}

/// Creates a tender owned by `fixture.org`, created by alice.
pub fn alice_tender(fixture: &mut Fixture, name: &str) -> TenderResponse {
    let request: CreateTenderRequest = tender_request(fixture.org, "alice", name);
    create_tender(&mut fixture.persistence, &request).unwrap()
}

pub fn submit_bid(
    persistence: &mut Persistence,
    tender_id: &str,
    author_type: &str,
    author: EmployeeId,
) -> BidResponse {
    let request: CreateBidRequest = bid_request(tender_id, author_type, author);
    create_bid(persistence, &request).unwrap()
}
