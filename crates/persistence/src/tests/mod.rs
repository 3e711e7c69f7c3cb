// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod concurrency_tests;
mod decision_tests;

use procura_domain::{
    Author, EmployeeId, NewBid, NewTender, OrganizationId, OrganizationType, ServiceType,
    TenderId,
};

use crate::Persistence;

/// A seeded database: two organizations, each with one responsible employee,
/// plus one employee with no organization.
pub struct Fixture {
    pub persistence: Persistence,
    pub org: OrganizationId,
    pub other_org: OrganizationId,
    pub alice: EmployeeId,
    pub bob: EmployeeId,
    pub carol: EmployeeId,
}

pub fn seed_directory(
    persistence: &mut Persistence,
) -> (OrganizationId, OrganizationId, EmployeeId, EmployeeId, EmployeeId) {
    let org: OrganizationId = persistence
        .create_organization("Roads Inc", Some("Road maintenance"), OrganizationType::Llc)
        .unwrap();
    let other_org: OrganizationId = persistence
        .create_organization("Bridges JSC", None, OrganizationType::Jsc)
        .unwrap();

    let alice: EmployeeId = persistence
        .create_employee("alice", Some("Alice"), Some("Archer"))
        .unwrap();
    let bob: EmployeeId = persistence.create_employee("bob", None, None).unwrap();
    let carol: EmployeeId = persistence.create_employee("carol", None, None).unwrap();

    persistence.add_responsible(org, alice).unwrap();
    persistence.add_responsible(other_org, bob).unwrap();

    (org, other_org, alice, bob, carol)
}

pub fn seed() -> Fixture {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (org, other_org, alice, bob, carol) = seed_directory(&mut persistence);

    Fixture {
        persistence,
        org,
        other_org,
        alice,
        bob,
        carol,
    }
}

pub fn new_tender(organization_id: OrganizationId, creator: &str, name: &str) -> NewTender {
    NewTender {
        name: name.to_string(),
        description: String::from("Original scope"),
        service_type: ServiceType::Construction,
        organization_id,
        creator_username: creator.to_string(),
    }
}

pub fn new_bid(tender_id: TenderId, author: Author, name: &str) -> NewBid {
    NewBid {
        name: name.to_string(),
        description: String::from("Original offer"),
        tender_id,
        author,
    }
}
