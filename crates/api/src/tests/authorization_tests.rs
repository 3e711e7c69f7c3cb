// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use procura_domain::{
    Author, Bid, BidId, BidStatus, EmployeeId, OrganizationId, ServiceType, Tender, TenderId,
    TenderStatus, Version,
};
use procura_persistence::PersistenceError;

use crate::{ApiError, AuthorizationService, Directory};

/// In-memory directory for exercising the resolver without a database.
#[derive(Default)]
struct FakeDirectory {
    usernames: HashMap<String, EmployeeId>,
    memberships: HashMap<EmployeeId, OrganizationId>,
    failing: bool,
}

impl FakeDirectory {
    fn with_member(mut self, username: &str, org: Option<OrganizationId>) -> (Self, EmployeeId) {
        let id: EmployeeId = EmployeeId::generate();
        self.usernames.insert(username.to_string(), id);
        if let Some(org) = org {
            self.memberships.insert(id, org);
        }
        (self, id)
    }
}

impl Directory for FakeDirectory {
    fn principal_id_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<EmployeeId>, PersistenceError> {
        if self.failing {
            return Err(PersistenceError::DatabaseError(String::from("disk I/O error")));
        }
        Ok(self.usernames.get(username).copied())
    }

    fn organization_id_for_principal(
        &mut self,
        principal: EmployeeId,
    ) -> Result<Option<OrganizationId>, PersistenceError> {
        Ok(self.memberships.get(&principal).copied())
    }

    fn principal_exists(&mut self, principal: EmployeeId) -> Result<bool, PersistenceError> {
        Ok(self.usernames.values().any(|id| *id == principal))
    }
}

fn bid_by(author: Author) -> Bid {
    Bid {
        id: BidId::generate(),
        version: Version::FIRST,
        name: String::from("Offer"),
        description: String::from("Original offer"),
        tender_id: TenderId::generate(),
        status: BidStatus::Created,
        author,
        created_at: String::from("2026-01-01T00:00:00Z"),
    }
}

fn tender_of(org: OrganizationId) -> Tender {
    Tender {
        id: TenderId::generate(),
        version: Version::FIRST,
        name: String::from("Road repair"),
        description: String::from("Original scope"),
        service_type: ServiceType::Construction,
        status: TenderStatus::Created,
        organization_id: org,
        creator_username: String::from("alice"),
        created_at: String::from("2026-01-01T00:00:00Z"),
    }
}

#[test]
fn test_resolve_principal_known_username() {
    let (mut directory, alice) = FakeDirectory::default().with_member("alice", None);

    let resolved: EmployeeId =
        AuthorizationService::resolve_principal(&mut directory, "alice").unwrap();

    assert_eq!(resolved, alice);
}

#[test]
fn test_resolve_principal_unknown_username_is_unauthorized() {
    let mut directory: FakeDirectory = FakeDirectory::default();

    let result: Result<EmployeeId, ApiError> =
        AuthorizationService::resolve_principal(&mut directory, "mallory");

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_resolve_principal_storage_failure_is_internal() {
    let mut directory: FakeDirectory = FakeDirectory {
        failing: true,
        ..FakeDirectory::default()
    };

    let result: Result<EmployeeId, ApiError> =
        AuthorizationService::resolve_principal(&mut directory, "alice");

    let Err(ApiError::Internal { message }) = result else {
        panic!("expected an internal error");
    };
    assert!(!message.contains("disk I/O"));
}

#[test]
fn test_resolve_organization_without_membership_is_forbidden() {
    let (mut directory, carol) = FakeDirectory::default().with_member("carol", None);

    let result: Result<OrganizationId, ApiError> =
        AuthorizationService::resolve_organization(&mut directory, carol);

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_individual_bid_admits_only_its_author() {
    let org: OrganizationId = OrganizationId::generate();
    let (directory, alice) = FakeDirectory::default().with_member("alice", Some(org));
    let (mut directory, dave) = directory.with_member("dave", Some(org));
    let bid: Bid = bid_by(Author::Individual(alice));

    assert!(AuthorizationService::authorize_bid(&mut directory, &bid, alice, "edit_bid").is_ok());

    // Same organization does not matter for an individual bid.
    let denied: Result<(), ApiError> =
        AuthorizationService::authorize_bid(&mut directory, &bid, dave, "edit_bid");
    assert!(matches!(
        denied,
        Err(ApiError::Forbidden { ref action, .. }) if action == "edit_bid"
    ));
}

#[test]
fn test_organization_bid_admits_every_member_of_the_author_organization() {
    let org: OrganizationId = OrganizationId::generate();
    let other: OrganizationId = OrganizationId::generate();
    let (directory, alice) = FakeDirectory::default().with_member("alice", Some(org));
    let (directory, dave) = directory.with_member("dave", Some(org));
    let (mut directory, bob) = directory.with_member("bob", Some(other));
    let bid: Bid = bid_by(Author::Organization(alice));

    assert!(AuthorizationService::authorize_bid(&mut directory, &bid, alice, "edit_bid").is_ok());
    assert!(AuthorizationService::authorize_bid(&mut directory, &bid, dave, "edit_bid").is_ok());
    assert!(matches!(
        AuthorizationService::authorize_bid(&mut directory, &bid, bob, "edit_bid"),
        Err(ApiError::Forbidden { .. })
    ));
}

#[test]
fn test_organization_bid_denied_when_either_side_is_unaffiliated() {
    let org: OrganizationId = OrganizationId::generate();
    let (directory, alice) = FakeDirectory::default().with_member("alice", Some(org));
    let (directory, carol) = directory.with_member("carol", None);
    let (mut directory, erin) = directory.with_member("erin", None);

    let by_alice: Bid = bid_by(Author::Organization(alice));
    assert!(matches!(
        AuthorizationService::authorize_bid(&mut directory, &by_alice, carol, "rollback_bid"),
        Err(ApiError::Forbidden { .. })
    ));

    // Two unaffiliated principals never share an organization.
    let by_erin: Bid = bid_by(Author::Organization(erin));
    assert!(matches!(
        AuthorizationService::authorize_bid(&mut directory, &by_erin, carol, "rollback_bid"),
        Err(ApiError::Forbidden { .. })
    ));
}

#[test]
fn test_authorize_tender_requires_owning_organization() {
    let org: OrganizationId = OrganizationId::generate();
    let other: OrganizationId = OrganizationId::generate();
    let (directory, alice) = FakeDirectory::default().with_member("alice", Some(org));
    let (directory, bob) = directory.with_member("bob", Some(other));
    let (mut directory, carol) = directory.with_member("carol", None);
    let tender: Tender = tender_of(org);

    assert!(
        AuthorizationService::authorize_tender(&mut directory, &tender, alice, "edit_tender")
            .is_ok()
    );
    assert!(matches!(
        AuthorizationService::authorize_tender(&mut directory, &tender, bob, "edit_tender"),
        Err(ApiError::Forbidden { .. })
    ));
    assert!(matches!(
        AuthorizationService::authorize_tender(&mut directory, &tender, carol, "edit_tender"),
        Err(ApiError::Forbidden { .. })
    ));
}
