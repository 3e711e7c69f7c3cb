// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bid workflow, including decisions on submitted bids.

use procura_domain::{
    Author, AuthorKind, Bid, BidDecision, BidEdit, BidId, BidStatus, EmployeeId, NewBid,
    OrganizationId, Page, Tender, Version,
};
use procura_persistence::Persistence;
use tracing::info;

use crate::auth::{AuthorizationService, Directory};
use crate::error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
use crate::params::{parse_bid_id, parse_version};
use crate::request_response::{BidResponse, CreateBidRequest, EditBidRequest};

fn load_authorized(
    persistence: &mut Persistence,
    bid_id: &str,
    username: &str,
    action: &str,
) -> Result<Bid, ApiError> {
    let id: BidId = parse_bid_id(bid_id)?;
    let principal: EmployeeId = AuthorizationService::resolve_principal(persistence, username)?;
    let bid: Bid = persistence.get_bid(id).map_err(translate_persistence_error)?;
    AuthorizationService::authorize_bid(persistence, &bid, principal, action)?;
    Ok(bid)
}

/// Creates a bid at version 1 with status `Created`.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The bid fields
///
/// # Errors
///
/// Returns an error if:
/// - A field is missing, too long, or not an allowed value (400)
/// - The author does not exist (401)
/// - An organization author is not affiliated with any organization (403)
/// - The tender does not exist (404)
pub fn create_bid(
    persistence: &mut Persistence,
    request: &CreateBidRequest,
) -> Result<BidResponse, ApiError> {
    let kind: AuthorKind = request.author_type.parse().map_err(translate_domain_error)?;
    let author_id: EmployeeId = request.author_id.parse().map_err(translate_domain_error)?;
    let new: NewBid = NewBid {
        name: request.name.clone(),
        description: request.description.clone(),
        tender_id: request.tender_id.parse().map_err(translate_domain_error)?,
        author: Author::from_parts(kind, author_id),
    };
    new.validate().map_err(translate_domain_error)?;

    let exists: bool = persistence
        .principal_exists(author_id)
        .map_err(translate_persistence_error)?;
    if !exists {
        return Err(AuthError::PrincipalNotFound {
            username: author_id.to_string(),
        }
        .into());
    }
    if kind == AuthorKind::Organization {
        AuthorizationService::resolve_organization(persistence, author_id)?;
    }

    let bid: Bid = persistence
        .create_bid(new)
        .map_err(translate_persistence_error)?;
    info!(
        bid_id = %bid.id,
        tender_id = %bid.tender_id,
        author_type = %kind,
        %author_id,
        "Created bid"
    );
    Ok(bid.into())
}

/// Lists current bids authored by `username`, ordered by name.
///
/// # Errors
///
/// Returns `Unauthorized` if the user does not exist.
pub fn list_my_bids(
    persistence: &mut Persistence,
    username: &str,
    page: Page,
) -> Result<Vec<BidResponse>, ApiError> {
    let principal: EmployeeId = AuthorizationService::resolve_principal(persistence, username)?;
    let bids: Vec<Bid> = persistence
        .list_bids_by_author(principal, page)
        .map_err(translate_persistence_error)?;
    Ok(bids.into_iter().map(BidResponse::from).collect())
}

/// Returns the current status of a bid.
///
/// # Errors
///
/// Returns `Unauthorized`, `ResourceNotFound` or `Forbidden`.
pub fn get_bid_status(
    persistence: &mut Persistence,
    bid_id: &str,
    username: &str,
) -> Result<BidStatus, ApiError> {
    let bid: Bid = load_authorized(persistence, bid_id, username, "view_bid_status")?;
    Ok(bid.status)
}

/// Sets the status of the current bid version in place.
///
/// Only `Created`, `Published` and `Canceled` may be set this way.
///
/// # Errors
///
/// Returns `InvalidInput` for any other status, then `Unauthorized`,
/// `ResourceNotFound` or `Forbidden`.
pub fn set_bid_status(
    persistence: &mut Persistence,
    bid_id: &str,
    username: &str,
    status: &str,
) -> Result<BidResponse, ApiError> {
    let status: BidStatus = BidStatus::parse_settable(status).map_err(translate_domain_error)?;
    let bid: Bid = load_authorized(persistence, bid_id, username, "set_bid_status")?;
    let updated: Bid = persistence
        .set_bid_status(bid.id, status)
        .map_err(translate_persistence_error)?;
    Ok(updated.into())
}

/// Appends an edited bid version.
///
/// # Errors
///
/// Returns `InvalidInput` if a present field is empty or too long, then
/// `Unauthorized`, `ResourceNotFound` or `Forbidden`.
pub fn edit_bid(
    persistence: &mut Persistence,
    bid_id: &str,
    username: &str,
    request: &EditBidRequest,
) -> Result<BidResponse, ApiError> {
    let edit: BidEdit = BidEdit {
        name: request.name.clone(),
        description: request.description.clone(),
    };
    edit.validate().map_err(translate_domain_error)?;

    let bid: Bid = load_authorized(persistence, bid_id, username, "edit_bid")?;
    let edited: Bid = persistence
        .edit_bid(bid.id, &edit)
        .map_err(translate_persistence_error)?;
    Ok(edited.into())
}

/// Appends a copy of an earlier bid version as the newest version.
///
/// # Errors
///
/// Returns `InvalidInput` for a version below 1, `ResourceNotFound` if the
/// bid or version does not exist, `Unauthorized` or `Forbidden`.
pub fn rollback_bid(
    persistence: &mut Persistence,
    bid_id: &str,
    version: &str,
    username: &str,
) -> Result<BidResponse, ApiError> {
    let target: Version = parse_version(version)?;
    let bid: Bid = load_authorized(persistence, bid_id, username, "rollback_bid")?;
    let restored: Bid = persistence
        .rollback_bid(bid.id, target)
        .map_err(translate_persistence_error)?;
    Ok(restored.into())
}

/// Returns every version of a bid, oldest first.
///
/// # Errors
///
/// Returns `Unauthorized`, `ResourceNotFound` or `Forbidden`.
pub fn bid_history(
    persistence: &mut Persistence,
    bid_id: &str,
    username: &str,
) -> Result<Vec<BidResponse>, ApiError> {
    let bid: Bid = load_authorized(persistence, bid_id, username, "view_bid_history")?;
    let versions: Vec<Bid> = persistence
        .bid_history(bid.id)
        .map_err(translate_persistence_error)?;
    Ok(versions.into_iter().map(BidResponse::from).collect())
}

/// Applies the tender owner's decision to a submitted bid.
///
/// Approval closes the tender and leaves the bid as it is. Rejection
/// cancels the bid and leaves the tender as it is. The bid is returned
/// in its state after the decision.
///
/// Checks run in this order: decision value (400), bid (404), principal
/// (401), tender (404), then membership in the tender's organization (403).
///
/// # Errors
///
/// Returns the error of the first failing check, or `Internal` if the
/// decision cannot be stored.
pub fn submit_decision(
    persistence: &mut Persistence,
    bid_id: &str,
    username: &str,
    decision: &str,
) -> Result<BidResponse, ApiError> {
    let decision: BidDecision = decision.parse().map_err(translate_domain_error)?;
    let id: BidId = parse_bid_id(bid_id)?;

    let bid: Bid = persistence.get_bid(id).map_err(translate_persistence_error)?;
    let principal: EmployeeId = AuthorizationService::resolve_principal(persistence, username)?;
    let tender: Tender = persistence
        .get_tender(bid.tender_id)
        .map_err(translate_persistence_error)?;
    let organization: OrganizationId =
        AuthorizationService::resolve_organization(persistence, principal)?;
    AuthorizationService::require_organization(
        organization,
        tender.organization_id,
        principal,
        "submit_decision",
    )?;

    let decided: Bid = persistence
        .submit_decision(tender.id, bid.id, decision)
        .map_err(translate_persistence_error)?;
    info!(
        bid_id = %decided.id,
        tender_id = %tender.id,
        %decision,
        username,
        "Submitted decision"
    );
    Ok(decided.into())
}
