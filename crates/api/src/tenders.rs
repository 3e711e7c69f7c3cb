// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender workflow.
//!
//! Every operation on an existing tender resolves the principal first
//! (401), then loads the tender (404), then checks organization
//! membership (403).

use procura_domain::{
    EmployeeId, NewTender, OrganizationId, Page, ServiceType, Tender, TenderEdit, TenderId,
    TenderStatus, Version,
};
use procura_persistence::Persistence;
use tracing::info;

use crate::auth::AuthorizationService;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::params::{parse_tender_id, parse_version};
use crate::request_response::{CreateTenderRequest, EditTenderRequest, TenderResponse};

/// Loads a tender and checks that `username` may act on it.
fn load_authorized(
    persistence: &mut Persistence,
    tender_id: &str,
    username: &str,
    action: &str,
) -> Result<Tender, ApiError> {
    let id: TenderId = parse_tender_id(tender_id)?;
    let principal: EmployeeId = AuthorizationService::resolve_principal(persistence, username)?;
    let tender: Tender = persistence
        .get_tender(id)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_tender(persistence, &tender, principal, action)?;
    Ok(tender)
}

/// Creates a tender at version 1 with status `Created`.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The tender fields
///
/// # Errors
///
/// Returns an error if:
/// - A field is missing, too long, or not an allowed value (400)
/// - The creator does not exist (401)
/// - The creator is not responsible for the organization (403)
pub fn create_tender(
    persistence: &mut Persistence,
    request: &CreateTenderRequest,
) -> Result<TenderResponse, ApiError> {
    let new: NewTender = NewTender {
        name: request.name.clone(),
        description: request.description.clone(),
        service_type: request.service_type.parse().map_err(translate_domain_error)?,
        organization_id: request
            .organization_id
            .parse()
            .map_err(translate_domain_error)?,
        creator_username: request.creator_username.clone(),
    };
    new.validate().map_err(translate_domain_error)?;

    let principal: EmployeeId =
        AuthorizationService::resolve_principal(persistence, &new.creator_username)?;
    let organization: OrganizationId =
        AuthorizationService::resolve_organization(persistence, principal)?;
    AuthorizationService::require_organization(
        organization,
        new.organization_id,
        principal,
        "create_tender",
    )?;

    let tender: Tender = persistence
        .create_tender(new)
        .map_err(translate_persistence_error)?;
    info!(
        tender_id = %tender.id,
        username = %tender.creator_username,
        "Created tender"
    );
    Ok(tender.into())
}

/// Lists current tenders created by `username`, ordered by name.
///
/// # Errors
///
/// Returns `Unauthorized` if the user does not exist.
pub fn list_my_tenders(
    persistence: &mut Persistence,
    username: &str,
    page: Page,
) -> Result<Vec<TenderResponse>, ApiError> {
    AuthorizationService::resolve_principal(persistence, username)?;
    let tenders: Vec<Tender> = persistence
        .list_tenders_by_creator(username, page)
        .map_err(translate_persistence_error)?;
    Ok(tenders.into_iter().map(TenderResponse::from).collect())
}

/// Lists current published tenders of the given service types.
///
/// No principal is required.
///
/// # Errors
///
/// Returns `Internal` if the listing fails.
pub fn list_published_tenders(
    persistence: &mut Persistence,
    service_types: &[ServiceType],
    page: Page,
) -> Result<Vec<TenderResponse>, ApiError> {
    let tenders: Vec<Tender> = persistence
        .list_published_tenders(service_types, page)
        .map_err(translate_persistence_error)?;
    Ok(tenders.into_iter().map(TenderResponse::from).collect())
}

/// Returns the current status of a tender.
///
/// # Errors
///
/// Returns 401/404/403 errors as described on the module.
pub fn get_tender_status(
    persistence: &mut Persistence,
    tender_id: &str,
    username: &str,
) -> Result<TenderStatus, ApiError> {
    let tender: Tender = load_authorized(persistence, tender_id, username, "view_tender_status")?;
    Ok(tender.status)
}

/// Sets the status of the current tender version in place.
///
/// The version number does not change.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown status, then 401/404/403 errors
/// as described on the module.
pub fn set_tender_status(
    persistence: &mut Persistence,
    tender_id: &str,
    username: &str,
    status: &str,
) -> Result<TenderResponse, ApiError> {
    let status: TenderStatus = status.parse().map_err(translate_domain_error)?;
    let tender: Tender = load_authorized(persistence, tender_id, username, "set_tender_status")?;
    let updated: Tender = persistence
        .set_tender_status(tender.id, status)
        .map_err(translate_persistence_error)?;
    Ok(updated.into())
}

/// Appends an edited tender version.
///
/// # Errors
///
/// Returns `InvalidInput` if a present field is empty, too long, or not an
/// allowed service type, then 401/404/403 errors as described on the module.
pub fn edit_tender(
    persistence: &mut Persistence,
    tender_id: &str,
    username: &str,
    request: &EditTenderRequest,
) -> Result<TenderResponse, ApiError> {
    let edit: TenderEdit = TenderEdit {
        name: request.name.clone(),
        description: request.description.clone(),
        service_type: request
            .service_type
            .as_deref()
            .map(str::parse::<ServiceType>)
            .transpose()
            .map_err(translate_domain_error)?,
    };
    edit.validate().map_err(translate_domain_error)?;

    let tender: Tender = load_authorized(persistence, tender_id, username, "edit_tender")?;
    let edited: Tender = persistence
        .edit_tender(tender.id, &edit)
        .map_err(translate_persistence_error)?;
    Ok(edited.into())
}

/// Appends a copy of an earlier tender version as the newest version.
///
/// # Errors
///
/// Returns `InvalidInput` for a version below 1, `ResourceNotFound` if the
/// version does not exist, and 401/404/403 errors as described on the module.
pub fn rollback_tender(
    persistence: &mut Persistence,
    tender_id: &str,
    version: &str,
    username: &str,
) -> Result<TenderResponse, ApiError> {
    let target: Version = parse_version(version)?;
    let tender: Tender = load_authorized(persistence, tender_id, username, "rollback_tender")?;
    let restored: Tender = persistence
        .rollback_tender(tender.id, target)
        .map_err(translate_persistence_error)?;
    Ok(restored.into())
}

/// Returns every version of a tender, oldest first.
///
/// # Errors
///
/// Returns 401/404/403 errors as described on the module.
pub fn tender_history(
    persistence: &mut Persistence,
    tender_id: &str,
    username: &str,
) -> Result<Vec<TenderResponse>, ApiError> {
    let tender: Tender = load_authorized(persistence, tender_id, username, "view_tender_history")?;
    let versions: Vec<Tender> = persistence
        .tender_history(tender.id)
        .map_err(translate_persistence_error)?;
    Ok(versions.into_iter().map(TenderResponse::from).collect())
}
