// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Principal resolution and organization-based authorization.
//!
//! A principal is an employee acting by username. Permission to act on a
//! tender or bid flows through organization membership: a tender belongs to
//! an organization, and an organization-authored bid belongs to the
//! organization of its nominal author.

use procura_domain::{Author, Bid, EmployeeId, OrganizationId, Tender};
use procura_persistence::{Persistence, PersistenceError};
use tracing::{debug, warn};

use crate::error::{ApiError, AuthError, translate_persistence_error};

/// Lookups the authorization resolver needs from the employee directory.
pub trait Directory {
    /// Returns the id of the employee with `username`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn principal_id_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<EmployeeId>, PersistenceError>;

    /// Returns the organization the principal is responsible for, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn organization_id_for_principal(
        &mut self,
        principal: EmployeeId,
    ) -> Result<Option<OrganizationId>, PersistenceError>;

    /// Returns whether an employee with this id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn principal_exists(&mut self, principal: EmployeeId) -> Result<bool, PersistenceError>;
}

impl Directory for Persistence {
    fn principal_id_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<EmployeeId>, PersistenceError> {
        self.employee_id_by_username(username)
    }

    fn organization_id_for_principal(
        &mut self,
        principal: EmployeeId,
    ) -> Result<Option<OrganizationId>, PersistenceError> {
        self.organization_id_for_employee(principal)
    }

    fn principal_exists(&mut self, principal: EmployeeId) -> Result<bool, PersistenceError> {
        self.employee_exists(principal)
    }
}

/// Authorization service for enforcing organization-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Resolves a username to the acting principal.
    ///
    /// # Arguments
    ///
    /// * `directory` - The employee directory
    /// * `username` - The username supplied with the request
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if no employee has this username.
    pub fn resolve_principal<D: Directory>(
        directory: &mut D,
        username: &str,
    ) -> Result<EmployeeId, ApiError> {
        directory
            .principal_id_by_username(username)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| {
                warn!(username, "Unknown principal");
                ApiError::from(AuthError::PrincipalNotFound {
                    username: username.to_string(),
                })
            })
    }

    /// Resolves the organization a principal is responsible for.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if the principal has no membership.
    pub fn resolve_organization<D: Directory>(
        directory: &mut D,
        principal: EmployeeId,
    ) -> Result<OrganizationId, ApiError> {
        directory
            .organization_id_for_principal(principal)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| {
                warn!(%principal, "Principal is not affiliated with any organization");
                ApiError::from(AuthError::NotAffiliated {
                    principal: principal.to_string(),
                })
            })
    }

    /// Checks that `principal` may act on a bid written by `author`.
    ///
    /// An individually authored bid admits only its author. An
    /// organization-authored bid admits every responsible member of the
    /// author's organization.
    ///
    /// # Arguments
    ///
    /// * `directory` - The employee directory
    /// * `bid` - The bid being acted on
    /// * `principal` - The acting principal
    /// * `action` - The action name, used in the denial
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if the principal may not act on the bid. A
    /// failed organization lookup on either side is also a denial.
    pub fn authorize_bid<D: Directory>(
        directory: &mut D,
        bid: &Bid,
        principal: EmployeeId,
        action: &str,
    ) -> Result<(), ApiError> {
        let permitted: bool = match bid.author {
            Author::Individual(author) => author == principal,
            Author::Organization(author) => {
                let acting: Option<OrganizationId> = directory
                    .organization_id_for_principal(principal)
                    .map_err(translate_persistence_error)?;
                let owning: Option<OrganizationId> = directory
                    .organization_id_for_principal(author)
                    .map_err(translate_persistence_error)?;
                matches!((acting, owning), (Some(a), Some(o)) if a == o)
            }
        };

        if permitted {
            debug!(bid_id = %bid.id, %principal, action, "Bid access granted");
            Ok(())
        } else {
            warn!(bid_id = %bid.id, %principal, action, "Bid access denied");
            Err(AuthError::PermissionDenied {
                action: action.to_string(),
            }
            .into())
        }
    }

    /// Checks that `principal` may act on a tender.
    ///
    /// Tenders are owned by an organization, so the principal must be a
    /// responsible member of it.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if the principal is unaffiliated or belongs to a
    /// different organization.
    pub fn authorize_tender<D: Directory>(
        directory: &mut D,
        tender: &Tender,
        principal: EmployeeId,
        action: &str,
    ) -> Result<(), ApiError> {
        let organization: OrganizationId = Self::resolve_organization(directory, principal)?;
        Self::require_organization(organization, tender.organization_id, principal, action)
    }

    /// Checks that the principal's organization is the owning one.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if the organizations differ.
    pub fn require_organization(
        acting: OrganizationId,
        owning: OrganizationId,
        principal: EmployeeId,
        action: &str,
    ) -> Result<(), ApiError> {
        if acting == owning {
            return Ok(());
        }
        warn!(%principal, %acting, %owning, action, "Organization mismatch");
        Err(AuthError::PermissionDenied {
            action: action.to_string(),
        }
        .into())
    }
}
