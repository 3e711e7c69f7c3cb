// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use procura_domain::DomainError;
use procura_persistence::PersistenceError;
use tracing::error;

/// Outcomes of resolving and authorizing an acting principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No employee exists with the given username.
    PrincipalNotFound {
        /// The username that failed to resolve.
        username: String,
    },
    /// The principal is not a responsible member of any organization.
    NotAffiliated {
        /// The principal that has no membership.
        principal: String,
    },
    /// The principal may not act on the target entity.
    PermissionDenied {
        /// The action that was attempted.
        action: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PrincipalNotFound { username } => {
                write!(f, "User '{username}' does not exist or is invalid")
            }
            Self::NotAffiliated { principal } => {
                write!(f, "User {principal} is not responsible for any organization")
            }
            Self::PermissionDenied { action } => {
                write!(f, "Insufficient permissions to {action}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// Each variant maps to exactly one HTTP status at the server boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The acting principal could not be resolved.
    Unauthorized {
        /// The reason resolution failed.
        reason: String,
    },
    /// The principal is known but may not perform the action.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// A human-readable description of the denial.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { reason } => write!(f, "Unauthorized: {reason}"),
            Self::Forbidden { action, message } => {
                write!(f, "Forbidden ({action}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::PrincipalNotFound { .. } => Self::Unauthorized {
                reason: err.to_string(),
            },
            AuthError::NotAffiliated { .. } => Self::Forbidden {
                action: String::from("resolve_organization"),
                message: err.to_string(),
            },
            AuthError::PermissionDenied { ref action } => Self::Forbidden {
                action: action.clone(),
                message: err.to_string(),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// Every domain error is a rejected input value.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: &'static str = match &err {
        DomainError::EmptyField { field } | DomainError::FieldTooLong { field, .. } => *field,
        DomainError::InvalidServiceType(_) => "serviceType",
        DomainError::InvalidTenderStatus(_)
        | DomainError::InvalidBidStatus(_)
        | DomainError::StatusNotSettable(_) => "status",
        DomainError::InvalidDecision(_) => "decision",
        DomainError::InvalidAuthorType(_) => "authorType",
        DomainError::InvalidOrganizationType(_) => "organizationType",
        DomainError::InvalidVersion(_) | DomainError::VersionOverflow => "version",
        DomainError::InvalidId { kind, .. } => *kind,
        DomainError::InvalidPaging { param, .. } => *param,
    };
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a persistence error into an API error.
///
/// Not-found outcomes keep their message. Everything else is a storage
/// failure: the detail is logged here and replaced by a generic message.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EntityNotFound { kind, .. } => ApiError::ResourceNotFound {
            resource_type: kind.to_string(),
            message: err.to_string(),
        },
        PersistenceError::VersionNotFound { kind, .. } => ApiError::ResourceNotFound {
            resource_type: format!("{kind} version"),
            message: err.to_string(),
        },
        PersistenceError::NotFound(ref msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg.clone(),
        },
        _ => {
            error!(error = %err, "Storage failure");
            ApiError::Internal {
                message: String::from("Storage failure"),
            }
        }
    }
}
