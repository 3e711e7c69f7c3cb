// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required text field is empty.
    #[error("Field '{field}' must not be empty")]
    EmptyField {
        /// The offending field.
        field: &'static str,
    },
    /// A text field exceeds its maximum length.
    #[error("Field '{field}' must be at most {max} characters (got {actual})")]
    FieldTooLong {
        /// The offending field.
        field: &'static str,
        /// The maximum permitted length in characters.
        max: usize,
        /// The actual length in characters.
        actual: usize,
    },
    /// A service type string is not one of the allowed values.
    #[error("Invalid service type '{0}': must be one of Construction, Delivery, Manufacture")]
    InvalidServiceType(String),
    /// A tender status string is not recognized.
    #[error("Invalid tender status '{0}'")]
    InvalidTenderStatus(String),
    /// A bid status string is not recognized.
    #[error("Invalid bid status '{0}'")]
    InvalidBidStatus(String),
    /// The bid status is valid but may not be set directly by an author.
    #[error("Bid status '{0}' cannot be set directly")]
    StatusNotSettable(String),
    /// A bid decision string is not recognized.
    #[error("Invalid decision '{0}': must be Approved or Rejected")]
    InvalidDecision(String),
    /// An author type string is not recognized.
    #[error("Invalid author type '{0}': must be User or Organization")]
    InvalidAuthorType(String),
    /// An organization type string is not recognized.
    #[error("Invalid organization type '{0}': must be IE, LLC or JSC")]
    InvalidOrganizationType(String),
    /// A version number is not a positive integer.
    #[error("Invalid version {0}: versions start at 1")]
    InvalidVersion(i64),
    /// The next version would overflow.
    #[error("Version counter overflow")]
    VersionOverflow,
    /// An identifier is not a valid UUID.
    #[error("Invalid {kind} id '{value}'")]
    InvalidId {
        /// The identifier kind (tender, bid, ...).
        kind: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
    /// A paging parameter is malformed or negative.
    #[error("Invalid value for {param}: '{value}'")]
    InvalidPaging {
        /// `limit` or `offset`.
        param: &'static str,
        /// The raw value.
        value: String,
    },
}
