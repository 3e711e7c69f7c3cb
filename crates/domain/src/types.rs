// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Generates a UUID-backed identifier newtype.
///
/// Each generated type serializes transparently as its hyphenated UUID
/// string and parses with a kind-tagged `DomainError::InvalidId`.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| DomainError::InvalidId {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }
    };
}

uuid_id!(
    /// Identifier of an employee (the acting principal).
    EmployeeId,
    "employee"
);
uuid_id!(
    /// Identifier of an organization.
    OrganizationId,
    "organization"
);
uuid_id!(
    /// Stable identifier shared by every version of one tender.
    TenderId,
    "tender"
);
uuid_id!(
    /// Stable identifier shared by every version of one bid.
    BidId,
    "bid"
);

/// A version number of a versioned entity.
///
/// Versions start at 1 and only ever grow. New version numbers are
/// allocated by the store, never by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(i32);

impl Version {
    /// The version assigned at creation.
    pub const FIRST: Self = Self(1);

    /// Creates a version from a raw number.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is less than 1 or does not fit.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value < 1 {
            return Err(DomainError::InvalidVersion(value));
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| DomainError::InvalidVersion(value))
    }

    /// Returns the version that follows this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter would overflow.
    pub fn next(self) -> Result<Self, DomainError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(DomainError::VersionOverflow)
    }

    /// Returns the raw version number.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Legal form of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganizationType {
    /// Individual entrepreneur.
    #[serde(rename = "IE")]
    Ie,
    /// Limited liability company.
    #[serde(rename = "LLC")]
    Llc,
    /// Joint-stock company.
    #[serde(rename = "JSC")]
    Jsc,
}

impl OrganizationType {
    /// Converts this organization type to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ie => "IE",
            Self::Llc => "LLC",
            Self::Jsc => "JSC",
        }
    }
}

impl FromStr for OrganizationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IE" => Ok(Self::Ie),
            "LLC" => Ok(Self::Llc),
            "JSC" => Ok(Self::Jsc),
            _ => Err(DomainError::InvalidOrganizationType(s.to_string())),
        }
    }
}
