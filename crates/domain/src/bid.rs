// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::tender::pick;
use crate::types::{BidId, EmployeeId, TenderId, Version};
use crate::validation::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN, validate_override, validate_text};
use crate::versioned::Versioned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status of a bid.
///
/// Authors move a bid between `Created`, `Published` and `Canceled`.
/// `Approved` and `Rejected` are recognized values but are never set
/// through a plain status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BidStatus {
    #[default]
    Created,
    Published,
    Canceled,
    Approved,
    Rejected,
}

impl BidStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Published => "Published",
            Self::Canceled => "Canceled",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Parses a status that an author may set directly.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBidStatus` for unknown strings and
    /// `StatusNotSettable` for `Approved` or `Rejected`.
    pub fn parse_settable(s: &str) -> Result<Self, DomainError> {
        let status: Self = s.parse()?;
        match status {
            Self::Created | Self::Published | Self::Canceled => Ok(status),
            Self::Approved | Self::Rejected => Err(DomainError::StatusNotSettable(s.to_string())),
        }
    }
}

impl FromStr for BidStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Created" => Ok(Self::Created),
            "Published" => Ok(Self::Published),
            "Canceled" => Ok(Self::Canceled),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidBidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tender owner's decision on a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidDecision {
    Approved,
    Rejected,
}

impl BidDecision {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl FromStr for BidDecision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidDecision(s.to_string())),
        }
    }
}

impl std::fmt::Display for BidDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The tag of a bid author, as stored and sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorKind {
    /// A single employee acting for themselves. Wire name `User`.
    #[serde(rename = "User")]
    Individual,
    /// An employee acting for their organization.
    Organization,
}

impl AuthorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "User",
            Self::Organization => "Organization",
        }
    }
}

impl FromStr for AuthorKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Self::Individual),
            "Organization" => Ok(Self::Organization),
            _ => Err(DomainError::InvalidAuthorType(s.to_string())),
        }
    }
}

impl std::fmt::Display for AuthorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The author of a bid.
///
/// Both variants carry an employee id. For an organization-authored bid
/// the employee is the nominal author, and permission extends to every
/// responsible member of that employee's organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Author {
    Individual(EmployeeId),
    Organization(EmployeeId),
}

impl Author {
    /// Builds an author from its stored `(kind, id)` pair.
    #[must_use]
    pub const fn from_parts(kind: AuthorKind, employee_id: EmployeeId) -> Self {
        match kind {
            AuthorKind::Individual => Self::Individual(employee_id),
            AuthorKind::Organization => Self::Organization(employee_id),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> AuthorKind {
        match self {
            Self::Individual(_) => AuthorKind::Individual,
            Self::Organization(_) => AuthorKind::Organization,
        }
    }

    #[must_use]
    pub const fn employee_id(&self) -> EmployeeId {
        match self {
            Self::Individual(id) | Self::Organization(id) => *id,
        }
    }
}

/// One stored version of a bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bid {
    pub id: BidId,
    pub version: Version,
    pub name: String,
    pub description: String,
    pub tender_id: TenderId,
    pub status: BidStatus,
    pub author: Author,
    pub created_at: String,
}

impl Bid {
    /// Builds the first version of a new bid.
    #[must_use]
    pub fn first_version(new: NewBid, created_at: String) -> Self {
        Self {
            id: BidId::generate(),
            version: Version::FIRST,
            name: new.name,
            description: new.description,
            tender_id: new.tender_id,
            status: BidStatus::Created,
            author: new.author,
            created_at,
        }
    }
}

impl Versioned for Bid {
    type Id = BidId;
    type Status = BidStatus;
    type Edit = BidEdit;

    const KIND: &'static str = "Bid";

    fn id(&self) -> BidId {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn status(&self) -> BidStatus {
        self.status
    }

    fn with_edit(&self, edit: &BidEdit) -> Self {
        Self {
            name: pick(edit.name.as_deref(), &self.name),
            description: pick(edit.description.as_deref(), &self.description),
            ..self.clone()
        }
    }

    fn restamped(&self, version: Version, created_at: String) -> Self {
        Self {
            version,
            created_at,
            ..self.clone()
        }
    }
}

/// Fields supplied when creating a bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBid {
    pub name: String,
    pub description: String,
    pub tender_id: TenderId,
    pub author: Author,
}

impl NewBid {
    /// Validates the text fields of a new bid.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is empty or too long.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_text("name", &self.name, MAX_NAME_LEN)?;
        validate_text("description", &self.description, MAX_DESCRIPTION_LEN)?;
        Ok(())
    }
}

/// Partial overrides for a bid edit. Only name and description change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidEdit {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl BidEdit {
    /// Validates the overrides that are present.
    ///
    /// # Errors
    ///
    /// Returns an error if a present field is empty or too long.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_override("name", self.name.as_deref(), MAX_NAME_LEN)?;
        validate_override("description", self.description.as_deref(), MAX_DESCRIPTION_LEN)?;
        Ok(())
    }
}
