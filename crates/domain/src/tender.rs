// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{OrganizationId, TenderId, Version};
use crate::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_USERNAME_LEN, validate_override, validate_text,
};
use crate::versioned::Versioned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of service a tender procures.
///
/// This is a closed allow-list; listing filters reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Construction,
    Delivery,
    Manufacture,
}

impl ServiceType {
    /// Every allowed service type, in canonical order.
    pub const ALL: [Self; 3] = [Self::Construction, Self::Delivery, Self::Manufacture];

    /// Converts this service type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Construction => "Construction",
            Self::Delivery => "Delivery",
            Self::Manufacture => "Manufacture",
        }
    }
}

impl FromStr for ServiceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Construction" => Ok(Self::Construction),
            "Delivery" => Ok(Self::Delivery),
            "Manufacture" => Ok(Self::Manufacture),
            _ => Err(DomainError::InvalidServiceType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a tender.
///
/// The lifecycle is `Created` → `Published` → `Closed`. `Canceled` is
/// accepted as an input value as well. Transitions are caller-directed:
/// any listed status may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TenderStatus {
    /// Initial state after creation.
    #[default]
    Created,
    /// Visible in the public listing.
    Published,
    /// No longer accepting bids; set when a bid is approved.
    Closed,
    /// Withdrawn by the organization.
    Canceled,
}

impl TenderStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Published => "Published",
            Self::Closed => "Closed",
            Self::Canceled => "Canceled",
        }
    }
}

impl FromStr for TenderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Created" => Ok(Self::Created),
            "Published" => Ok(Self::Published),
            "Closed" => Ok(Self::Closed),
            "Canceled" => Ok(Self::Canceled),
            _ => Err(DomainError::InvalidTenderStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One stored version of a tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tender {
    pub id: TenderId,
    pub version: Version,
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub status: TenderStatus,
    pub organization_id: OrganizationId,
    pub creator_username: String,
    /// RFC 3339 timestamp of when this version row was written.
    pub created_at: String,
}

impl Tender {
    /// Builds the first version of a new tender.
    #[must_use]
    pub fn first_version(new: NewTender, created_at: String) -> Self {
        Self {
            id: TenderId::generate(),
            version: Version::FIRST,
            name: new.name,
            description: new.description,
            service_type: new.service_type,
            status: TenderStatus::Created,
            organization_id: new.organization_id,
            creator_username: new.creator_username,
            created_at,
        }
    }
}

impl Versioned for Tender {
    type Id = TenderId;
    type Status = TenderStatus;
    type Edit = TenderEdit;

    const KIND: &'static str = "Tender";

    fn id(&self) -> TenderId {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn status(&self) -> TenderStatus {
        self.status
    }

    fn with_edit(&self, edit: &TenderEdit) -> Self {
        Self {
            name: pick(edit.name.as_deref(), &self.name),
            description: pick(edit.description.as_deref(), &self.description),
            service_type: edit.service_type.unwrap_or(self.service_type),
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

/// Fields supplied when creating a tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTender {
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub organization_id: OrganizationId,
    pub creator_username: String,
}

impl NewTender {
    /// Validates the text fields of a new tender.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is empty or too long.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_text("name", &self.name, MAX_NAME_LEN)?;
        validate_text("description", &self.description, MAX_DESCRIPTION_LEN)?;
        validate_text("creatorUsername", &self.creator_username, MAX_USERNAME_LEN)?;
        Ok(())
    }
}

/// Partial overrides for a tender edit.
///
/// `None` (or an empty string) keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenderEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<ServiceType>,
}

impl TenderEdit {
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

/// Picks the override when it is set and non-empty, else the current value.
pub(crate) fn pick(candidate: Option<&str>, current: &str) -> String {
    candidate
        .filter(|value| !value.is_empty())
        .unwrap_or(current)
        .to_string()
}
