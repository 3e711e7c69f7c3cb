// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry raw strings exactly as they arrived; the workflow
//! functions parse and validate them. Wire names are camelCase.

use procura_domain::{Bid, Tender};
use serde::{Deserialize, Serialize};

/// API request to create a tender.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenderRequest {
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub organization_id: String,
    pub creator_username: String,
}

/// API request to edit a tender. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTenderRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Also accepted under its snake-case name.
    #[serde(alias = "service_type")]
    pub service_type: Option<String>,
}

/// API request to create a bid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBidRequest {
    pub name: String,
    pub description: String,
    pub tender_id: String,
    /// `User` or `Organization`.
    pub author_type: String,
    pub author_id: String,
}

/// API request to edit a bid. Only name and description are editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditBidRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// One tender version as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub organization_id: String,
    pub creator_username: String,
    pub version: i32,
    pub created_at: String,
}

impl From<Tender> for TenderResponse {
    fn from(tender: Tender) -> Self {
        Self {
            id: tender.id.to_string(),
            name: tender.name,
            description: tender.description,
            service_type: tender.service_type.to_string(),
            status: tender.status.to_string(),
            organization_id: tender.organization_id.to_string(),
            creator_username: tender.creator_username,
            version: tender.version.value(),
            created_at: tender.created_at,
        }
    }
}

/// One bid version as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub tender_id: String,
    pub author_type: String,
    pub author_id: String,
    pub version: i32,
    pub created_at: String,
}

impl From<Bid> for BidResponse {
    fn from(bid: Bid) -> Self {
        Self {
            id: bid.id.to_string(),
            name: bid.name,
            description: bid.description,
            status: bid.status.to_string(),
            tender_id: bid.tender_id.to_string(),
            author_type: bid.author.kind().to_string(),
            author_id: bid.author.employee_id().to_string(),
            version: bid.version.value(),
            created_at: bid.created_at,
        }
    }
}
