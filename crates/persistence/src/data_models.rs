// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel row structs and their conversion into domain values.
//!
//! Rows store identifiers and enumerations as text. Conversion re-parses
//! them; a value that fails to parse is reported as `CorruptRow`.

use diesel::prelude::*;
use procura_domain::{Author, AuthorKind, Bid, Tender, Version};

use crate::diesel_schema::{bid, tender};
use crate::error::PersistenceError;

/// Diesel Queryable struct for tender rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = tender)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TenderRow {
    pub id: String,
    pub version: i32,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub organization_id: String,
    pub creator_username: String,
    pub created_at: String,
}

impl TenderRow {
    /// Converts the stored row into a domain `Tender`.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRow` if any stored value fails to parse.
    pub fn into_domain(self) -> Result<Tender, PersistenceError> {
        Ok(Tender {
            id: self.id.parse()?,
            version: Version::new(i64::from(self.version))?,
            name: self.name,
            description: self.description,
            service_type: self.service_type.parse()?,
            status: self.status.parse()?,
            organization_id: self.organization_id.parse()?,
            creator_username: self.creator_username,
            created_at: self.created_at,
        })
    }
}

/// Diesel Queryable struct for bid rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = bid)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BidRow {
    pub id: String,
    pub version: i32,
    pub name: String,
    pub description: String,
    pub tender_id: String,
    pub status: String,
    pub author_type: String,
    pub author_id: String,
    pub created_at: String,
}

impl BidRow {
    /// Converts the stored row into a domain `Bid`.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRow` if any stored value fails to parse.
    pub fn into_domain(self) -> Result<Bid, PersistenceError> {
        let kind: AuthorKind = self.author_type.parse()?;
        Ok(Bid {
            id: self.id.parse()?,
            version: Version::new(i64::from(self.version))?,
            name: self.name,
            description: self.description,
            tender_id: self.tender_id.parse()?,
            status: self.status.parse()?,
            author: Author::from_parts(kind, self.author_id.parse()?),
            created_at: self.created_at,
        })
    }
}
