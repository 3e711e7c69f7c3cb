// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod bid;
mod error;
mod paging;
mod tender;
mod types;
mod validation;
mod versioned;

#[cfg(test)]
mod tests;

pub use bid::{Author, AuthorKind, Bid, BidDecision, BidEdit, BidStatus, NewBid};
pub use error::DomainError;
pub use paging::Page;
pub use tender::{NewTender, ServiceType, Tender, TenderEdit, TenderStatus};
pub use types::{BidId, EmployeeId, OrganizationId, OrganizationType, TenderId, Version};
pub use validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_USERNAME_LEN, validate_override, validate_text,
};
pub use versioned::Versioned;
