// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Procura tender/bid service.
//!
//! This crate sits between the HTTP server and persistence. It resolves
//! the acting principal, enforces organization-based authorization,
//! validates raw request values, and translates domain and storage errors
//! into the [`ApiError`] contract. It knows nothing about HTTP itself.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod bids;
mod error;
mod params;
mod request_response;
mod tenders;

#[cfg(test)]
mod tests;

pub use auth::{AuthorizationService, Directory};
pub use bids::{
    bid_history, create_bid, edit_bid, get_bid_status, list_my_bids, rollback_bid,
    set_bid_status, submit_decision,
};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use params::{
    parse_bid_id, parse_page, parse_service_types, parse_tender_id, parse_version, required,
};
pub use request_response::{
    BidResponse, CreateBidRequest, CreateTenderRequest, EditBidRequest, EditTenderRequest,
    TenderResponse,
};
pub use tenders::{
    create_tender, edit_tender, get_tender_status, list_my_tenders, list_published_tenders,
    rollback_tender, set_tender_status, tender_history,
};
