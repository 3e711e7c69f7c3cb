// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parsing of raw path and query parameters.

use procura_domain::{BidId, Page, ServiceType, TenderId, Version};

use crate::error::{ApiError, translate_domain_error};

/// Returns a required parameter, rejecting absent or blank values.
///
/// # Errors
///
/// Returns `InvalidInput` if the value is absent or blank.
pub fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("'{field}' is required"),
        }),
    }
}

/// Parses a tender id.
///
/// # Errors
///
/// Returns `InvalidInput` if the value is not a UUID.
pub fn parse_tender_id(raw: &str) -> Result<TenderId, ApiError> {
    raw.parse().map_err(translate_domain_error)
}

/// Parses a bid id.
///
/// # Errors
///
/// Returns `InvalidInput` if the value is not a UUID.
pub fn parse_bid_id(raw: &str) -> Result<BidId, ApiError> {
    raw.parse().map_err(translate_domain_error)
}

/// Parses a rollback target version.
///
/// # Errors
///
/// Returns `InvalidInput` unless the value is an integer of at least 1.
pub fn parse_version(raw: &str) -> Result<Version, ApiError> {
    let value: i64 = raw.trim().parse().map_err(|_| ApiError::InvalidInput {
        field: String::from("version"),
        message: format!("'{raw}' is not an integer"),
    })?;
    Version::new(value).map_err(translate_domain_error)
}

/// Parses `limit` and `offset`.
///
/// # Errors
///
/// Returns `InvalidInput` for negative or non-integer values.
pub fn parse_page(limit: Option<&str>, offset: Option<&str>) -> Result<Page, ApiError> {
    Page::parse(limit, offset).map_err(translate_domain_error)
}

/// Parses a service type filter. An empty filter selects every type.
///
/// # Errors
///
/// Returns `InvalidInput` if any value is outside the allow-list.
pub fn parse_service_types<S: AsRef<str>>(raw: &[S]) -> Result<Vec<ServiceType>, ApiError> {
    if raw.is_empty() {
        return Ok(ServiceType::ALL.to_vec());
    }
    raw.iter()
        .map(|value| value.as_ref().parse().map_err(translate_domain_error))
        .collect()
}
