// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// A limit/offset window over a name-ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 5;
    pub const DEFAULT_OFFSET: i64 = 0;

    /// Parses raw `limit` and `offset` query values.
    ///
    /// Absent values take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPaging` if a value is not an integer or is negative.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Result<Self, DomainError> {
        Ok(Self {
            limit: parse_param("limit", limit, Self::DEFAULT_LIMIT)?,
            offset: parse_param("offset", offset, Self::DEFAULT_OFFSET)?,
        })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: Self::DEFAULT_OFFSET,
        }
    }
}

fn parse_param(param: &'static str, raw: Option<&str>, default: i64) -> Result<i64, DomainError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 0 => Ok(value),
        _ => Err(DomainError::InvalidPaging {
            param,
            value: raw.to_string(),
        }),
    }
}
