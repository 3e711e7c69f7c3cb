// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee and organization membership lookups.

use diesel::SqliteConnection;
use diesel::prelude::*;
use procura_domain::{EmployeeId, OrganizationId};
use tracing::debug;

use crate::diesel_schema::{employee, organization_responsible};
use crate::error::PersistenceError;

/// Looks up an employee id by username.
///
/// # Errors
///
/// Returns an error if the query fails or the stored id is corrupt.
/// Returns `Ok(None)` if no employee has this username.
pub fn employee_id_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<EmployeeId>, PersistenceError> {
    debug!(username, "Looking up employee by username");

    let id: Option<String> = employee::table
        .filter(employee::username.eq(username))
        .select(employee::id)
        .first::<String>(conn)
        .optional()?;

    Ok(id.map(|value| value.parse::<EmployeeId>()).transpose()?)
}

/// Looks up the organization an employee is responsible for.
///
/// When the employee is responsible for several organizations, the
/// earliest membership wins.
///
/// # Errors
///
/// Returns an error if the query fails or the stored id is corrupt.
/// Returns `Ok(None)` if the employee belongs to no organization.
pub fn organization_id_for_employee(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<Option<OrganizationId>, PersistenceError> {
    let id: Option<String> = organization_responsible::table
        .filter(organization_responsible::user_id.eq(employee_id.to_string()))
        .order(organization_responsible::id.asc())
        .select(organization_responsible::organization_id)
        .first::<String>(conn)
        .optional()?;

    Ok(id.map(|value| value.parse::<OrganizationId>()).transpose()?)
}

/// Checks whether an employee with this id exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn employee_exists(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        employee::table.filter(employee::id.eq(employee_id.to_string())),
    ))
    .get_result::<bool>(conn)?)
}
