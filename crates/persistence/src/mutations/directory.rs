// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Directory seeding: employees, organizations and memberships.

use diesel::SqliteConnection;
use diesel::prelude::*;
use procura_domain::{EmployeeId, OrganizationId, OrganizationType};
use tracing::info;

use crate::diesel_schema::{employee, organization, organization_responsible};
use crate::error::PersistenceError;

/// Creates an employee.
///
/// # Errors
///
/// Returns an error if the username is already taken.
pub fn create_employee(
    conn: &mut SqliteConnection,
    username: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<EmployeeId, PersistenceError> {
    let id: EmployeeId = EmployeeId::generate();

    diesel::insert_into(employee::table)
        .values((
            employee::id.eq(id.to_string()),
            employee::username.eq(username),
            employee::first_name.eq(first_name),
            employee::last_name.eq(last_name),
        ))
        .execute(conn)?;

    info!(employee_id = %id, username, "Created employee");
    Ok(id)
}

/// Creates an organization.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_organization(
    conn: &mut SqliteConnection,
    name: &str,
    description: Option<&str>,
    organization_type: OrganizationType,
) -> Result<OrganizationId, PersistenceError> {
    let id: OrganizationId = OrganizationId::generate();

    diesel::insert_into(organization::table)
        .values((
            organization::id.eq(id.to_string()),
            organization::name.eq(name),
            organization::description.eq(description),
            organization::organization_type.eq(organization_type.as_str()),
        ))
        .execute(conn)?;

    info!(organization_id = %id, name, "Created organization");
    Ok(id)
}

/// Makes an employee a responsible member of an organization.
///
/// # Returns
///
/// The id of the membership row. Lower ids win when an employee belongs
/// to several organizations.
///
/// # Errors
///
/// Returns an error if either side does not exist or the membership
/// already exists.
pub fn add_responsible(
    conn: &mut SqliteConnection,
    organization_id: OrganizationId,
    employee_id: EmployeeId,
) -> Result<i64, PersistenceError> {
    let membership_id: i64 = diesel::insert_into(organization_responsible::table)
        .values((
            organization_responsible::organization_id.eq(organization_id.to_string()),
            organization_responsible::user_id.eq(employee_id.to_string()),
        ))
        .returning(organization_responsible::id)
        .get_result(conn)?;

    info!(
        %organization_id,
        %employee_id,
        membership_id,
        "Added organization responsible"
    );
    Ok(membership_id)
}
