use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::page::Page;

pub type EmployeeId = i64;

/// Closed set of departments an employee can belong to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    It,
    Hr,
    Finance,
    Sales,
    Marketing,
    Operations,
    Legal,
}

impl Department {
    pub const ALL: [Department; 7] = [
        Department::It,
        Department::Hr,
        Department::Finance,
        Department::Sales,
        Department::Marketing,
        Department::Operations,
        Department::Legal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Department::It => "IT",
            Department::Hr => "HR",
            Department::Finance => "FINANCE",
            Department::Sales => "SALES",
            Department::Marketing => "MARKETING",
            Department::Operations => "OPERATIONS",
            Department::Legal => "LEGAL",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown department `{0}`, expected one of {expected}",
    expected = Department::ALL.map(Department::as_str).join(", ")
)]
pub struct UnknownDepartment(pub String);

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Department::ALL
            .into_iter()
            .find(|department| department.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownDepartment(value.to_string()))
    }
}

/// A persisted employee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub national_id: String,
    pub department: Department,
    pub enabled: bool,
}

/// Employee fields written to a store. `id == None` inserts a new row,
/// `Some(id)` overwrites the row with that id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub id: Option<EmployeeId>,
    pub name: String,
    pub national_id: String,
    pub department: Department,
    pub enabled: bool,
}

impl EmployeeRecord {
    pub fn with_id(mut self, id: EmployeeId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Create / full-update request body as received over the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub national_id: String,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub enabled: bool,
}

/// An [`EmployeeRequest`] that passed [`EmployeeRequest::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeInput {
    pub name: String,
    pub national_id: String,
    pub department: Department,
    pub enabled: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeStatusRequest {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: EmployeeId,
    pub name: String,
    pub national_id: String,
    pub department: Department,
    pub enabled: bool,
}

/// Filtered listing: one page plus active/inactive totals over every match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeQueryResult {
    pub total_active: u64,
    pub total_inactive: u64,
    pub employees: Page<EmployeeResponse>,
}
