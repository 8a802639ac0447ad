//! Row structs for the `companies` and `jobs` tables, plus the request shapes
//! the company repository accepts.
//!
//! Storage columns are snake_case; queries alias them to the camelCase names
//! these types (de)serialize with, so a [`Row`](crate::Row) decodes directly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::SqlValue;

// ---------------------------------------------------------------------------
// companies
// ---------------------------------------------------------------------------

/// A company row.  Also the payload for creating one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Unique key; immutable once created.
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// A company together with every job that references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyWithJobs {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<JobSummary>,
}

/// Optional filters for listing companies.  `None` means "not filtered";
/// zero is a real bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFilter {
    /// Case-insensitive substring of the company name.
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.min_employees.is_none() && self.max_employees.is_none()
    }
}

/// Sparse update of a company.  Fields left as `None` are not touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl CompanyUpdate {
    /// The supplied fields, keyed by their camelCase names, in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, SqlValue)> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("name", SqlValue::from(name.as_str())));
        }
        if let Some(description) = &self.description {
            fields.push(("description", SqlValue::from(description.as_str())));
        }
        if let Some(num_employees) = self.num_employees {
            fields.push(("numEmployees", SqlValue::from(num_employees)));
        }
        if let Some(logo_url) = &self.logo_url {
            fields.push(("logoUrl", SqlValue::from(logo_url.as_str())));
        }
        fields
    }
}

// ---------------------------------------------------------------------------
// jobs
// ---------------------------------------------------------------------------

/// A job as nested under its company; `company_handle` is not projected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// Fraction of ownership, exact as stored in the `NUMERIC` column.
    pub equity: Option<Decimal>,
}
