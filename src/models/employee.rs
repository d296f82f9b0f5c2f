//! Employee document and DTOs for create and update operations.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employee document as stored in the `employees` collection.
///
/// `id` is store-assigned and immutable; timestamps are set by the
/// repository only, never by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    #[serde(
        rename = "createdAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub created_at: DateTime<Utc>,
    #[serde(
        rename = "updatedAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub updated_at: DateTime<Utc>,
}

/// Reduced projection used by the default listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub position: String,
}

/// DTO for creating an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployee {
    pub name: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
}

/// DTO for partially updating an employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub salary: Option<f64>,
}
