//! Pure input checks applied before any repository call.

use bson::oid::ObjectId;
use bson::{Bson, Document};
use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{CreateEmployee, UpdateEmployee};

/// Trim a required text field, rejecting input that is empty or whitespace.
pub fn required_text(value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(trimmed.to_string())
}

/// Parse a caller-supplied identifier into a store object id.
///
/// A malformed identifier is a caller error, not a missing record.
pub fn parse_id(id: &str) -> Result<ObjectId> {
    if id.trim().is_empty() {
        return Err(AppError::validation("Employee ID is required"));
    }
    ObjectId::parse_str(id).map_err(|_| AppError::validation("Invalid employee ID format"))
}

/// Validate a salary value: finite and non-negative.
pub fn salary(value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation("Valid salary is required"));
    }
    Ok(value)
}

/// Normalize and validate the full field set for employee creation.
pub fn new_employee(data: CreateEmployee) -> Result<CreateEmployee> {
    Ok(CreateEmployee {
        name: required_text(&data.name, "Name is required")?,
        position: required_text(&data.position, "Position is required")?,
        department: required_text(&data.department, "Department is required")?,
        salary: salary(data.salary)?,
    })
}

/// Accumulator for the `$set` document of a partial update.
///
/// A field enters the set only when the caller supplied it and it passes
/// the same checks as creation: text non-empty after trimming, salary
/// finite and non-negative. Everything else is left untouched.
#[derive(Debug, Default)]
pub struct UpdateSet {
    fields: Document,
}

impl UpdateSet {
    /// Collect the effective fields from an update DTO.
    pub fn from_update(data: &UpdateEmployee) -> Self {
        let mut set = Self::default();
        set.push_text("name", data.name.as_deref());
        set.push_text("position", data.position.as_deref());
        set.push_text("department", data.department.as_deref());
        set.push_salary(data.salary);
        set
    }

    fn push_text(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                self.fields.insert(key, trimmed);
            }
        }
    }

    fn push_salary(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            if value.is_finite() && value >= 0.0 {
                self.fields.insert("salary", value);
            }
        }
    }

    /// True when no semantic field survived filtering.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Finish the set, stamping `updatedAt`.
    ///
    /// An update that would only refresh the timestamp is rejected.
    pub fn into_document(mut self, updated_at: DateTime<Utc>) -> Result<Document> {
        if self.fields.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        self.fields.insert(
            "updatedAt",
            Bson::DateTime(bson::DateTime::from_chrono(updated_at)),
        );
        Ok(self.fields)
    }
}
