//! API surface mapping named query/mutation operations onto the repository.
//!
//! Validation runs first, then the repository call. Classified errors
//! (`BAD_INPUT`, `NOT_FOUND`) keep their message; anything unexpected is
//! logged with full detail and collapsed into a generic per-operation
//! message, so store internals never cross the API boundary.

use chrono::{DateTime, Utc};
use mongodb::Database;
use serde::Serialize;
use tracing::error;

use crate::db::{department, employee};
use crate::error::{AppError, ErrorCode, Result};
use crate::models::{CreateEmployee, Department, Employee, EmployeeSummary, UpdateEmployee};
use crate::validate;

/// Error envelope returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub message: String,
    pub code: ErrorCode,
    /// Name of the originating operation.
    pub path: &'static str,
}

impl ApiError {
    /// Envelope for failures outside the query/mutation surface.
    pub fn internal(path: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: ErrorCode::Internal,
            path,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: [{}] {}", self.path, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type alias for the API surface
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Full employee record returned by detail reads and mutations.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeRecord {
    pub id: String,
    pub name: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeRecord {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.to_hex(),
            name: employee.name,
            position: employee.position,
            department: employee.department,
            salary: employee.salary,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

/// Reduced record returned by the default listing.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeListItem {
    pub id: String,
    pub name: String,
    pub position: String,
}

impl From<EmployeeSummary> for EmployeeListItem {
    fn from(summary: EmployeeSummary) -> Self {
        Self {
            id: summary.id.to_hex(),
            name: summary.name,
            position: summary.position,
        }
    }
}

/// Department catalog record.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentRecord {
    pub id: String,
    pub name: String,
    pub floor: i32,
}

impl From<Department> for DepartmentRecord {
    fn from(department: Department) -> Self {
        Self {
            id: department.id.to_hex(),
            name: department.name,
            floor: department.floor,
        }
    }
}

/// Stateless resolver surface over the shared store handle.
#[derive(Debug, Clone)]
pub struct EmployeeApi {
    db: Database,
}

impl EmployeeApi {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Liveness probe.
    pub fn hello(&self) -> &'static str {
        "Server is running"
    }

    /// `getAllEmployees` — reduced listing of every employee.
    pub async fn get_all_employees(&self) -> ApiResult<Vec<EmployeeListItem>> {
        employee::list_all(&self.db)
            .await
            .map(|list| list.into_iter().map(EmployeeListItem::from).collect())
            .map_err(|e| {
                classify(
                    "getAllEmployees",
                    "Failed to fetch employees. Please try again later.",
                    e,
                )
            })
    }

    /// `getEmployeeDetails` — one employee by identifier.
    pub async fn get_employee_details(&self, id: &str) -> ApiResult<EmployeeRecord> {
        self.fetch_details(id)
            .await
            .map_err(|e| classify("getEmployeeDetails", "Failed to fetch employee details", e))
    }

    async fn fetch_details(&self, id: &str) -> Result<EmployeeRecord> {
        let id = validate::parse_id(id)?;
        Ok(employee::get_by_id(&self.db, id).await?.into())
    }

    /// `getEmployeesByDepartment` — exact-match filter on the department field.
    pub async fn get_employees_by_department(&self, department: &str) -> ApiResult<Vec<EmployeeRecord>> {
        self.fetch_by_department(department).await.map_err(|e| {
            classify(
                "getEmployeesByDepartment",
                "Failed to fetch employees by department",
                e,
            )
        })
    }

    async fn fetch_by_department(&self, department: &str) -> Result<Vec<EmployeeRecord>> {
        let department = validate::required_text(department, "Department name is required")?;
        let matches = employee::list_by_department(&self.db, &department).await?;
        Ok(matches.into_iter().map(EmployeeRecord::from).collect())
    }

    /// `searchEmployeesByName` — case-insensitive substring match on names.
    pub async fn search_employees_by_name(&self, name: &str) -> ApiResult<Vec<EmployeeRecord>> {
        self.search(name)
            .await
            .map_err(|e| classify("searchEmployeesByName", "Failed to search employees", e))
    }

    async fn search(&self, name: &str) -> Result<Vec<EmployeeRecord>> {
        let term = validate::required_text(name, "Search term is required")?;
        let matches = employee::search_by_name(&self.db, &term).await?;
        Ok(matches.into_iter().map(EmployeeRecord::from).collect())
    }

    /// `addEmployee` — create an employee from a validated full field set.
    pub async fn add_employee(&self, data: CreateEmployee) -> ApiResult<EmployeeRecord> {
        self.create(data)
            .await
            .map_err(|e| classify("addEmployee", "Failed to add employee", e))
    }

    async fn create(&self, data: CreateEmployee) -> Result<EmployeeRecord> {
        let data = validate::new_employee(data)?;
        Ok(employee::insert(&self.db, data).await?.into())
    }

    /// `updateEmployee` — partial update; returns the post-update record.
    pub async fn update_employee(&self, id: &str, data: &UpdateEmployee) -> ApiResult<EmployeeRecord> {
        self.apply_update(id, data)
            .await
            .map_err(|e| classify("updateEmployee", "Failed to update employee", e))
    }

    async fn apply_update(&self, id: &str, data: &UpdateEmployee) -> Result<EmployeeRecord> {
        let id = validate::parse_id(id)?;
        Ok(employee::update(&self.db, id, data).await?.into())
    }

    /// `deleteEmployee` — hard delete; `true` on success.
    pub async fn delete_employee(&self, id: &str) -> ApiResult<bool> {
        self.remove(id)
            .await
            .map_err(|e| classify("deleteEmployee", "Failed to delete employee", e))
    }

    async fn remove(&self, id: &str) -> Result<bool> {
        let id = validate::parse_id(id)?;
        employee::delete(&self.db, id).await
    }

    /// `getAllDepartments` — read-only department catalog.
    pub async fn get_all_departments(&self) -> ApiResult<Vec<DepartmentRecord>> {
        department::list_all(&self.db)
            .await
            .map(|list| list.into_iter().map(DepartmentRecord::from).collect())
            .map_err(|e| classify("getAllDepartments", "Failed to fetch departments", e))
    }
}

/// Convert a crate error into the caller-facing envelope.
///
/// Unacknowledged-write messages are written for callers and pass through;
/// everything else unclassified is replaced by the operation's generic
/// message after logging the real cause.
fn classify(path: &'static str, fallback: &str, err: AppError) -> ApiError {
    let code = err.code();
    let message = match err {
        AppError::Validation(message) | AppError::NotFound(message) => message,
        AppError::Unacknowledged(message) => {
            error!(path, %message, "write not acknowledged");
            message
        }
        other => {
            error!(path, error = %other, "unexpected failure");
            fallback.to_string()
        }
    };
    ApiError { message, code, path }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;

    #[test]
    fn test_classify_keeps_validation_message() {
        let err = classify("addEmployee", "Failed to add employee", AppError::validation("Name is required"));
        assert_eq!(err.code, ErrorCode::BadInput);
        assert_eq!(err.message, "Name is required");
        assert_eq!(err.path, "addEmployee");
    }

    #[test]
    fn test_classify_keeps_not_found_message() {
        let err = classify(
            "deleteEmployee",
            "Failed to delete employee",
            AppError::not_found("Employee not found"),
        );
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Employee not found");
    }

    #[test]
    fn test_classify_collapses_internal_detail() {
        let err = classify(
            "getAllEmployees",
            "Failed to fetch employees. Please try again later.",
            AppError::config("uri missing"),
        );
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.message, "Failed to fetch employees. Please try again later.");
    }

    #[test]
    fn test_classify_passes_unacknowledged_message() {
        let err = classify(
            "updateEmployee",
            "Failed to update employee",
            AppError::unacknowledged("Failed to update employee"),
        );
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.message, "Failed to update employee");
    }

    #[test]
    fn test_record_conversion_uses_hex_id() {
        let id = ObjectId::new();
        let now = Utc::now();
        let record = EmployeeRecord::from(Employee {
            id,
            name: "Ankit Pathak".to_string(),
            position: "Full Stack Developer".to_string(),
            department: "Engineering".to_string(),
            salary: 75000.0,
            created_at: now,
            updated_at: now,
        });
        assert_eq!(record.id, id.to_hex());
        assert_eq!(record.salary, 75000.0);
    }

    #[test]
    fn test_error_envelope_serialization() {
        let err = ApiError {
            message: "Employee not found".to_string(),
            code: ErrorCode::NotFound,
            path: "getEmployeeDetails",
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["path"], "getEmployeeDetails");
        assert_eq!(json["message"], "Employee not found");
    }
}
