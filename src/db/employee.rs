//! Employee repository with query and mutation operations.

use bson::doc;
use bson::oid::ObjectId;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use crate::error::{AppError, Result};
use crate::models::{CreateEmployee, Employee, EmployeeSummary, UpdateEmployee};
use crate::validate::UpdateSet;

pub const COLLECTION: &str = "employees";

fn employees(db: &Database) -> Collection<Employee> {
    db.collection(COLLECTION)
}

/// List all employees, projected to the reduced listing fields.
pub async fn list_all(db: &Database) -> Result<Vec<EmployeeSummary>> {
    let cursor = db
        .collection::<EmployeeSummary>(COLLECTION)
        .find(doc! {})
        .projection(doc! { "_id": 1, "name": 1, "position": 1 })
        .await?;
    Ok(cursor.try_collect().await?)
}

/// Get employee by ID.
pub async fn get_by_id(db: &Database, id: ObjectId) -> Result<Employee> {
    employees(db)
        .find_one(doc! { "_id": id })
        .await?
        .ok_or_else(|| AppError::not_found("Employee not found"))
}

/// List employees with an exact department match.
pub async fn list_by_department(db: &Database, department: &str) -> Result<Vec<Employee>> {
    let cursor = employees(db).find(doc! { "department": department }).await?;
    Ok(cursor.try_collect().await?)
}

/// Search employees by case-insensitive name pattern.
pub async fn search_by_name(db: &Database, term: &str) -> Result<Vec<Employee>> {
    let cursor = employees(db)
        .find(doc! { "name": { "$regex": term, "$options": "i" } })
        .await?;
    Ok(cursor.try_collect().await?)
}

/// Insert a new employee, assigning id and timestamps.
pub async fn insert(db: &Database, data: CreateEmployee) -> Result<Employee> {
    let now = Utc::now();
    let employee = Employee {
        id: ObjectId::new(),
        name: data.name,
        position: data.position,
        department: data.department,
        salary: data.salary,
        created_at: now,
        updated_at: now,
    };

    let result = employees(db).insert_one(&employee).await?;
    if result.inserted_id.as_object_id().is_none() {
        return Err(AppError::unacknowledged("Failed to create employee"));
    }
    Ok(employee)
}

/// Apply a partial update and return the post-update document.
///
/// Existence is checked first so a missing record reports `NotFound`
/// instead of a write failure. The check and the write are separate store
/// operations; a concurrent delete in between surfaces as unacknowledged.
pub async fn update(db: &Database, id: ObjectId, data: &UpdateEmployee) -> Result<Employee> {
    let collection = employees(db);

    if collection.find_one(doc! { "_id": id }).await?.is_none() {
        return Err(AppError::not_found("Employee not found"));
    }

    let set = UpdateSet::from_update(data).into_document(Utc::now())?;

    collection
        .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await?
        .ok_or_else(|| AppError::unacknowledged("Failed to update employee"))
}

/// Hard-delete an employee by ID.
///
/// Same existence-check-then-act sequence as `update`, same caveat.
pub async fn delete(db: &Database, id: ObjectId) -> Result<bool> {
    let collection = employees(db);

    if collection.find_one(doc! { "_id": id }).await?.is_none() {
        return Err(AppError::not_found("Employee not found"));
    }

    let result = collection.delete_one(doc! { "_id": id }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::unacknowledged("Failed to delete employee"));
    }
    Ok(true)
}
