//! Reference data seeding for the employee and department collections.

use bson::{Document, doc};
use mongodb::Database;
use tracing::info;

use crate::db::{department, employee};
use crate::error::Result;
use crate::models::CreateEmployee;

const DEPARTMENTS: [(&str, i32); 4] = [
    ("Engineering", 3),
    ("Design", 2),
    ("Product", 2),
    ("Marketing", 1),
];

const EMPLOYEES: [(&str, &str, &str, f64); 8] = [
    ("Ankit Pathak", "Full Stack Developer", "Engineering", 75000.0),
    ("Priya Sharma", "UI/UX Designer", "Design", 65000.0),
    ("Rahul Kumar", "Backend Developer", "Engineering", 70000.0),
    ("Sneha Gupta", "Product Manager", "Product", 90000.0),
    ("Amit Singh", "DevOps Engineer", "Engineering", 80000.0),
    ("Neha Verma", "Frontend Developer", "Engineering", 68000.0),
    ("Vikram Yadav", "Marketing Manager", "Marketing", 72000.0),
    ("Pooja Reddy", "Graphic Designer", "Design", 60000.0),
];

/// Outcome of a seeding run.
#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub departments: usize,
    pub employees: usize,
}

/// Replace both collections with the reference data set.
///
/// Destructive: clears existing data first.
pub async fn run(db: &Database) -> Result<SeedSummary> {
    let departments = db.collection::<Document>(department::COLLECTION);

    db.collection::<Document>(employee::COLLECTION)
        .delete_many(doc! {})
        .await?;
    departments.delete_many(doc! {}).await?;

    let catalog: Vec<Document> = DEPARTMENTS
        .iter()
        .map(|(name, floor)| doc! { "name": *name, "floor": *floor })
        .collect();
    departments.insert_many(&catalog).await?;

    for (name, position, dept, salary) in EMPLOYEES {
        employee::insert(
            db,
            CreateEmployee {
                name: name.to_string(),
                position: position.to_string(),
                department: dept.to_string(),
                salary,
            },
        )
        .await?;
    }

    let summary = SeedSummary {
        departments: DEPARTMENTS.len(),
        employees: EMPLOYEES.len(),
    };
    info!(
        departments = summary.departments,
        employees = summary.employees,
        "seed complete"
    );
    Ok(summary)
}
