//! Department catalog repository (read-only).

use bson::doc;
use futures::TryStreamExt;
use mongodb::Database;

use crate::error::Result;
use crate::models::Department;

pub const COLLECTION: &str = "departments";

/// List all departments ordered by floor and name.
pub async fn list_all(db: &Database) -> Result<Vec<Department>> {
    let cursor = db
        .collection::<Department>(COLLECTION)
        .find(doc! {})
        .sort(doc! { "floor": 1, "name": 1 })
        .await?;
    Ok(cursor.try_collect().await?)
}
