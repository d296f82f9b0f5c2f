//! Department catalog document.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Department document as stored in the `departments` collection.
///
/// The catalog is read-only here. `Employee.department` is free text and is
/// not foreign-keyed to this collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub floor: i32,
}
