//! Store connection setup and startup diagnostics.

use std::time::Duration;

use bson::{Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use crate::config::DatabaseConfig;
use crate::error::Result;

/// Open the single database handle shared for the life of the process.
///
/// Fails fast when the store is unreachable within the configured
/// server-selection timeout; there is no reconnect after that.
pub async fn connect(config: &DatabaseConfig) -> Result<Database> {
    let mut options = ClientOptions::parse(config.resolved_uri()).await?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.server_selection_timeout = Some(Duration::from_secs(config.server_selection_timeout_secs));
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));

    let client = Client::with_options(options)?;
    let db = client.database(&config.name);

    test_connection(&db).await?;
    Ok(db)
}

/// Test the connection by executing a ping command.
pub async fn test_connection(db: &Database) -> Result<()> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}

/// Get record counts for all collections.
pub async fn get_collection_counts(db: &Database) -> Result<CollectionCounts> {
    let employees = db
        .collection::<Document>(super::employee::COLLECTION)
        .count_documents(doc! {})
        .await?;
    let departments = db
        .collection::<Document>(super::department::COLLECTION)
        .count_documents(doc! {})
        .await?;

    Ok(CollectionCounts {
        employees,
        departments,
    })
}

/// Collection record counts.
#[derive(Debug, Clone)]
pub struct CollectionCounts {
    pub employees: u64,
    pub departments: u64,
}
