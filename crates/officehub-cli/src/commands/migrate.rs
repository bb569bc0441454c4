//! Database migration command.

use officehub_core::config::AppConfig;
use officehub_core::error::AppError;
use officehub_database::DatabasePool;

use crate::output;

/// Apply all pending migrations
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    println!("Running database migrations...");
    let db = DatabasePool::connect(&config.database).await?;
    db.migrate().await?;
    db.close().await;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
