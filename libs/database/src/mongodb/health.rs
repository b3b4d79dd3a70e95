use mongodb::{Database, bson::doc};

use crate::common::{DatabaseError, DatabaseResult};

/// Ping the database, mapping a failure into [`DatabaseError::HealthCheckFailed`]
pub async fn ping(db: &Database) -> DatabaseResult<()> {
    db.run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}
