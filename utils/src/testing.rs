use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::migrate;

/// Connects to `db_url` and brings the schema up to date.
///
/// In-memory SQLite databases live and die with their connection, so the pool
/// is pinned to a single connection.
pub async fn setup_test_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let conn = Database::connect(opt).await?;
    migrate(&conn).await?;
    Ok(conn)
}
