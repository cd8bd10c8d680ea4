//! Database module for SQLite persistence using SeaORM

pub mod entities;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;

/// Initialize database connection and create tables
pub async fn init_database(db_path: &Path) -> Result<DatabaseConnection, DbErr> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
    tracing::info!("Connecting to database: {}", db_url);

    let db = Database::connect(&db_url).await?;

    create_tables(&db).await?;

    Ok(db)
}

/// Connect to an in-memory database, for tests. The pool is pinned to a
/// single connection: every pooled connection would otherwise open its own
/// empty in-memory database.
pub async fn init_in_memory() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);
    let db = Database::connect(options).await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Create all tables if they don't exist
async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Claims table: one row per claim document. Nested sub-documents are
    // JSON columns; jurisdiction fields stay scalar so scope filters run
    // against indexed columns.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS claims (
            frapattaid TEXT PRIMARY KEY,
            claim_type TEXT NOT NULL,
            gram_panchayat TEXT NOT NULL,
            tehsil TEXT NOT NULL,
            district TEXT NOT NULL,
            gp_code TEXT NOT NULL,
            subdivision TEXT,
            applicant TEXT NOT NULL,
            eligibility TEXT NOT NULL,
            land TEXT NOT NULL,
            claim_basis TEXT NOT NULL,
            evidence TEXT NOT NULL,
            rights_requested TEXT NOT NULL,
            resolution TEXT NOT NULL,
            status TEXT NOT NULL,
            workflow TEXT NOT NULL,
            map_data TEXT,
            version INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )
        "#
        .to_string(),
    ))
    .await?;

    // Indexes for the jurisdiction filters and dashboard status queries
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"CREATE INDEX IF NOT EXISTS idx_claims_gp_code ON claims(gp_code)"#.to_string(),
    ))
    .await?;
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"CREATE INDEX IF NOT EXISTS idx_claims_subdivision ON claims(subdivision)"#.to_string(),
    ))
    .await?;
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"CREATE INDEX IF NOT EXISTS idx_claims_district ON claims(district)"#.to_string(),
    ))
    .await?;
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"CREATE INDEX IF NOT EXISTS idx_claims_status ON claims(status)"#.to_string(),
    ))
    .await?;

    Ok(())
}
