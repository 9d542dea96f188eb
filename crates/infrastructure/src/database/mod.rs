use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use dnsbench_domain::config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous};

fn base_options(database_url: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    SqliteConnectOptions::from_str(database_url).map(|opts| {
        opts.create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
    })
}

async fn apply_per_connection_pragmas(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("PRAGMA cache_size = -32768").execute(&mut *conn).await?;
    sqlx::query("PRAGMA temp_store = MEMORY").execute(&mut *conn).await?;
    Ok(())
}

/// One pool serves both the Result Store writer (one transaction per completed
/// run, §4.6) and the read-side queries behind the results API — the teacher's
/// read/write pool split exists to absorb a continuous query-log write stream
/// that this system does not have.
pub async fn create_pool(database_url: &str, cfg: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = base_options(database_url)?.busy_timeout(Duration::from_secs(cfg.busy_timeout_secs));

    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.pool_max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(cfg.busy_timeout_secs))
        .after_connect(|conn, _| Box::pin(async move { apply_per_connection_pragmas(conn).await }))
        .connect_with(options)
        .await?;

    let migrator = Migrator::new(Path::new("./migrations")).await?;
    migrator.run(&pool).await?;

    sqlx::query("PRAGMA optimize").execute(&pool).await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_pool_applies_migrations_on_tmp_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.sqlite3");
        let url = format!("sqlite://{}", db_path.display());
        let cfg = DatabaseConfig::default();

        let pool = create_pool(&url, &cfg).await.expect("pool should be created");
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM runs").fetch_one(&pool).await.expect("runs table should exist");
        assert_eq!(row.0, 0);
    }
}
