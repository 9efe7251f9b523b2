use crate::config::toml_config::DatabaseConfig;
use crate::domain::model::LookupKey;
use crate::utils::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS addresses (
        zipcode      TEXT PRIMARY KEY NOT NULL,
        address      TEXT NOT NULL,
        neighborhood TEXT NOT NULL,
        city         TEXT NOT NULL,
        state        TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS address_geolocations (
        zipcode          TEXT PRIMARY KEY NOT NULL,
        altitude         REAL NOT NULL,
        latitude         TEXT NOT NULL,
        longitude        TEXT NOT NULL,
        address          TEXT NOT NULL,
        neighborhood     TEXT NOT NULL,
        city_area_code   INTEGER NOT NULL,
        city_region_code TEXT NOT NULL,
        city_name        TEXT NOT NULL,
        state_acronym    TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS stores (
        token        TEXT PRIMARY KEY NOT NULL,
        beta_testing INTEGER NOT NULL DEFAULT 0
    )
    "#,
];

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Opens the address database.
///
/// In-memory databases live only as long as their connection, so they get
/// exactly one connection that is never recycled.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    let pool_options = if is_in_memory(&config.url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::info!(url = %config.url, "Connected to address database");
    Ok(pool)
}

/// Creates the lookup tables if they are missing. Existing data is left alone.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(*statement).execute(pool).await?;
    }
    tracing::debug!("Address schema is in place");
    Ok(())
}

/// Keeps the first of the rows fetched for `key`.
///
/// Zipcodes are unique in the bootstrapped schema; a foreign schema that
/// breaks that gets a warning, not an error.
pub(crate) fn first_row<T>(key: &LookupKey, table: &str, rows: Vec<T>) -> Option<T> {
    if rows.len() > 1 {
        tracing::warn!(
            zipcode = %key,
            table,
            "Zipcode matches more than one row, using the first"
        );
    }
    rows.into_iter().next()
}
