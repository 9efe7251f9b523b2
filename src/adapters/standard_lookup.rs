use crate::adapters::database::first_row;
use crate::domain::model::{AddressRecord, LookupKey, LookupKind, SimpleAddress};
use crate::domain::ports::{AddressLookup, LookupOutcome};
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

const SELECT_BY_ZIPCODE: &str = r#"
    SELECT address, neighborhood, city, state
    FROM addresses
    WHERE zipcode = ?
    LIMIT 2
"#;

/// Looks addresses up in the flat `addresses` table.
#[derive(Clone)]
pub struct StandardAddressLookup {
    pool: SqlitePool,
}

impl StandardAddressLookup {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn simple_from_row(row: &SqliteRow) -> Result<SimpleAddress, sqlx::Error> {
    Ok(SimpleAddress {
        address: row.try_get("address")?,
        neighborhood: row.try_get("neighborhood")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
    })
}

#[async_trait]
impl AddressLookup for StandardAddressLookup {
    fn kind(&self) -> LookupKind {
        LookupKind::Standard
    }

    async fn fetch(&self, key: &LookupKey) -> LookupOutcome {
        tracing::debug!("Getting address for the zipcode [{}] from database", key);

        let rows = match sqlx::query(SELECT_BY_ZIPCODE)
            .bind(key.as_str())
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => rows,
            Err(error) => return LookupOutcome::Failed(error.into()),
        };

        match first_row(key, "addresses", rows) {
            Some(row) => match simple_from_row(&row) {
                Ok(address) => LookupOutcome::Found(AddressRecord::Simple(address)),
                Err(error) => LookupOutcome::Failed(error.into()),
            },
            None => LookupOutcome::Absent,
        }
    }
}
