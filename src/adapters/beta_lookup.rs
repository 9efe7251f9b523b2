use crate::adapters::database::first_row;
use crate::domain::model::{AddressRecord, City, DetailedAddress, LookupKey, LookupKind, State};
use crate::domain::ports::{AddressLookup, LookupOutcome};
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

const SELECT_BY_ZIPCODE: &str = r#"
    SELECT zipcode, altitude, latitude, longitude, address, neighborhood,
           city_area_code, city_region_code, city_name, state_acronym
    FROM address_geolocations
    WHERE zipcode = ?
    LIMIT 2
"#;

/// Looks addresses up in `address_geolocations` and returns the nested,
/// geolocated shape.
#[derive(Clone)]
pub struct BetaAddressLookup {
    pool: SqlitePool,
}

impl BetaAddressLookup {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn detailed_from_row(row: &SqliteRow) -> Result<DetailedAddress, sqlx::Error> {
    Ok(DetailedAddress {
        altitude: row.try_get("altitude")?,
        postal_code: row.try_get("zipcode")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        address: row.try_get("address")?,
        neighborhood: row.try_get("neighborhood")?,
        city: City {
            area_code: row.try_get("city_area_code")?,
            region_code: row.try_get("city_region_code")?,
            name: row.try_get("city_name")?,
        },
        state: State {
            acronym: row.try_get("state_acronym")?,
        },
    })
}

#[async_trait]
impl AddressLookup for BetaAddressLookup {
    fn kind(&self) -> LookupKind {
        LookupKind::Beta
    }

    async fn fetch(&self, key: &LookupKey) -> LookupOutcome {
        tracing::debug!("Getting geolocated address for the zipcode [{}] from database", key);

        let rows = match sqlx::query(SELECT_BY_ZIPCODE)
            .bind(key.as_str())
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => rows,
            Err(error) => return LookupOutcome::Failed(error.into()),
        };

        match first_row(key, "address_geolocations", rows) {
            Some(row) => match detailed_from_row(&row) {
                Ok(address) => LookupOutcome::Found(AddressRecord::Detailed(address)),
                Err(error) => LookupOutcome::Failed(error.into()),
            },
            None => LookupOutcome::Absent,
        }
    }
}
