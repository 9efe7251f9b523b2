//! Shared fixtures for the integration tests.
//!
//! Each test file is compiled as its own crate, so helpers used by only
//! some of them would otherwise warn as dead code.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use checkout_address::adapters::database::bootstrap_schema;
use checkout_address::adapters::StaticStoreResolver;
use checkout_address::config::toml_config::default_tokens;
use checkout_address::core::{AddressLookup, LookupOutcome};
use checkout_address::{
    create_router, AddressRecord, AppState, CheckoutError, CheckoutService, City,
    DetailedAddress, LookupKey, LookupKind, LookupStrategySelector, SimpleAddress, State,
};
use http_body_util::BodyExt;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub const SALVADOR_ZIPCODE: &str = "40010000";

pub const SALVADOR_SIMPLE_JSON: &str =
    r#"{"address":"Avenida da França","neighborhood":"Comércio","city":"Salvador","state":"BA"}"#;

pub const SALVADOR_DETAILED_JSON: &str = concat!(
    r#"{"altitude":7.0,"postalCode":"40010000","latitude":"-12.967192","longitude":"-38.5101976","#,
    r#""address":"Avenida da França","neighborhood":"Comércio","#,
    r#""city":{"areaCode":71,"regionCode":"2927408","name":"Salvador"},"state":{"acronym":"BA"}}"#
);

pub const NOT_FOUND_JSON: &str = r#"{"error":"The requested zipcode was not found."}"#;

pub fn salvador_simple() -> SimpleAddress {
    SimpleAddress {
        address: "Avenida da França".to_string(),
        neighborhood: "Comércio".to_string(),
        city: "Salvador".to_string(),
        state: "BA".to_string(),
    }
}

pub fn salvador_detailed() -> DetailedAddress {
    DetailedAddress {
        altitude: 7.0,
        postal_code: SALVADOR_ZIPCODE.to_string(),
        latitude: "-12.967192".to_string(),
        longitude: "-38.5101976".to_string(),
        address: "Avenida da França".to_string(),
        neighborhood: "Comércio".to_string(),
        city: City {
            area_code: 71,
            region_code: "2927408".to_string(),
            name: "Salvador".to_string(),
        },
        state: State {
            acronym: "BA".to_string(),
        },
    }
}

// =============================================================================
// In-memory lookups
// =============================================================================

/// Lookup backed by a map, optionally failing every call like a lost connection.
pub struct FakeLookup {
    kind: LookupKind,
    records: HashMap<String, AddressRecord>,
    failing: bool,
    calls: AtomicUsize,
}

impl FakeLookup {
    pub fn new(kind: LookupKind) -> Self {
        Self {
            kind,
            records: HashMap::new(),
            failing: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_record(mut self, zipcode: &str, record: impl Into<AddressRecord>) -> Self {
        self.records.insert(zipcode.to_string(), record.into());
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressLookup for FakeLookup {
    fn kind(&self) -> LookupKind {
        self.kind
    }

    async fn fetch(&self, key: &LookupKey) -> LookupOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return LookupOutcome::Failed(CheckoutError::Database(sqlx::Error::PoolTimedOut));
        }
        match self.records.get(key.as_str()) {
            Some(record) => LookupOutcome::Found(record.clone()),
            None => LookupOutcome::Absent,
        }
    }
}

pub fn router_with(standard: Arc<FakeLookup>, beta: Arc<FakeLookup>) -> Router {
    let selector = LookupStrategySelector::new(standard, beta).unwrap();
    let resolver = Arc::new(StaticStoreResolver::from_entries(&default_tokens()));
    create_router(AppState::new(CheckoutService::new(resolver, selector)))
}

/// Router whose standard and beta lookups both know the Salvador zipcode.
pub fn salvador_router() -> Router {
    router_with(
        Arc::new(FakeLookup::new(LookupKind::Standard).with_record(SALVADOR_ZIPCODE, salvador_simple())),
        Arc::new(FakeLookup::new(LookupKind::Beta).with_record(SALVADOR_ZIPCODE, salvador_detailed())),
    )
}

// =============================================================================
// HTTP helpers
// =============================================================================

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn get_address(router: Router, zipcode: &str, token: Option<&str>) -> TestResponse {
    let mut request = Request::builder().uri(format!("/address/{zipcode}"));
    if let Some(token) = token {
        request = request.header("Authentication-Bearer", token);
    }

    let response = router
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

// =============================================================================
// SQLite fixtures
// =============================================================================

/// Fresh in-memory database with the lookup schema in place.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    bootstrap_schema(&pool).await.unwrap();
    pool
}

pub async fn insert_simple(pool: &SqlitePool, zipcode: &str, address: &SimpleAddress) {
    sqlx::query(
        "INSERT INTO addresses (zipcode, address, neighborhood, city, state) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(zipcode)
    .bind(&address.address)
    .bind(&address.neighborhood)
    .bind(&address.city)
    .bind(&address.state)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_detailed(pool: &SqlitePool, address: &DetailedAddress) {
    sqlx::query(
        r#"
        INSERT INTO address_geolocations (
            zipcode, altitude, latitude, longitude, address, neighborhood,
            city_area_code, city_region_code, city_name, state_acronym
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&address.postal_code)
    .bind(address.altitude)
    .bind(&address.latitude)
    .bind(&address.longitude)
    .bind(&address.address)
    .bind(&address.neighborhood)
    .bind(address.city.area_code)
    .bind(&address.city.region_code)
    .bind(&address.city.name)
    .bind(&address.state.acronym)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn seeded_pool() -> SqlitePool {
    let pool = memory_pool().await;
    insert_simple(&pool, SALVADOR_ZIPCODE, &salvador_simple()).await;
    insert_detailed(&pool, &salvador_detailed()).await;
    pool
}
