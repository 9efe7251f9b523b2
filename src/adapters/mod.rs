// Adapters layer: concrete implementations of the domain ports (database lookups, store resolution).

pub mod beta_lookup;
pub mod database;
pub mod standard_lookup;
pub mod store_resolver;

pub use beta_lookup::BetaAddressLookup;
pub use standard_lookup::StandardAddressLookup;
pub use store_resolver::{DatabaseStoreResolver, StaticStoreResolver};

use crate::config::toml_config::{ResolverKind, StoreConfig};
use crate::core::selector::LookupStrategySelector;
use crate::domain::ports::StoreResolver;
use crate::utils::error::Result;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

/// Both lookup strategies backed by the same pool.
pub fn sqlite_selector(pool: &SqlitePool) -> Result<LookupStrategySelector> {
    LookupStrategySelector::new(
        Arc::new(StandardAddressLookup::new(pool.clone())),
        Arc::new(BetaAddressLookup::new(pool.clone())),
    )
}

pub fn store_resolver(config: &StoreConfig, pool: &SqlitePool) -> Arc<dyn StoreResolver> {
    match config.resolver {
        ResolverKind::Static => {
            tracing::info!(tokens = config.tokens.len(), "Using static store token table");
            Arc::new(StaticStoreResolver::from_entries(&config.tokens))
        }
        ResolverKind::Database => {
            tracing::info!("Resolving stores from the stores table");
            Arc::new(DatabaseStoreResolver::new(pool.clone()))
        }
    }
}
