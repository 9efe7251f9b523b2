use crate::config::toml_config::TokenEntry;
use crate::domain::model::StoreContext;
use crate::domain::ports::StoreResolver;
use crate::utils::error::{CheckoutError, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::collections::HashMap;

/// Resolves stores from a fixed token table loaded at start-up.
#[derive(Debug, Clone)]
pub struct StaticStoreResolver {
    tokens: HashMap<String, StoreContext>,
}

impl StaticStoreResolver {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, StoreContext)>,
    {
        Self {
            tokens: entries.into_iter().collect(),
        }
    }

    pub fn from_entries(entries: &[TokenEntry]) -> Self {
        Self::new(entries.iter().map(|entry| {
            let context = if entry.beta {
                StoreContext::beta()
            } else {
                StoreContext::standard()
            };
            (entry.token.clone(), context)
        }))
    }
}

#[async_trait]
impl StoreResolver for StaticStoreResolver {
    async fn resolve(&self, token: &str) -> Result<StoreContext> {
        match self.tokens.get(token) {
            Some(context) => Ok(*context),
            None => {
                let error = CheckoutError::invalid_credential(token);
                tracing::debug!("{}", error);
                Err(error)
            }
        }
    }
}

/// Resolves stores from the `stores` table.
#[derive(Clone)]
pub struct DatabaseStoreResolver {
    pool: SqlitePool,
}

impl DatabaseStoreResolver {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreResolver for DatabaseStoreResolver {
    async fn resolve(&self, token: &str) -> Result<StoreContext> {
        // an empty token can never identify a store
        if token.is_empty() {
            return Err(CheckoutError::invalid_credential(token));
        }

        let result = sqlx::query("SELECT beta_testing FROM stores WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await;

        match result {
            Ok(Some(row)) => match row.try_get::<bool, _>("beta_testing") {
                Ok(beta_enabled) => Ok(StoreContext { beta_enabled }),
                Err(error) => {
                    tracing::error!("Malformed store row for token: {}", error);
                    Err(CheckoutError::invalid_credential(token))
                }
            },
            Ok(None) => {
                let error = CheckoutError::invalid_credential(token);
                tracing::debug!("{}", error);
                Err(error)
            }
            Err(error) => {
                tracing::error!("Failed to resolve store by token: {}", error);
                Err(CheckoutError::invalid_credential(token))
            }
        }
    }
}
