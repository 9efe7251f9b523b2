use crate::domain::model::{AddressRecord, LookupKey, LookupKind, StoreContext};
use crate::utils::error::{CheckoutError, Result};
use async_trait::async_trait;

/// Internal result of a single address query.
///
/// Callers outside the lookup boundary only ever see the collapsed
/// `Option` returned by [`AddressLookup::lookup`].
#[derive(Debug)]
pub enum LookupOutcome {
    Found(AddressRecord),
    Absent,
    Failed(CheckoutError),
}

#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// The strategy this implementation stands for. Must agree with the
    /// shape of every record it returns.
    fn kind(&self) -> LookupKind;

    async fn fetch(&self, key: &LookupKey) -> LookupOutcome;

    /// Storage failures are logged here and reported as absent.
    async fn lookup(&self, key: &LookupKey) -> Option<AddressRecord> {
        match self.fetch(key).await {
            LookupOutcome::Found(record) => {
                tracing::debug!(zipcode = %key, strategy = self.kind().as_str(), "Address found");
                Some(record)
            }
            LookupOutcome::Absent => {
                tracing::debug!(zipcode = %key, strategy = self.kind().as_str(), "No address for zipcode");
                None
            }
            LookupOutcome::Failed(error) => {
                tracing::error!(
                    zipcode = %key,
                    strategy = self.kind().as_str(),
                    category = ?error.category(),
                    "An error occurred while fetching the address from the database: {}",
                    error
                );
                None
            }
        }
    }
}

/// Maps a caller credential to the store it belongs to.
#[async_trait]
pub trait StoreResolver: Send + Sync {
    /// Fails with [`CheckoutError::InvalidCredential`] when the token does
    /// not identify a store.
    async fn resolve(&self, token: &str) -> Result<StoreContext>;
}
