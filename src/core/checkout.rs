use crate::core::sanitizer::sanitize;
use crate::core::selector::LookupStrategySelector;
use crate::domain::model::AddressRecord;
use crate::domain::ports::StoreResolver;
use crate::utils::error::Result;
use std::sync::Arc;

/// Runs one address lookup on behalf of a store.
///
/// Stateless across calls: the store context is resolved fresh for every
/// request and dropped when the call returns.
#[derive(Clone)]
pub struct CheckoutService {
    resolver: Arc<dyn StoreResolver>,
    selector: LookupStrategySelector,
}

impl CheckoutService {
    pub fn new(resolver: Arc<dyn StoreResolver>, selector: LookupStrategySelector) -> Self {
        Self { resolver, selector }
    }

    /// Returns `Ok(None)` when no address matches, including when the store
    /// could not be queried. Only credential failures surface as `Err`.
    pub async fn address_for(&self, raw_zipcode: &str, token: &str) -> Result<Option<AddressRecord>> {
        let key = sanitize(raw_zipcode);
        tracing::debug!("Getting address for the zipcode [{}]", key);

        let context = self.resolver.resolve(token).await?;
        let lookup = self.selector.select(context);
        let expected = lookup.kind();

        match lookup.lookup(&key).await {
            Some(record) if record.kind() != expected => {
                tracing::error!(
                    zipcode = %key,
                    expected = expected.as_str(),
                    actual = record.kind().as_str(),
                    "Lookup returned a record shape that does not match its strategy"
                );
                Ok(None)
            }
            found => Ok(found),
        }
    }
}
