use crate::domain::model::{LookupKind, StoreContext};
use crate::domain::ports::AddressLookup;
use crate::utils::error::{CheckoutError, Result};
use std::sync::Arc;

/// Picks the address lookup strategy for a store.
#[derive(Clone)]
pub struct LookupStrategySelector {
    standard: Arc<dyn AddressLookup>,
    beta: Arc<dyn AddressLookup>,
}

impl LookupStrategySelector {
    /// Fails if either implementation reports a kind other than the slot it
    /// is installed in, so the two strategies can never be swapped by mistake.
    pub fn new(standard: Arc<dyn AddressLookup>, beta: Arc<dyn AddressLookup>) -> Result<Self> {
        if standard.kind() != LookupKind::Standard {
            return Err(CheckoutError::ConfigError {
                message: format!(
                    "standard lookup slot received a {} implementation",
                    standard.kind().as_str()
                ),
            });
        }
        if beta.kind() != LookupKind::Beta {
            return Err(CheckoutError::ConfigError {
                message: format!(
                    "beta lookup slot received a {} implementation",
                    beta.kind().as_str()
                ),
            });
        }

        Ok(Self { standard, beta })
    }

    pub fn select(&self, context: StoreContext) -> Arc<dyn AddressLookup> {
        match LookupKind::from(context) {
            LookupKind::Beta => Arc::clone(&self.beta),
            LookupKind::Standard => Arc::clone(&self.standard),
        }
    }
}
