pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::{create_router, serve, AppState};
pub use crate::config::ServiceConfig;
pub use crate::core::checkout::CheckoutService;
pub use crate::core::sanitizer::sanitize;
pub use crate::core::selector::LookupStrategySelector;
pub use crate::domain::model::{
    AddressRecord, City, DetailedAddress, LookupKey, LookupKind, SimpleAddress, State,
    StoreContext,
};
pub use crate::utils::error::{CheckoutError, Result};
