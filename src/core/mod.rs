pub mod checkout;
pub mod sanitizer;
pub mod selector;

pub use crate::domain::model::{AddressRecord, LookupKey, LookupKind, StoreContext};
pub use crate::domain::ports::{AddressLookup, LookupOutcome, StoreResolver};
pub use crate::utils::error::Result;
