use serde::{Deserialize, Serialize};
use std::fmt;

/// Flat address shape served to stores outside the beta programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleAddress {
    pub address: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub area_code: i32,
    pub region_code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub acronym: String,
}

/// Geolocated address shape served to beta testers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAddress {
    pub altitude: f64,
    pub postal_code: String,
    pub latitude: String,
    pub longitude: String,
    pub address: String,
    pub neighborhood: String,
    pub city: City,
    pub state: State,
}

/// An address as returned by one of the lookup strategies.
///
/// Serialises as the bare inner shape, with no tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressRecord {
    Detailed(DetailedAddress),
    Simple(SimpleAddress),
}

impl AddressRecord {
    pub fn kind(&self) -> LookupKind {
        match self {
            AddressRecord::Simple(_) => LookupKind::Standard,
            AddressRecord::Detailed(_) => LookupKind::Beta,
        }
    }
}

impl From<SimpleAddress> for AddressRecord {
    fn from(address: SimpleAddress) -> Self {
        AddressRecord::Simple(address)
    }
}

impl From<DetailedAddress> for AddressRecord {
    fn from(address: DetailedAddress) -> Self {
        AddressRecord::Detailed(address)
    }
}

/// A sanitized zipcode. Only ASCII digits, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey(String);

impl LookupKey {
    /// Wraps digits that already went through `core::sanitizer::sanitize`.
    pub(crate) fn from_digits(digits: String) -> Self {
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-request view of the calling store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreContext {
    pub beta_enabled: bool,
}

impl StoreContext {
    pub fn beta() -> Self {
        Self { beta_enabled: true }
    }

    pub fn standard() -> Self {
        Self {
            beta_enabled: false,
        }
    }
}

/// Which lookup strategy (and therefore which record shape) is in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Standard,
    Beta,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::Standard => "standard",
            LookupKind::Beta => "beta",
        }
    }
}

impl From<StoreContext> for LookupKind {
    fn from(context: StoreContext) -> Self {
        if context.beta_enabled {
            LookupKind::Beta
        } else {
            LookupKind::Standard
        }
    }
}
