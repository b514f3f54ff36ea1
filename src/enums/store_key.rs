use serde::{Serialize, Deserialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// A key in the state store. The names match those the dashboard has always written, including
/// the misspelled `maxRrequired` keys, so existing state keeps loading.
#[derive(Debug, Serialize, Deserialize, Display, EnumString, IntoStaticStr, PartialEq, Eq, Hash, Clone, Copy)]
pub enum StoreKey {
    /// JSON array of resolved offer IDs.
    #[strum(serialize = "oldOffers")]
    #[serde(rename = "oldOffers")]
    OldOffers,
    /// JSON array of seen offer IDs.
    #[strum(serialize = "knownOffers")]
    #[serde(rename = "knownOffers")]
    KnownOffers,
    #[strum(serialize = "minEquity")]
    #[serde(rename = "minEquity")]
    MinEquity,
    #[strum(serialize = "maxRrequired")]
    #[serde(rename = "maxRrequired")]
    MaxRequired,
    #[strum(serialize = "minEquityOn")]
    #[serde(rename = "minEquityOn")]
    MinEquityOn,
    #[strum(serialize = "maxRrequiredOn")]
    #[serde(rename = "maxRrequiredOn")]
    MaxRequiredOn,
}

impl StoreKey {
    /// The string key.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
