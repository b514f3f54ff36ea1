//! Equity and required-aden filters. Offers hidden by an enabled filter count as seen and never
//! raise an alert.

use crate::enums::StoreKey;
use crate::helpers::format_number;
use crate::response::Offer;
use crate::store::StateStore;
use serde::{Serialize, Deserialize};

/// Minimum equity used when none is stored.
pub const DEFAULT_MIN_EQUITY: f64 = 1_000_000.0;
/// Maximum required aden used when none is stored.
pub const DEFAULT_MAX_REQUIRED: f64 = 20_000_000.0;

/// User-editable offer filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Offers with less equity than this are hidden when `min_equity_on` is set.
    pub min_equity: f64,
    /// Offers requiring more aden than this are hidden when `max_required_on` is set.
    pub max_required: f64,
    pub min_equity_on: bool,
    pub max_required_on: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_equity: DEFAULT_MIN_EQUITY,
            max_required: DEFAULT_MAX_REQUIRED,
            min_equity_on: false,
            max_required_on: false,
        }
    }
}

impl FilterConfig {
    /// Whether the equity filter hides `offer`. An offer without an equity value is never hidden.
    pub fn hides_by_equity(&self, offer: &Offer) -> bool {
        self.min_equity_on && offer.equity.is_some_and(|equity| equity < self.min_equity)
    }
    
    /// Whether the required aden filter hides `offer`. An offer without a required amount is
    /// never hidden.
    pub fn hides_by_required(&self, offer: &Offer) -> bool {
        self.max_required_on && offer.required_aden.is_some_and(|required| required > self.max_required)
    }
    
    /// Whether any enabled filter hides `offer`.
    pub fn hides(&self, offer: &Offer) -> bool {
        self.hides_by_equity(offer) || self.hides_by_required(offer)
    }
    
    /// Counts the offers hidden by the equity filter.
    pub fn count_hidden_by_equity<'a, I>(&self, offers: I) -> usize
    where
        I: IntoIterator<Item = &'a Offer>,
    {
        offers.into_iter().filter(|offer| self.hides_by_equity(offer)).count()
    }
    
    /// Counts the offers hidden by the required aden filter.
    pub fn count_hidden_by_required<'a, I>(&self, offers: I) -> usize
    where
        I: IntoIterator<Item = &'a Offer>,
    {
        offers.into_iter().filter(|offer| self.hides_by_required(offer)).count()
    }
    
    /// Loads filters from `store`. Missing or unparseable numbers fall back to the defaults and
    /// a switch is only on when stored as exactly `"true"`.
    pub fn load<S>(store: &S) -> Self
    where
        S: StateStore + ?Sized,
    {
        Self {
            min_equity: load_number(store, StoreKey::MinEquity, DEFAULT_MIN_EQUITY),
            max_required: load_number(store, StoreKey::MaxRequired, DEFAULT_MAX_REQUIRED),
            min_equity_on: load_switch(store, StoreKey::MinEquityOn),
            max_required_on: load_switch(store, StoreKey::MaxRequiredOn),
        }
    }
    
    /// Saves filters to `store`.
    pub fn save<S>(&self, store: &mut S)
    where
        S: StateStore + ?Sized,
    {
        store.set_key(StoreKey::MinEquity, format_number(self.min_equity));
        store.set_key(StoreKey::MaxRequired, format_number(self.max_required));
        store.set_key(StoreKey::MinEquityOn, self.min_equity_on.to_string());
        store.set_key(StoreKey::MaxRequiredOn, self.max_required_on.to_string());
    }
}

fn load_number<S>(store: &S, key: StoreKey, default: f64) -> f64
where
    S: StateStore + ?Sized,
{
    match store.get_key(key) {
        Some(value) if !value.is_empty() => match value.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => number,
            _ => {
                log::warn!("Ignoring stored {key} \"{value}\", using {default}");
                default
            },
        },
        _ => default,
    }
}

fn load_switch<S>(store: &S, key: StoreKey) -> bool
where
    S: StateStore + ?Sized,
{
    store.get_key(key).as_deref() == Some("true")
}
