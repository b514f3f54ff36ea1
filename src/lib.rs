//! Polls a dupe offer feed, remembers which offers you've seen or resolved, and raises an alert
//! when offers you haven't seen yet show up.
//! 
//! The pieces:
//! - [`OfferAPI`] fetches offers.
//! - [`reconcile`] compares them against the persisted [`PollData`].
//! - [`OfferTracker`] applies the results and user actions to a [`StateStore`].
//! - [`OfferManager`] runs all of the above on an interval in a background task.

mod capabilities;
mod helpers;
mod resolution;
pub mod api;
pub mod enums;
pub mod error;
pub mod format;
pub mod manager;
pub mod offer_filter;
pub mod reconcile;
pub mod response;
pub mod settings;
pub mod store;
pub mod time;
pub mod types;

#[cfg(test)]
mod test_server;

pub use api::OfferAPI;
pub use capabilities::{AlertPlayer, AutoConfirm, Capabilities, Confirmer, ModalController, Silent};
pub use error::Error;
pub use manager::{OfferManager, OfferTracker, PollData, PollEvent, PollOptions};
pub use offer_filter::FilterConfig;
pub use reconcile::{reconcile, Reconciliation, TrackedOffer};
pub use resolution::toggle_resolved;
pub use response::{Offer, derive_offer_id};
pub use settings::Settings;
pub use store::{FileStore, MemoryStore, StateStore};
pub use types::{OfferId, ServerTime};
