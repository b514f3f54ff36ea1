//! Types for common values in offer responses and persisted state.

use std::collections::HashSet;

/// The key of an offer. This is the seller's date followed by the buyer's date, with no
/// delimiter between them.
pub type OfferId = String;
/// A set of offer IDs.
pub type OfferIdSet = HashSet<OfferId>;

pub use crate::time::ServerTime;

// Types internally used by the crate.
use reqwest_middleware::ClientWithMiddleware;

pub(crate) type HttpClient = ClientWithMiddleware;
