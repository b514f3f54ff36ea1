//! Reconciles a freshly fetched offer list against the persisted offer sets.

use crate::error::MalformedOfferError;
use crate::manager::PollData;
use crate::offer_filter::FilterConfig;
use crate::response::Offer;
use crate::types::OfferId;
use serde::{Serialize, Deserialize};

/// An offer along with its ID and whether it has been resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedOffer {
    pub id: OfferId,
    /// Whether the user has marked this offer as resolved.
    pub resolved: bool,
    #[serde(flatten)]
    pub offer: Offer,
}

/// The outcome of reconciling an offer list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// The fetched offers in their original order, minus any that were malformed.
    pub offers: Vec<TrackedOffer>,
    /// The replacement sets. Both only contain IDs of `offers`.
    pub poll_data: PollData,
    /// Whether any offer is not in the new seen set.
    pub has_unseen_offer: bool,
    /// Offers that were skipped because no ID could be derived.
    pub malformed: Vec<MalformedOfferError>,
}

impl Reconciliation {
    /// Offers not in the new seen set.
    pub fn unseen_offers(&self) -> impl Iterator<Item = &TrackedOffer> {
        self.offers
            .iter()
            .filter(|tracked| !self.poll_data.seen.contains(&tracked.id))
    }
}

/// Reconciles `offers` against `poll_data`.
/// 
/// An offer is resolved if its ID is in the resolved set. It counts as seen if its ID is in the
/// seen set or `filters` hides it. The returned sets are rebuilt from scratch, so IDs of offers
/// that are no longer listed are dropped.
/// 
/// Offers without a seller or buyer date are logged and skipped. They appear in neither set.
pub fn reconcile(
    offers: Vec<Offer>,
    poll_data: &PollData,
    filters: &FilterConfig,
) -> Reconciliation {
    let mut reconciliation = Reconciliation {
        offers: Vec::with_capacity(offers.len()),
        ..Reconciliation::default()
    };
    
    for (index, offer) in offers.into_iter().enumerate() {
        let id = match offer.id() {
            Ok(id) => id,
            Err(error) => {
                let error = error.at(index);
                
                log::warn!("Skipping offer: {error}");
                reconciliation.malformed.push(error);
                continue;
            },
        };
        let resolved = poll_data.resolved.contains(&id);
        
        if resolved {
            reconciliation.poll_data.resolved.insert(id.clone());
        }
        
        if poll_data.seen.contains(&id) || filters.hides(&offer) {
            reconciliation.poll_data.seen.insert(id.clone());
        } else {
            reconciliation.has_unseen_offer = true;
        }
        
        reconciliation.offers.push(TrackedOffer {
            id,
            resolved,
            offer,
        });
    }
    
    reconciliation
}
