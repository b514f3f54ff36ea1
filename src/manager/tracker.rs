use super::PollData;
use crate::capabilities::Capabilities;
use crate::offer_filter::FilterConfig;
use crate::reconcile::{reconcile, Reconciliation, TrackedOffer};
use crate::resolution::toggle_resolved;
use crate::response::Offer;
use crate::store::StateStore;

/// Holds the current offers and applies every change to them and to the persisted sets.
/// 
/// All methods run synchronously. When polling, the tracker is owned by the polling task which
/// handles one poll or action at a time.
#[derive(Debug)]
pub struct OfferTracker<S> {
    store: S,
    filters: FilterConfig,
    offers: Vec<TrackedOffer>,
    capabilities: Capabilities,
}

impl<S> OfferTracker<S>
where
    S: StateStore,
{
    /// Creates a tracker over `store`, loading the stored filters.
    pub fn new(
        store: S,
        capabilities: Capabilities,
    ) -> Self {
        let filters = FilterConfig::load(&store);
        
        Self {
            store,
            filters,
            offers: Vec::new(),
            capabilities,
        }
    }
    
    /// The offers from the last poll.
    pub fn offers(&self) -> &[TrackedOffer] {
        &self.offers
    }
    
    /// The current filters.
    pub fn filters(&self) -> &FilterConfig {
        &self.filters
    }
    
    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
    
    /// The persisted sets as currently stored.
    pub fn poll_data(&self) -> PollData {
        PollData::load(&self.store)
    }
    
    /// Whether `id` is in the persisted resolved set.
    pub fn is_resolved(&self, id: &str) -> bool {
        self.poll_data().resolved.contains(id)
    }
    
    /// Reconciles freshly fetched offers, replaces both persisted sets and raises the alert if
    /// any offer is unseen.
    pub fn apply_offers(&mut self, offers: Vec<Offer>) -> Reconciliation {
        let reconciliation = reconcile(offers, &self.poll_data(), &self.filters);
        
        reconciliation.poll_data.save(&mut self.store);
        self.persist();
        self.offers = reconciliation.offers.clone();
        
        if reconciliation.has_unseen_offer {
            log::info!("{} unseen offer(s)", reconciliation.unseen_offers().count());
            self.capabilities.modal.show(&self.offers);
            self.capabilities.alert.play();
        }
        
        reconciliation
    }
    
    /// Toggles the resolved state of the current offer with `id`, asking for confirmation first.
    /// Returns the offer's resolved state afterwards, or `None` if no current offer has this ID.
    /// Nothing is written when the user declines.
    pub fn toggle_resolved(&mut self, id: &str) -> Option<bool> {
        let offer = self.offers.iter_mut().find(|tracked| tracked.id == id)?;
        let mut poll_data = PollData::load(&self.store);
        let changed = toggle_resolved(
            id,
            offer,
            &mut poll_data.resolved,
            &mut *self.capabilities.confirmer,
        );
        let resolved = offer.resolved;
        
        if changed {
            log::debug!("Offer {id} resolved: {resolved}");
            poll_data.save_resolved(&mut self.store);
            self.persist();
        }
        
        Some(resolved)
    }
    
    /// Called when the user dismisses the alert. Stops the sound and marks every current offer
    /// as seen.
    pub fn dismiss_alert(&mut self) {
        self.capabilities.alert.stop();
        
        let mut poll_data = PollData::load(&self.store);
        
        poll_data.seen = self.offers
            .iter()
            .map(|tracked| tracked.id.clone())
            .collect();
        poll_data.save_seen(&mut self.store);
        self.persist();
    }
    
    /// Replaces and saves the filters. They apply from the next poll on.
    pub fn set_filters(&mut self, filters: FilterConfig) {
        filters.save(&mut self.store);
        self.persist();
        self.filters = filters;
    }
    
    fn persist(&mut self) {
        // In-memory state stays authoritative; the store retries on the next persist.
        if let Err(error) = self.store.persist() {
            log::warn!("Failed to persist state: {error}");
        }
    }
}
