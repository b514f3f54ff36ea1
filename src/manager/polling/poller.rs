use super::{Poll, PollResult};
use crate::api::OfferAPI;
use crate::manager::OfferTracker;
use crate::store::StateStore;
use crate::time;
use chrono::Duration;

pub struct Poller<S> {
    pub api: OfferAPI,
    pub tracker: OfferTracker<S>,
    pub poll_interval: Duration,
}

impl<S> Poller<S>
where
    S: StateStore,
{
    /// Fetches offers and hands them to the tracker. A failed fetch changes nothing; the next
    /// scheduled poll simply tries again.
    pub async fn do_poll(&mut self) -> PollResult {
        let offers = self.api.get_offers().await
            .inspect_err(|error| log::warn!("Skipping poll: {error}"))?;
        let polled_at = time::get_server_time_now();
        let reconciliation = self.tracker.apply_offers(offers);
        
        Ok(Poll {
            offers: reconciliation.offers,
            has_unseen_offer: reconciliation.has_unseen_offer,
            malformed: reconciliation.malformed,
            polled_at,
            next_poll_at: polled_at + self.poll_interval,
        })
    }
}
