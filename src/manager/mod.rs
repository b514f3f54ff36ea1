mod poll_data;
mod polling;
mod tracker;

pub use poll_data::{PollData, load_set};
pub use polling::{PollingMpsc, PollAction, PollEvent, Poll, PollResult, PollOptions, MAX_POLL_INTERVAL, create_poller};
pub use tracker::OfferTracker;

use crate::api::OfferAPI;
use crate::error::Error;
use crate::offer_filter::FilterConfig;
use crate::store::StateStore;
use crate::types::OfferId;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

type Polling = (mpsc::Sender<PollAction>, JoinHandle<()>, CancellationToken);

/// Manager for polling offers and sending user actions to the polling task.
#[derive(Debug, Clone)]
pub struct OfferManager {
    /// The underlying API.
    pub api: OfferAPI,
    /// The sender for sending messages to polling.
    polling: Arc<Mutex<Option<Polling>>>,
}

impl OfferManager {
    /// Creates a new [`OfferManager`].
    pub fn new(api: OfferAPI) -> Self {
        Self {
            api,
            polling: Arc::new(Mutex::new(None)),
        }
    }
    
    /// Starts polling offers. Listen to the returned receiver for events. To stop polling call
    /// [`OfferManager::stop_polling`] or drop the receiver. If this method is called again the
    /// previous polling task is stopped.
    pub fn start_polling<S>(
        &self,
        tracker: OfferTracker<S>,
        options: PollOptions,
    ) -> mpsc::Receiver<PollEvent>
    where
        S: StateStore + 'static,
    {
        let mut polling = self.polling.lock().unwrap_or_else(PoisonError::into_inner);
        
        if let Some((_, _, cancel)) = &*polling {
            // Stop the previous polling.
            cancel.cancel();
        }
        
        let cancel = CancellationToken::new();
        let PollingMpsc {
            sender,
            receiver,
            handle,
        } = create_poller(
            self.api.clone(),
            tracker,
            options,
            cancel.clone(),
        );
        
        *polling = Some((sender, handle, cancel));
        
        receiver
    }
    
    /// Stops polling. Returns the handle of the polling task so it can be awaited, or `None` if
    /// polling was not running.
    pub fn stop_polling(&self) -> Option<JoinHandle<()>> {
        let (_, handle, cancel) = self.polling
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;
        
        cancel.cancel();
        
        Some(handle)
    }
    
    /// Sends a message to the poller to do a poll now. The message will be ignored if one was
    /// sent within the last half a second.
    pub fn do_poll(&self) -> Result<(), Error> {
        self.send(PollAction::DoPoll)
    }
    
    /// Asks the poller to toggle the resolved state of an offer. The outcome arrives as a
    /// [`PollEvent::Toggled`].
    pub fn toggle_resolved(&self, id: OfferId) -> Result<(), Error> {
        self.send(PollAction::ToggleResolved(id))
    }
    
    /// Tells the poller the user dismissed the alert.
    pub fn dismiss_alert(&self) -> Result<(), Error> {
        self.send(PollAction::DismissAlert)
    }
    
    /// Replaces the filters used from the next poll on.
    pub fn set_filters(&self, filters: FilterConfig) -> Result<(), Error> {
        self.send(PollAction::SetFilters(filters))
    }
    
    fn send(&self, action: PollAction) -> Result<(), Error> {
        if let Some((sender, _, _)) = &*self.polling.lock().unwrap_or_else(PoisonError::into_inner) {
            sender.try_send(action)
                .map_err(|error| match error {
                    TrySendError::Full(_) => Error::PollingBufferFull,
                    // The polling task has ended.
                    TrySendError::Closed(_) => Error::PollingNotSetup,
                })?;
            
            Ok(())
        } else {
            Err(Error::PollingNotSetup)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Capabilities;
    use crate::store::MemoryStore;
    use chrono::Duration;
    use crate::test_server::{local_api, serve, serve_offers, Reply, OFFERS};
    
    const FIRST_ID: &str = "14490000001449000300";
    
    fn hourly() -> PollOptions {
        PollOptions {
            poll_interval: Duration::hours(1),
        }
    }
    
    async fn next_poll(receiver: &mut mpsc::Receiver<PollEvent>) -> Poll {
        match receiver.recv().await {
            Some(PollEvent::Polled(Ok(poll))) => poll,
            other => panic!("Expected a poll, got {other:?}"),
        }
    }
    
    #[tokio::test]
    async fn polls_and_handles_actions() {
        let manager = OfferManager::new(local_api(&serve_offers().await));
        let tracker = OfferTracker::new(MemoryStore::new(), Capabilities::headless());
        let mut receiver = manager.start_polling(tracker, hourly());
        let poll = next_poll(&mut receiver).await;
        
        assert!(poll.has_unseen_offer);
        assert_eq!(poll.offers.len(), 2);
        assert_eq!(poll.malformed.len(), 1);
        assert_eq!(poll.next_poll_at - poll.polled_at, Duration::hours(1));
        
        manager.toggle_resolved(FIRST_ID.into()).unwrap();
        
        match receiver.recv().await {
            Some(PollEvent::Toggled { id, resolved }) => {
                assert_eq!(id, FIRST_ID);
                assert!(resolved);
            },
            other => panic!("Expected a toggle, got {other:?}"),
        }
        
        manager.dismiss_alert().unwrap();
        manager.do_poll().unwrap();
        
        let poll = next_poll(&mut receiver).await;
        
        assert!(!poll.has_unseen_offer);
        assert!(poll.offers[0].resolved);
        
        manager.stop_polling().unwrap().await.unwrap();
        
        assert!(matches!(manager.do_poll(), Err(Error::PollingNotSetup)));
    }
    
    #[tokio::test]
    async fn caps_long_intervals() {
        let manager = OfferManager::new(local_api(&serve_offers().await));
        let tracker = OfferTracker::new(MemoryStore::new(), Capabilities::headless());
        let options = PollOptions {
            poll_interval: Duration::weeks(1_000_000),
        };
        let mut receiver = manager.start_polling(tracker, options);
        let poll = next_poll(&mut receiver).await;
        
        assert_eq!(poll.next_poll_at - poll.polled_at, Duration::days(1));
        
        manager.stop_polling().unwrap().await.unwrap();
    }
    
    #[tokio::test]
    async fn failed_fetch_keeps_polling() {
        // Nothing listens on the discard port.
        let manager = OfferManager::new(local_api("http://127.0.0.1:9/api/dupe"));
        let tracker = OfferTracker::new(MemoryStore::new(), Capabilities::headless());
        let mut receiver = manager.start_polling(tracker, hourly());
        
        assert!(matches!(receiver.recv().await, Some(PollEvent::Polled(Err(_)))));
        
        // The task is still alive and handles requests.
        manager.do_poll().unwrap();
        
        assert!(matches!(receiver.recv().await, Some(PollEvent::Polled(Err(_)))));
        
        manager.stop_polling().unwrap().await.unwrap();
    }
    
    #[tokio::test]
    async fn bad_responses_keep_polling() {
        let url = serve(vec![
            Reply::html(500, "<html><title>Internal Server Error</title></html>"),
            Reply::html(200, include_str!("../api/fixtures/maintenance.html")),
            Reply::json(r#"{"offers":[]}"#),
            Reply::json(OFFERS),
        ]).await;
        let manager = OfferManager::new(local_api(&url));
        let tracker = OfferTracker::new(MemoryStore::new(), Capabilities::headless());
        let options = PollOptions {
            poll_interval: Duration::milliseconds(50),
        };
        let mut receiver = manager.start_polling(tracker, options);
        
        assert!(matches!(
            receiver.recv().await,
            Some(PollEvent::Polled(Err(Error::Http(status)))) if status.as_u16() == 500
        ));
        assert!(matches!(
            receiver.recv().await,
            Some(PollEvent::Polled(Err(Error::Response(title)))) if title == "Down for maintenance"
        ));
        assert!(matches!(receiver.recv().await, Some(PollEvent::Polled(Err(Error::Parse(_))))));
        
        let poll = next_poll(&mut receiver).await;
        
        assert_eq!(poll.offers.len(), 2);
        assert!(poll.has_unseen_offer);
        
        manager.stop_polling().unwrap().await.unwrap();
    }
    
    #[test]
    fn actions_need_polling() {
        let manager = OfferManager::new(OfferAPI::builder().build().unwrap());
        
        assert!(matches!(manager.dismiss_alert(), Err(Error::PollingNotSetup)));
        assert!(manager.stop_polling().is_none());
    }
}
