mod poll_action;
mod poller;

pub use poll_action::PollAction;

use poller::Poller;
use super::OfferTracker;
use crate::api::OfferAPI;
use crate::error::{Error, MalformedOfferError};
use crate::reconcile::TrackedOffer;
use crate::store::StateStore;
use crate::time::ServerTime;
use crate::types::OfferId;
use chrono::{DateTime, Duration};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// The result of a successful poll.
#[derive(Debug, Clone)]
pub struct Poll {
    /// The current offers.
    pub offers: Vec<TrackedOffer>,
    /// Whether any offer is unseen. The alert has been raised when this is set.
    pub has_unseen_offer: bool,
    /// Offers that were skipped because no ID could be derived.
    pub malformed: Vec<MalformedOfferError>,
    /// When the offers were received.
    pub polled_at: ServerTime,
    /// When the next scheduled poll happens.
    pub next_poll_at: ServerTime,
}

/// The result of a poll.
pub type PollResult = Result<Poll, Error>;

/// Events sent out of the polling task.
#[derive(Debug)]
pub enum PollEvent {
    /// A poll completed or failed.
    Polled(PollResult),
    /// An offer's resolved state after a toggle. Sent even when the user declined.
    Toggled {
        id: OfferId,
        resolved: bool,
    },
}

/// The longest interval polling runs at. Longer intervals are capped to this.
pub const MAX_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60 * 60 * 24);

/// Options for polling.
#[derive(Debug, Clone, Copy)]
pub struct PollOptions {
    /// Interval to poll at. Default is 30 seconds. Zero or negative intervals use the default
    /// and anything over [`MAX_POLL_INTERVAL`] is capped.
    pub poll_interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::seconds(30),
        }
    }
}

/// Handles to a running polling task.
#[derive(Debug)]
pub struct PollingMpsc {
    pub sender: mpsc::Sender<PollAction>,
    pub receiver: mpsc::Receiver<PollEvent>,
    pub handle: JoinHandle<()>,
}

/// Spawns the polling task. It polls immediately, then on every interval, and handles actions
/// in between. Only one poll or action is handled at a time.
/// 
/// The task ends when `cancel` is cancelled or the event receiver is dropped.
pub fn create_poller<S>(
    api: OfferAPI,
    tracker: OfferTracker<S>,
    options: PollOptions,
    cancel: CancellationToken,
) -> PollingMpsc
where
    S: StateStore + 'static,
{
    // Allows sending a message into the poller.
    let (
        tx,
        mut rx,
    ) = mpsc::channel::<PollAction>(10);
    // Allows broadcasting events outside of the poller.
    let (
        polling_tx,
        polling_rx,
    ) = mpsc::channel::<PollEvent>(10);
    // Negative and zero intervals can't be ticked.
    let poll_interval = options.poll_interval.to_std()
        .ok()
        .filter(|interval| !interval.is_zero())
        .unwrap_or_else(|| std::time::Duration::from_secs(30))
        .min(MAX_POLL_INTERVAL);
    let handle = tokio::spawn(async move {
        let mut poller = Poller {
            api,
            tracker,
            poll_interval: Duration::from_std(poll_interval)
                .unwrap_or_else(|_| Duration::seconds(30)),
        };
        let mut interval = tokio::time::interval(poll_interval);
        // To prevent spam.
        let mut last_requested_poll: Option<DateTime<chrono::Utc>> = None;
        let mut actions_open = true;
        
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        
        loop {
            let event = tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        poll = poller.do_poll() => PollEvent::Polled(poll),
                    }
                },
                message = rx.recv(), if actions_open => {
                    let Some(action) = message else {
                        // The sender was dropped, keep polling on the interval.
                        actions_open = false;
                        continue;
                    };
                    
                    match action {
                        PollAction::DoPoll => {
                            let now = chrono::Utc::now();
                            let called_too_recently = last_requested_poll
                                // Last called within the last half a second.
                                .map(|last_poll_date| now - last_poll_date < Duration::milliseconds(500))
                                .unwrap_or(false);
                            
                            last_requested_poll = Some(now);
                            
                            if called_too_recently {
                                // Ignore it.
                                continue;
                            }
                            
                            let poll = tokio::select! {
                                _ = cancel.cancelled() => break,
                                poll = poller.do_poll() => poll,
                            };
                            
                            // The next scheduled poll is a full interval from now.
                            interval.reset();
                            PollEvent::Polled(poll)
                        },
                        PollAction::ToggleResolved(id) => {
                            match poller.tracker.toggle_resolved(&id) {
                                Some(resolved) => PollEvent::Toggled { id, resolved },
                                None => {
                                    log::debug!("No current offer {id} to toggle");
                                    continue;
                                },
                            }
                        },
                        PollAction::DismissAlert => {
                            poller.tracker.dismiss_alert();
                            continue;
                        },
                        PollAction::SetFilters(filters) => {
                            poller.tracker.set_filters(filters);
                            continue;
                        },
                    }
                },
            };
            
            if polling_tx.send(event).await.is_err() {
                // They closed the connection.
                break;
            }
        }
        
        log::debug!("Polling stopped");
    });
    
    PollingMpsc {
        sender: tx,
        receiver: polling_rx,
        handle,
    }
}
