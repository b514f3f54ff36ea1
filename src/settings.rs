//! Runtime settings: where to poll and how often.

use crate::api::{OfferAPI, DEFAULT_URL};
use crate::error::Error;
use crate::manager::PollOptions;
use serde::{Serialize, Deserialize};

/// Default seconds between polls.
pub const DEFAULT_TIMEOUT: u64 = 30;
/// Longest allowed time between polls, a day.
pub const MAX_TIMEOUT: u64 = 60 * 60 * 24;

const URL_VAR: &str = "DUPE_ALERT_URL";
const TIMEOUT_VAR: &str = "DUPE_ALERT_TIMEOUT";

/// The poll endpoint and interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// The endpoint offers are fetched from.
    #[serde(default = "default_url")]
    pub url: String,
    /// Seconds between polls.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_url() -> String {
    DEFAULT_URL.into()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
        }
    }
}

impl Settings {
    /// Reads `DUPE_ALERT_URL` and `DUPE_ALERT_TIMEOUT`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
    
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(URL_VAR).unwrap_or_else(default_url);
        let timeout = match lookup(TIMEOUT_VAR) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(timeout) if (1..=MAX_TIMEOUT).contains(&timeout) => timeout,
                _ => {
                    log::warn!("Ignoring {TIMEOUT_VAR}={value}, using {DEFAULT_TIMEOUT}");
                    DEFAULT_TIMEOUT
                },
            },
            None => DEFAULT_TIMEOUT,
        };
        
        Self {
            url,
            timeout,
        }
    }
    
    /// Polling options for these settings. The timeout is capped at [`MAX_TIMEOUT`].
    pub fn poll_options(&self) -> PollOptions {
        let timeout = self.timeout.min(MAX_TIMEOUT);
        
        PollOptions {
            // Within range after the cap.
            poll_interval: chrono::Duration::seconds(timeout as i64),
        }
    }
    
    /// An [`OfferAPI`] for the configured URL.
    pub fn api(&self) -> Result<OfferAPI, Error> {
        OfferAPI::new(self.url.as_str())
    }
}
