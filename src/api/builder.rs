use super::{OfferAPI, DEFAULT_URL, DEFAULT_REQUEST_TIMEOUT};
use crate::error::Error;
use crate::helpers::{get_default_client, USER_AGENT_STRING};
use crate::types::HttpClient;
use std::time::Duration;
use url::Url;

/// Builder for constructing an [`OfferAPI`].
#[derive(Debug, Clone)]
pub struct OfferAPIBuilder {
    /// The endpoint offers are fetched from.
    pub(crate) url: String,
    /// User agent for requests.
    pub(crate) user_agent: &'static str,
    /// How long a single request may take. Defaults to 10 seconds.
    pub(crate) request_timeout: Duration,
    /// Client to use for requests.
    pub(crate) client: Option<HttpClient>,
}

impl Default for OfferAPIBuilder {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
            user_agent: USER_AGENT_STRING,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            client: None,
        }
    }
}

impl OfferAPIBuilder {
    /// Creates a new [`OfferAPIBuilder`].
    pub fn new() -> Self {
        Self::default()
    }
    
    /// The endpoint offers are fetched from. Must be an absolute URL.
    pub fn url<T>(mut self, url: T) -> Self
    where
        T: Into<String>,
    {
        self.url = url.into();
        self
    }
    
    /// User agent for requests.
    pub fn user_agent(mut self, user_agent: &'static str) -> Self {
        self.user_agent = user_agent;
        self
    }
    
    /// How long a single request may take. Ignored if a client is supplied.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
    
    /// Client to use for requests, e.g. one with extra middleware.
    pub fn client(mut self, client: HttpClient) -> Self {
        self.client = Some(client);
        self
    }
    
    /// Builds the [`OfferAPI`]. Fails if the URL can't be parsed.
    pub fn build(self) -> Result<OfferAPI, Error> {
        let url = Url::parse(&self.url)?;
        let client = match self.client {
            Some(client) => client,
            None => get_default_client(self.user_agent, self.request_timeout)?,
        };
        
        Ok(OfferAPI {
            client,
            url,
        })
    }
}
