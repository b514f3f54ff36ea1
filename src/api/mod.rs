mod builder;

pub use builder::OfferAPIBuilder;

use crate::error::Error;
use crate::helpers::parses_response;
use crate::response::{offers_from_values, Offer};
use crate::types::HttpClient;
use std::time::Duration;
use url::Url;

/// Where the dupe server listens by default.
pub const DEFAULT_URL: &str = "http://localhost:8080/api/dupe";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches offers from the dupe server.
#[derive(Debug, Clone)]
pub struct OfferAPI {
    client: HttpClient,
    url: Url,
}

impl OfferAPI {
    /// Creates an [`OfferAPI`] for `url` with default settings.
    pub fn new<T>(url: T) -> Result<Self, Error>
    where
        T: Into<String>,
    {
        Self::builder().url(url).build()
    }
    
    /// Builder for constructing an [`OfferAPI`].
    pub fn builder() -> OfferAPIBuilder {
        OfferAPIBuilder::new()
    }
    
    /// The endpoint offers are fetched from.
    pub fn url(&self) -> &Url {
        &self.url
    }
    
    /// Fetches the current offers. The server expects an empty `POST`.
    /// 
    /// The body must be a JSON array. Each entry is read on its own, so a mistyped entry is
    /// kept in place and reported as malformed when reconciled rather than failing the fetch.
    pub async fn get_offers(&self) -> Result<Vec<Offer>, Error> {
        let response = self.client.post(self.url.clone())
            .send()
            .await?;
        let entries: Vec<serde_json::Value> = parses_response(response).await?;
        let offers = offers_from_values(entries);
        
        log::debug!("Fetched {} offer(s) from {}", offers.len(), self.url);
        
        Ok(offers)
    }
}
