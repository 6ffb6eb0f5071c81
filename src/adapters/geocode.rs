use crate::domain::model::Place;
use crate::domain::ports::PlaceSearch;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Nominatim-style place search.
pub struct NominatimClient {
    client: Client,
    endpoint: String,
}

impl NominatimClient {
    pub fn new<S: Into<String>>(endpoint: S) -> Result<Self> {
        // Nominatim's usage policy requires an identifying agent.
        let client = Client::builder()
            .user_agent(concat!("alcina-profile/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl PlaceSearch for NominatimClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>> {
        tracing::debug!("Searching locations for: {}", query);
        let limit = limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "json"),
                ("q", query),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
                ("countrycodes", ""),
            ])
            .send()
            .await?
            .error_for_status()?;

        let places: Vec<Place> = response.json().await?;
        tracing::debug!("Search returned {} places", places.len());
        Ok(places)
    }
}
