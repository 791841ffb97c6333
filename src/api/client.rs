use crate::api::traits::PropertyApi;
use crate::api::wire::{decode_list, error_detail, WireProperty, WireSubmission};
use crate::config::ApiConfig;
use crate::errors::{ApiError, ApiResult};
use crate::models::{Property, PropertyId, PropertySubmission};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

/// Property service client over HTTP/JSON
pub struct HttpPropertyApi {
    client: Client,
    base_url: String,
}

impl HttpPropertyApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("property-desk/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn item_url(&self, id: &PropertyId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Turn a failed write response into an error, preferring the service's own words
    async fn write_error(response: Response, fallback: &str) -> ApiError {
        let status = response.status();
        let detail = response.text().await.ok().and_then(|body| error_detail(&body));
        warn!(%status, ?detail, "property service refused write");

        match detail {
            Some(message) if status.is_client_error() => ApiError::rejected(message),
            Some(message) => ApiError::network(message),
            None => ApiError::network(fallback),
        }
    }

    async fn decode_one(response: Response) -> ApiResult<Property> {
        let wire: WireProperty = response.json().await?;
        wire.into_property()
    }
}

#[async_trait]
impl PropertyApi for HttpPropertyApi {
    async fn list(&self) -> ApiResult<Vec<Property>> {
        debug!("Fetching URL: {}", self.base_url);

        let response = self.client.get(&self.base_url).send().await?;
        if !response.status().is_success() {
            warn!("Property service returned status: {}", response.status());
            return Err(ApiError::network("Failed to fetch properties"));
        }

        let documents: Vec<WireProperty> = response.json().await?;
        let properties = decode_list(documents);
        info!("Fetched {} properties", properties.len());
        Ok(properties)
    }

    async fn create(&self, submission: &PropertySubmission) -> ApiResult<Property> {
        let response = self
            .client
            .post(&self.base_url)
            .json(&WireSubmission::new(submission))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::write_error(response, "Failed to create property").await);
        }
        let created = Self::decode_one(response).await?;
        info!(id = %created.id, "created property");
        Ok(created)
    }

    async fn update(&self, id: &PropertyId, submission: &PropertySubmission) -> ApiResult<Property> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(&WireSubmission::new(submission))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::write_error(response, "Failed to update property").await);
        }
        let updated = Self::decode_one(response).await?;
        info!(id = %updated.id, "updated property");
        Ok(updated)
    }

    async fn delete(&self, id: &PropertyId) -> ApiResult<()> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        if !response.status().is_success() {
            warn!(%id, status = %response.status(), "delete refused");
            return Err(ApiError::network("Failed to delete property"));
        }
        info!(%id, "deleted property");
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn item_urls_hang_off_the_base() {
        let api = HttpPropertyApi::new(&ApiConfig {
            base_url: "http://localhost:8000/api/properties/".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        assert_eq!(api.endpoint(), "http://localhost:8000/api/properties");
        assert_eq!(
            api.item_url(&PropertyId::new("65f1")),
            "http://localhost:8000/api/properties/65f1"
        );
    }
}
