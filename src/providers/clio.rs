use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{Provider, System};
use crate::config::Credential;
use crate::error::{AuditError, Result};
use crate::model::ResourceCollection;

pub struct ClioProvider {
    system: System,
    base_url: String,
    auth_header: String,
    client: reqwest::Client,
}

impl ClioProvider {
    pub fn new(system: System, base_url: String, credential: &Credential) -> Self {
        Self {
            system,
            base_url,
            auth_header: credential.bearer(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn malformed(&self, endpoint: &str, reason: String) -> AuditError {
        AuditError::MalformedResponse {
            system: self.system,
            endpoint: endpoint.to_string(),
            reason,
        }
    }
}

#[async_trait]
impl Provider for ClioProvider {
    fn system(&self) -> System {
        self.system
    }

    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, endpoint: &str) -> Result<ResourceCollection> {
        let url = self.url(endpoint);
        debug!(system = %self.system, %url, "sending request");

        let request_error = |source| AuditError::Request {
            system: self.system,
            endpoint: endpoint.to_string(),
            source,
        };

        let resp = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(request_error)?;

        let body = resp.text().await.map_err(request_error)?;
        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| self.malformed(endpoint, format!("body is not valid JSON: {e}")))?;
        let collection =
            ResourceCollection::from_payload(payload).map_err(|r| self.malformed(endpoint, r))?;

        debug!(system = %self.system, items = collection.items.len(), "response parsed");
        Ok(collection)
    }
}
