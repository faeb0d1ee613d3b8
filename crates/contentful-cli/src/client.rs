//! Minimal Content Management API client used by the `generate` command.

// Internal imports (std, crate)
use std::time::Duration;

// External imports (alphabetized)
use anyhow::Context;
use contentful_core::{field::Json, ApiConfiguration, Parameters, RequestUriBuilder};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

/// Media type of Content Management API requests
const CONTENT_TYPE: &str = "application/vnd.contentful.management.v1+json";

/// One page of a collection response.
#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    items: Vec<Json>,
    #[serde(default)]
    total: u64,
}

/// Fetches collections from the Content Management API.
#[derive(Debug, Clone)]
pub struct ManagementClient {
    http: Client,
    api_host: Url,
    access_token: String,
}

impl ManagementClient {
    pub fn new(api_host: Url, access_token: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("contentful-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            api_host,
            access_token: access_token.into(),
        })
    }

    /// Raw payloads of every content type in an environment, fetched page by page
    pub async fn content_types(
        &self,
        space: &str,
        environment: &str,
        page_limit: u32,
    ) -> anyhow::Result<Vec<Json>> {
        let path = collection_path("ContentType", space, environment)?;
        let mut items = Vec::new();

        loop {
            let url = self.page_url(&path, items.len() as u64, page_limit)?;
            debug!(%url, "Fetching content types");

            let page: Page = self
                .http
                .get(url.clone())
                .bearer_auth(&self.access_token)
                .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
                .send()
                .await
                .with_context(|| format!("Request to {url} failed"))?
                .error_for_status()
                .with_context(|| format!("Request to {url} was rejected"))?
                .json()
                .await
                .with_context(|| format!("Response from {url} is not a collection"))?;

            let fetched = page.items.len();
            items.extend(page.items);
            if fetched == 0 || items.len() as u64 >= page.total {
                break;
            }
        }

        Ok(items)
    }

    fn page_url(&self, path: &str, skip: u64, limit: u32) -> anyhow::Result<Url> {
        let mut url = self
            .api_host
            .join(path)
            .with_context(|| format!("Invalid request path {path}"))?;
        url.query_pairs_mut()
            .append_pair("skip", &skip.to_string())
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }
}

/// Request path of the `resource_type` collection in an environment
fn collection_path(resource_type: &str, space: &str, environment: &str) -> anyhow::Result<String> {
    let descriptor = ApiConfiguration::global().resolve(resource_type)?;
    let parameters: Parameters = [("space", space), ("environment", environment)]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    Ok(RequestUriBuilder::build(&descriptor, &parameters, None)?)
}
