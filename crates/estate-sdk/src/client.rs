//! Estate SDK client.

use anyhow::Result;
use estate_core::models::{
    CreateEstateRequest, CreateTreeRequest, CreatedResponse, DroneDistance, Estate, EstateStats,
    Tree,
};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Client for connecting to the estate server.
#[derive(Debug, Clone)]
pub struct EstateClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl EstateClient {
    /// Create a new client for the given server URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Returns true when `/health` answers.
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    /// Create an estate and return its id.
    pub async fn create_estate(&self, length: i64, width: i64) -> Result<String> {
        let url = format!("{}/v1/estate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&CreateEstateRequest { length, width })
            .send()
            .await?;
        let created: CreatedResponse = decode(response, "create estate").await?;
        tracing::debug!("Created estate {}", created.id);
        Ok(created.id)
    }

    pub async fn get_estate(&self, estate_id: &str) -> Result<Estate> {
        let url = format!("{}/v1/estate/{}", self.base_url, estate_id);
        let response = self.client.get(&url).send().await?;
        decode(response, "get estate").await
    }

    /// Plant a tree and return its id.
    pub async fn add_tree(&self, estate_id: &str, tree: CreateTreeRequest) -> Result<String> {
        let url = format!("{}/v1/estate/{}/tree", self.base_url, estate_id);
        let response = self.client.post(&url).json(&tree).send().await?;
        let created: CreatedResponse = decode(response, "add tree").await?;
        Ok(created.id)
    }

    pub async fn list_trees(&self, estate_id: &str) -> Result<Vec<Tree>> {
        let url = format!("{}/v1/estate/{}/trees", self.base_url, estate_id);
        let response = self.client.get(&url).send().await?;
        decode(response, "list trees").await
    }

    pub async fn get_stats(&self, estate_id: &str) -> Result<EstateStats> {
        let url = format!("{}/v1/estate/{}/stats", self.base_url, estate_id);
        let response = self.client.get(&url).send().await?;
        decode(response, "get stats").await
    }

    /// Total survey distance of the drone over an estate.
    pub async fn get_drone_distance(&self, estate_id: &str) -> Result<u64> {
        let url = format!("{}/v1/estate/{}/drone-plan", self.base_url, estate_id);
        let response = self.client.get(&url).send().await?;
        let plan: DroneDistance = decode(response, "get drone plan").await?;
        Ok(plan.distance)
    }
}

/// Parse a success body, or turn the server's `{"message"}` into an error.
async fn decode<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);
    anyhow::bail!("Failed to {}: {} ({})", action, status, message)
}
