//! HTTP client for communicating with rosed.

use anyhow::{anyhow, Context, Result};
use rose_common::{
    AskRequest, AskResponse, ErrorResponse, GuessRequest, GuessResponse, HealthResponse,
    ResetResponse, StatusResponse,
};
use serde::de::DeserializeOwned;

/// Client for the rosed game API
pub struct RoseClient {
    client: reqwest::Client,
    base_url: String,
}

impl RoseClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn status(&self) -> Result<StatusResponse> {
        self.get("/game/status").await
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("/health").await
    }

    pub async fn ask(&self, question: &str) -> Result<AskResponse> {
        let body = AskRequest {
            question: question.to_string(),
        };
        self.post("/game/ask", Some(&body)).await
    }

    pub async fn guess(&self, guess: &str) -> Result<GuessResponse> {
        let body = GuessRequest {
            guess: guess.to_string(),
        };
        self.post("/game/guess", Some(&body)).await
    }

    pub async fn reset(&self) -> Result<ResetResponse> {
        self.post::<(), _>("/game/reset", None).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| connect_hint(&self.base_url))?;
        decode(response).await
    }

    async fn post<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.endpoint(path);
        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .with_context(|| connect_hint(&self.base_url))?;
        decode(response).await
    }
}

fn connect_hint(base_url: &str) -> String {
    format!(
        "Cannot reach rosed at {}\n\
         Is the daemon running? Start it with: rosed --bind 127.0.0.1:8001",
        base_url
    )
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(err) => anyhow!("{} (HTTP {})", err.detail, status.as_u16()),
            Err(_) => anyhow!("rosed returned HTTP {}: {}", status.as_u16(), text),
        });
    }
    serde_json::from_str(&text).with_context(|| format!("unexpected response body: {}", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = RoseClient::new("http://localhost:8001/");
        assert_eq!(client.endpoint("/game/status"), "http://localhost:8001/api/game/status");
    }

    #[tokio::test]
    async fn test_unreachable_daemon_has_hint() {
        let client = RoseClient::new("http://127.0.0.1:1");
        let err = client.status().await.err().unwrap();
        assert!(format!("{:#}", err).contains("Cannot reach rosed"));
    }
}
