use crate::config::HTTP_TIMEOUT;
use crate::error::{BoardError, Result};
use crate::types::CameraInfo;

/// How much of a broken payload is kept in error messages
const EXCERPT_LEN: usize = 200;

/// HTTP client for a board manager's local API
///
/// Every request is bounded by [`HTTP_TIMEOUT`]; an in-flight request is
/// aborted when the timeout fires or the owning future is dropped.
#[derive(Debug, Clone)]
pub struct BoardClient {
    http: reqwest::Client,
    base_url: String,
}

impl BoardClient {
    /// Create a client for the board manager at the given host and port
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .connect_timeout(HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: format!("http://{}:{}", host, port),
        })
    }

    /// Fetch the raw board state from `/api/state`
    pub async fn state(&self) -> Result<serde_json::Value> {
        self.get_json("/api/state").await
    }

    /// Fetch the board manager version from `/api/version`
    pub async fn version(&self) -> Result<String> {
        let body = self.get_text("/api/version").await?;
        Ok(body.trim().to_string())
    }

    /// Fetch the camera configuration from `/api/config`
    pub async fn camera_config(&self) -> Result<CameraInfo> {
        let config = self.get_json("/api/config").await?;
        Ok(CameraInfo::from_config(&config))
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).send().await.map_err(map_transport)?;
        response.text().await.map_err(map_transport)
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let body = self.get_text(path).await?;
        serde_json::from_str(&body).map_err(|e| BoardError::Payload {
            reason: e.to_string(),
            excerpt: truncate(&body, EXCERPT_LEN),
        })
    }
}

fn map_transport(error: reqwest::Error) -> BoardError {
    if error.is_timeout() {
        BoardError::Timeout
    } else {
        BoardError::Http(error)
    }
}

fn truncate(body: &str, limit: usize) -> String {
    if body.chars().count() <= limit {
        body.to_string()
    } else {
        let cut: String = body.chars().take(limit).collect();
        format!("{}...", cut)
    }
}
