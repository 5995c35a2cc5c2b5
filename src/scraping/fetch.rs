use crate::core::error::AnalysisError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Source of raw page markup for the query URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, AnalysisError>;
}

/// Validate a user-supplied query URL before any network call.
///
/// Input is trimmed; it must be non-empty and an absolute `http`/`https` URL.
pub fn validate_url(raw: &str) -> Result<String, AnalysisError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::EmptyUrl);
    }

    let parsed = Url::parse(trimmed).map_err(|e| AnalysisError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AnalysisError::InvalidUrl {
            url: trimmed.to_string(),
            reason: "URL must use HTTP or HTTPS protocol".to_string(),
        });
    }

    Ok(trimmed.to_string())
}

/// Single-attempt HTTP fetcher. No retries: any failure ends the request.
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_secs: u64,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64, user_agent: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            timeout_secs,
            user_agent: user_agent.into(),
        })
    }

    fn map_error(&self, url: &str, e: reqwest::Error) -> AnalysisError {
        if e.is_timeout() {
            AnalysisError::Timeout {
                url: url.to_string(),
                secs: self.timeout_secs,
            }
        } else {
            AnalysisError::Fetch {
                url: url.to_string(),
                source: e,
            }
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AnalysisError> {
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| self.map_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| self.map_error(url, e))?;
        info!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }
}
