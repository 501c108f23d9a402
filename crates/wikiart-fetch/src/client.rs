use crate::config::FetchConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use wikiart_model::{Artist, Painting};

/// Thin client over the WikiArt HTTP endpoints.
///
/// Holds the shared reqwest client plus the per-kind request timeouts;
/// pacing is the caller's concern (see [`crate::RequestPadder`]).
#[derive(Debug, Clone)]
pub struct WikiArtClient {
    http: reqwest::Client,
    base_url: String,
    login_url: String,
    metadata_timeout: Duration,
    image_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(rename = "SessionKey")]
    session_key: String,
}

impl WikiArtClient {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(WikiArtClient {
            http,
            base_url: config.base_url.clone(),
            login_url: config.login_url.clone(),
            metadata_timeout: config.metadata_timeout,
            image_timeout: config.image_timeout,
        })
    }

    /// Fetch the full public-domain artist listing.
    pub async fn artists_alphabet(&self) -> Result<Vec<Artist>> {
        let url = format!("{}/Artist/AlphabetJson", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("v", "new"), ("inPublicDomain", "true")])
            .timeout(self.metadata_timeout)
            .send()
            .await
            .context("Failed to fetch artist listing")?
            .error_for_status()?;

        response
            .json()
            .await
            .context("Failed to parse artist listing")
    }

    /// Fetch the summary painting list for one artist.
    pub async fn paintings_by_artist(&self, artist_url: &str) -> Result<Vec<Painting>> {
        let url = format!("{}/Painting/PaintingsByArtist", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("artistUrl", artist_url), ("json", "2")])
            .timeout(self.metadata_timeout)
            .send()
            .await
            .with_context(|| format!("Failed to fetch paintings for {artist_url}"))?
            .error_for_status()?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse paintings for {artist_url}"))
    }

    /// Fetch the detail record for one painting.
    ///
    /// Returns `Ok(None)` on an HTTP error status (the summary record is
    /// still usable on its own); transport errors are `Err`.
    pub async fn painting_detail(&self, content_id: i64) -> Result<Option<Painting>> {
        let url = format!("{}/Painting/ImageJson/{content_id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .timeout(self.metadata_timeout)
            .send()
            .await
            .with_context(|| format!("Failed to fetch detail for painting {content_id}"))?;

        if !response.status().is_success() {
            tracing::warn!(
                content_id,
                status = %response.status(),
                "Detail request rejected; keeping summary record"
            );
            return Ok(None);
        }

        let detail = response
            .json()
            .await
            .with_context(|| format!("Failed to parse detail for painting {content_id}"))?;
        Ok(Some(detail))
    }

    /// Start an image binary download. The response body is streamed by the
    /// caller.
    pub async fn get_image(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .http
            .get(url)
            .timeout(self.image_timeout)
            .send()
            .await
            .with_context(|| format!("Failed to request image {url}"))?;

        let status = response.status();
        anyhow::ensure!(status.is_success(), "HTTP {status} for {url}");
        Ok(response)
    }

    /// Exchange a pre-obtained access/secret code pair for a session key.
    ///
    /// Only needed for authenticated endpoints; the public-domain listing
    /// works without it.
    pub async fn login(&self, access_code: &str, secret_code: &str) -> Result<String> {
        let response = self
            .http
            .get(&self.login_url)
            .query(&[("accessCode", access_code), ("secretCode", secret_code)])
            .timeout(self.metadata_timeout)
            .send()
            .await
            .context("Failed to reach login endpoint")?
            .error_for_status()?;

        let login: LoginResponse = response
            .json()
            .await
            .context("Failed to parse login response")?;
        Ok(login.session_key)
    }
}
