// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{MusicBrainzError, Result};
use crate::models::{
    Artist, ArtistSearchResult, Recording, RecordingSearchResult, Release, ReleaseSearchResult,
    SearchQuery, StructuredQuery, Tag,
};
use crate::rate_limiter::RateLimiter;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tagbrainz_config::{MusicBrainzConfig, DEFAULT_BASE_URL};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, trace};
use url::Url;

const USER_AGENT: &str = concat!(
    "TagBrainz/",
    env!("CARGO_PKG_VERSION"),
    " ( https://github.com/tagbrainz/tagbrainz )"
);

/// Result size for the title + artist recording search.
const TITLE_ARTIST_SEARCH_LIMIT: u32 = 20;

/// MusicBrainz web service client.
///
/// Every operation performs one GET and decodes the body; nothing is cached
/// or retried. Clones share the underlying connection pool and, if enabled,
/// the rate limiter.
#[derive(Debug, Clone)]
pub struct MusicBrainzClient {
    client: Client,
    base_url: String,
    rate_limiter: Option<RateLimiter>,
    request_timeout: Option<Duration>,
    check_status: bool,
}

impl MusicBrainzClient {
    /// Create a new MusicBrainz client with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> MusicBrainzClientBuilder {
        MusicBrainzClientBuilder::default()
    }

    /// Copy of this client whose calls must finish within `timeout`,
    /// including any wait for the rate limiter.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut client = self.clone();
        client.request_timeout = Some(timeout);
        client
    }

    /// Search for artists by name.
    ///
    /// # Example
    /// ```no_run
    /// # use tagbrainz_musicbrainz::MusicBrainzClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = MusicBrainzClient::new()?;
    /// let artists = client.search_artists("Radiohead", 5).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_artists(&self, name: &str, limit: u32) -> Result<Vec<Artist>> {
        self.search_artists_with(SearchQuery::new(name).limit(limit))
            .await
    }

    pub async fn search_artists_with(&self, query: SearchQuery) -> Result<Vec<Artist>> {
        let result: ArtistSearchResult = self.search("artist", &query).await?;
        Ok(result.artists)
    }

    /// Look up an artist by MusicBrainz ID.
    ///
    /// # Example
    /// ```no_run
    /// # use tagbrainz_musicbrainz::MusicBrainzClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = MusicBrainzClient::new()?;
    /// let artist = client
    ///     .get_artist_by_id("a74b1b7f-71a5-4011-9441-d0b5e4122711")
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_artist_by_id(&self, id: &str) -> Result<Artist> {
        self.lookup("artist", id).await
    }

    /// Search for releases by title.
    pub async fn search_releases(&self, title: &str, limit: u32) -> Result<Vec<Release>> {
        self.search_releases_with(SearchQuery::new(title).limit(limit))
            .await
    }

    pub async fn search_releases_with(&self, query: SearchQuery) -> Result<Vec<Release>> {
        let result: ReleaseSearchResult = self.search("release", &query).await?;
        Ok(result.releases)
    }

    pub async fn get_release_by_id(&self, id: &str) -> Result<Release> {
        self.lookup("release", id).await
    }

    /// Search for recordings by title.
    pub async fn search_recordings(&self, title: &str, limit: u32) -> Result<Vec<Recording>> {
        self.search_recordings_with(SearchQuery::new(title).limit(limit))
            .await
    }

    pub async fn search_recordings_with(&self, query: SearchQuery) -> Result<Vec<Recording>> {
        let result: RecordingSearchResult = self.search("recording", &query).await?;
        Ok(result.recordings)
    }

    pub async fn get_recording_by_id(&self, id: &str) -> Result<Recording> {
        self.lookup("recording", id).await
    }

    /// Search recordings with `recording:<title> artist:<artist>`, up to 20 results.
    pub async fn search_recordings_by_title_and_artist(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Vec<Recording>> {
        let query = StructuredQuery::new().recording(title).artist(artist);
        self.search_recordings_with(SearchQuery::new(query.build()).limit(TITLE_ARTIST_SEARCH_LIMIT))
            .await
    }

    /// Tags and first release date of the single recording matching title,
    /// artist and album.
    ///
    /// Fails with [`MusicBrainzError::NoMatch`] unless the search returns
    /// exactly one recording. The match is then fetched again by ID, since
    /// search results do not carry tags.
    ///
    /// # Example
    /// ```no_run
    /// # use tagbrainz_musicbrainz::MusicBrainzClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = MusicBrainzClient::new()?;
    /// let (tags, released) = client
    ///     .get_tags_by_title_and_artist_and_album("Karma Police", "Radiohead", "OK Computer")
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_tags_by_title_and_artist_and_album(
        &self,
        title: &str,
        artist: &str,
        album: &str,
    ) -> Result<(Vec<Tag>, String)> {
        let query = StructuredQuery::new()
            .recording(title)
            .artist(artist)
            .release(album);
        let matches = self
            .search_recordings_with(SearchQuery::new(query.build()).limit(1))
            .await?;

        let id = match matches.as_slice() {
            [only] => only.id.clone(),
            other => {
                debug!(
                    target: "musicbrainz",
                    title, artist, album,
                    matches = other.len(),
                    "no unique recording match"
                );
                return Err(MusicBrainzError::NoMatch { count: other.len() });
            }
        };

        let recording = self.get_recording_by_id_with_tags(&id).await?;
        Ok((recording.tags, recording.first_release_date))
    }

    /// Same request as [`get_recording_by_id`](Self::get_recording_by_id);
    /// named for call sites that rely on the tags being present.
    pub async fn get_recording_by_id_with_tags(&self, id: &str) -> Result<Recording> {
        self.lookup("recording", id).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| MusicBrainzError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| MusicBrainzError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// `<entity>/?query=..&limit=..&offset=..&fmt=json`
    async fn search<T: DeserializeOwned>(&self, entity: &str, query: &SearchQuery) -> Result<T> {
        let mut url = self.endpoint(&[entity, ""])?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", &query.query);

            if let Some(limit) = query.limit {
                pairs.append_pair("limit", &limit.to_string());
            }

            if let Some(offset) = query.offset {
                pairs.append_pair("offset", &offset.to_string());
            }

            pairs.append_pair("fmt", "json");
        }

        self.get(url).await
    }

    /// `<entity>/<id>?fmt=json`
    async fn lookup<T: DeserializeOwned>(&self, entity: &str, id: &str) -> Result<T> {
        let mut url = self.endpoint(&[entity, id])?;
        url.query_pairs_mut().append_pair("fmt", "json");
        self.get(url).await
    }

    /// Single GET, no retries. The body is decoded whatever the status unless
    /// status checking is enabled.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let deadline = self
            .request_timeout
            .map(|timeout| (timeout, Instant::now() + timeout));

        if let Some(limiter) = &self.rate_limiter {
            match deadline {
                Some((timeout, at)) => timeout_at(at, limiter.acquire())
                    .await
                    .map_err(|_| MusicBrainzError::Timeout(timeout))?,
                None => limiter.acquire().await,
            }
        }

        trace!(target: "musicbrainz", "GET {}", url);

        let mut request = self.client.get(url.as_str());
        if let Some((_, at)) = deadline {
            request = request.timeout(at.saturating_duration_since(Instant::now()));
        }

        let response = request.send().await?;

        let status = response.status();
        debug!(target: "musicbrainz", "response status: {}", status);

        if self.check_status && !status.is_success() {
            if status == 404 {
                return Err(MusicBrainzError::NotFound(url.to_string()));
            }

            if status == 503 {
                return Err(MusicBrainzError::RateLimitExceeded);
            }

            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MusicBrainzError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        trace!(target: "musicbrainz", "response body: {}", body);

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(source) => Err(MusicBrainzError::Decode { source, body }),
        }
    }
}

impl Default for MusicBrainzClient {
    fn default() -> Self {
        // Default should be infallible; if building the configured client fails,
        // fall back to a basic reqwest client while keeping sensible defaults.
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        MusicBrainzClient {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            rate_limiter: None,
            request_timeout: None,
            check_status: false,
        }
    }
}

/// Builder for configuring a MusicBrainz client.
#[derive(Debug)]
pub struct MusicBrainzClientBuilder {
    base_url: String,
    user_agent: String,
    timeout: Duration,
    rate_limit_interval: Option<Duration>,
    check_status: bool,
}

impl Default for MusicBrainzClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            rate_limit_interval: None,
            check_status: false,
        }
    }
}

impl MusicBrainzClientBuilder {
    /// Seed a builder from loaded configuration.
    pub fn from_config(config: &MusicBrainzConfig) -> Self {
        let mut builder = Self::default()
            .base_url(config.base_url.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .rate_limit_interval(Duration::from_millis(config.rate_limit_interval_ms))
            .check_status(config.check_status);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        builder
    }

    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Minimum spacing between requests; zero disables pacing.
    pub fn rate_limit_interval(mut self, interval: Duration) -> Self {
        self.rate_limit_interval = Some(interval).filter(|interval| !interval.is_zero());
        self
    }

    /// Map 404, 503 and other non-2xx responses to errors instead of
    /// decoding whatever body came back.
    pub fn check_status(mut self, enabled: bool) -> Self {
        self.check_status = enabled;
        self
    }

    /// Build the MusicBrainz client.
    pub fn build(self) -> Result<MusicBrainzClient> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| MusicBrainzError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(MusicBrainzError::InvalidUrl(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(MusicBrainzError::ClientBuild)?;

        Ok(MusicBrainzClient {
            client,
            base_url: self.base_url,
            rate_limiter: self.rate_limit_interval.map(RateLimiter::new),
            request_timeout: None,
            check_status: self.check_status,
        })
    }
}
