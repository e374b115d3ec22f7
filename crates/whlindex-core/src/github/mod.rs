//! Release listing over the GitHub REST API.
//!
//! Uses the curl crate (libcurl) for blocking GETs of
//! `/repos/{owner}/{repo}/releases`, one page at a time, until the API returns
//! an empty page or a request fails.

mod error;
mod models;
mod repo;

pub use error::FetchError;
pub use models::{Asset, Release};
pub use repo::{InvalidRepo, RepoId};

use anyhow::{Context, Result};
use curl::easy::{Easy, List};
use std::time::Duration;
use url::Url;

use crate::config::{HttpConfig, IndexConfig, Token};

/// Media type requested from the API.
pub const ACCEPT: &str = "application/vnd.github+json";

/// Blocking client for one repository's release listing.
#[derive(Debug, Clone)]
pub struct GithubClient {
    base: Url,
    repo: RepoId,
    per_page: u32,
    user_agent: String,
    token: Option<Token>,
    http: HttpConfig,
}

impl GithubClient {
    /// `api_base` must be an absolute http(s) URL such as `https://api.github.com`.
    pub fn new(api_base: &str, repo: RepoId, token: Option<Token>) -> Result<Self> {
        let base = Url::parse(api_base).with_context(|| format!("invalid API URL {api_base:?}"))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("API URL {api_base:?} is not an http(s) base URL");
        }
        Ok(Self {
            base,
            repo,
            per_page: 100,
            user_agent: concat!("whlindex/", env!("CARGO_PKG_VERSION")).to_string(),
            token,
            http: HttpConfig::default(),
        })
    }

    pub fn from_config(cfg: &IndexConfig) -> Result<Self> {
        let repo = RepoId::parse(&cfg.repo)?;
        let client = Self::new(&cfg.api_base, repo, cfg.token.clone())?
            .per_page(cfg.per_page)
            .user_agent(&cfg.user_agent)
            .http(cfg.http.clone());
        Ok(client)
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    /// `<base>/repos/<owner>/<name>/releases?page=<page>&per_page=<n>`.
    pub fn releases_url(&self, page: u32) -> Url {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", self.repo.owner(), self.repo.name(), "releases"]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &self.per_page.to_string());
        url
    }

    /// Fetches and decodes a single page of releases.
    pub fn fetch_page(&self, page: u32) -> Result<Vec<Release>, FetchError> {
        let url = self.releases_url(page);
        let body = self.get(url.as_str())?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { page, source })
    }

    /// Pages through the listing from page 1 until an empty page.
    ///
    /// A transport or HTTP failure stops pagination and returns what was
    /// gathered so far; only undecodable responses are returned as errors.
    pub fn fetch_all_releases(&self) -> Result<Vec<Release>, FetchError> {
        let mut releases = Vec::new();
        let mut page = 1u32;

        loop {
            let batch = match self.fetch_page(page) {
                Ok(batch) => batch,
                Err(e) if e.is_transient() => {
                    println!("Error fetching page {page}: {e}");
                    tracing::warn!(page, kept = releases.len(), "release listing stopped: {}", e);
                    break;
                }
                Err(e) => return Err(e),
            };

            if batch.is_empty() {
                tracing::debug!(page, "empty page, pagination complete");
                break;
            }

            println!("  Fetched page {} ({} releases)", page, batch.len());
            tracing::debug!(page, count = batch.len(), repo = %self.repo, "fetched release page");
            releases.extend(batch);
            page += 1;
        }

        Ok(releases)
    }

    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();

        let mut easy = Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.connect_timeout(Duration::from_secs(self.http.connect_timeout_secs))?;
        easy.timeout(Duration::from_secs(self.http.timeout_secs))?;
        easy.useragent(&self.user_agent)?;

        let mut list = List::new();
        list.append(&format!("Accept: {ACCEPT}"))?;
        if let Some(token) = &self.token {
            list.append(&format!("Authorization: Bearer {}", token.expose()))?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Http {
                status,
                url: url.to_string(),
            });
        }

        Ok(body)
    }
}
