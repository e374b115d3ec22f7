use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Repository whose releases are indexed when nothing else is configured.
pub const DEFAULT_REPO: &str = "mjun0812/flash-attention-prebuild-wheels";

/// HTTP client settings (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for a whole page request.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
        }
    }
}

/// Landing page text (optional `[site]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Heading and `<title>` of the landing page.
    pub title: String,
    /// Package name used in the install examples.
    pub package_hint: String,
    /// Upstream project the wheels are built from, linked from the landing page.
    pub upstream_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Flash Attention Pre-built Wheels".to_string(),
            package_hint: "flash-attn".to_string(),
            upstream_url: Some("https://github.com/Dao-AILab/flash-attention".to_string()),
        }
    }
}

/// API bearer token. Never serialized and redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wraps a raw token; empty or whitespace-only values are treated as absent.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Global configuration loaded from `~/.config/whlindex/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Source repository as `owner/name`.
    pub repo: String,
    /// Base URL of the REST API (no trailing path).
    pub api_base: String,
    /// Releases requested per page.
    pub per_page: u32,
    /// Root of the generated site; the simple index lands in `<output_dir>/simple`.
    pub output_dir: PathBuf,
    /// Environment variable holding the optional API token.
    pub token_env: String,
    /// `User-Agent` header sent with every API request.
    pub user_agent: String,
    pub http: HttpConfig,
    pub site: SiteConfig,
    /// Resolved at startup from `token_env`; see [`IndexConfig::with_token_from_env`].
    #[serde(skip)]
    pub token: Option<Token>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            repo: DEFAULT_REPO.to_string(),
            api_base: "https://api.github.com".to_string(),
            per_page: 100,
            output_dir: PathBuf::from("public"),
            token_env: "GITHUB_TOKEN".to_string(),
            user_agent: concat!("whlindex/", env!("CARGO_PKG_VERSION")).to_string(),
            http: HttpConfig::default(),
            site: SiteConfig::default(),
            token: None,
        }
    }
}

impl IndexConfig {
    /// Reads the token once from the configured environment variable.
    pub fn with_token_from_env(mut self) -> Self {
        self.token = std::env::var(&self.token_env).ok().and_then(Token::new);
        if self.token.is_some() {
            tracing::debug!(var = %self.token_env, "using API token from environment");
        }
        self
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("whlindex")?;
    Ok(xdg_dirs.get_config_home().join("whlindex").join("config.toml"))
}

/// Load configuration from the default location, falling back to built-in
/// defaults when no file exists or no config directory can be resolved.
/// Nothing is written to disk.
pub fn load_or_default() -> Result<IndexConfig> {
    load_or_default_at(config_path())
}

fn load_or_default_at(path: Result<PathBuf>) -> Result<IndexConfig> {
    let path = match path {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!("config path unavailable ({e:#}), using defaults");
            return Ok(IndexConfig::default());
        }
    };
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(IndexConfig::default());
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<IndexConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: IndexConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::info!("loaded config from {}", path.display());
    Ok(cfg)
}
