use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_JQL: &str = "project = POSC AND Sprint = 5526 ORDER BY created DESC";
pub const DEFAULT_BOARD_ID: i64 = 506;
/// Link base used when neither `dashboard.browse_url` nor `jira.base_url` is set.
pub const DEFAULT_BROWSE_URL: &str = "https://linemanwongnai.atlassian.net";

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub jira: JiraConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct JiraConfig {
    pub base_url: Option<String>,
    pub email: Option<String>,
    pub api_token: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GatewayConfig {
    pub port: Option<u16>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct DashboardConfig {
    pub default_jql: Option<String>,
    pub board_id: Option<i64>,
    pub browse_url: Option<String>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub base_url: String,
    pub email: String,
    pub api_token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

impl JiraConfig {
    /// All three of base URL, email and token, or nothing.
    pub fn credentials(&self) -> Option<Credentials> {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        Some(Credentials {
            base_url: non_empty(&self.base_url)?.trim_end_matches('/').to_string(),
            email: non_empty(&self.email)?,
            api_token: non_empty(&self.api_token)?,
        })
    }
}

impl AppConfig {
    pub fn port(&self) -> u16 {
        self.gateway.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn gateway_url(&self) -> String {
        self.gateway
            .url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port()))
    }

    pub fn default_jql(&self) -> String {
        self.dashboard
            .default_jql
            .clone()
            .unwrap_or_else(|| DEFAULT_JQL.to_string())
    }

    pub fn board_id(&self) -> i64 {
        self.dashboard.board_id.unwrap_or(DEFAULT_BOARD_ID)
    }

    /// Base for issue and sprint links shown in the dashboard. Always an
    /// absolute `http(s)://` URL without a trailing slash.
    pub fn browse_base_url(&self) -> String {
        let base = self.configured_browse_url().unwrap_or(DEFAULT_BROWSE_URL);
        let base = base.trim().trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            base.to_string()
        } else {
            format!("https://{base}")
        }
    }

    /// The explicitly configured link base, if any.
    pub fn configured_browse_url(&self) -> Option<&str> {
        [&self.dashboard.browse_url, &self.jira.base_url]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .find(|v| !v.trim().trim_end_matches('/').is_empty())
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("JIRA_BASE_URL") {
            self.jira.base_url = Some(v);
        }
        if let Some(v) = lookup("JIRA_EMAIL") {
            self.jira.email = Some(v);
        }
        if let Some(v) = lookup("JIRA_API_TOKEN") {
            self.jira.api_token = Some(v);
        }
        if let Some(port) = lookup("PORT").and_then(|v| v.trim().parse().ok()) {
            self.gateway.port = Some(port);
        }
        if let Some(v) = lookup("SPRINTDESK_GATEWAY_URL") {
            self.gateway.url = Some(v);
        }
        if let Some(v) = lookup("SPRINTDESK_BROWSE_URL") {
            self.dashboard.browse_url = Some(v);
        }
    }
}

pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sprintdesk")
}

fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    let mut config = load_config_from(&config_path())?;
    config.apply_env(|key| std::env::var(key).ok().filter(|v| !v.is_empty()));
    Ok(config)
}

/// Read a config file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}
