use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
    pub static_config: StaticConfig,
    pub fonts: FontsConfig,
    pub indexnow: IndexNowConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" => Ok(Environment::Development),
            other => Err(format!("unknown environment: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public origin, e.g. `https://arabiccalligraphygenerator.com`.
    pub url: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    pub enabled: bool,
    pub web_root: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    /// Origin of individual font files (`{asset_base_url}/fonts/{key}`).
    pub asset_base_url: String,
    /// Origin of downloadable font archives (`{download_base_url}/{file}`).
    pub download_base_url: String,
    /// Local mirror of loaded fonts, served under `/fonts`.
    pub cache_dir: String,
    /// How long a caller waits for a font load (default: 3s)
    #[serde(deserialize_with = "deserialize_duration_ms")]
    pub load_timeout_ms: u64,
    /// Font keys that may be loaded through the API.
    pub catalog: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexNowConfig {
    pub enabled: bool,
    pub key: String,
    pub engines: Vec<SearchEngineConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SearchEngineConfig {
    pub name: String,
    pub endpoint: String,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from config.toml file (explicit path or the usual locations)
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load(explicit_path: Option<&str>) -> Result<Self, anyhow::Error> {
        // 1. Load from config file
        let mut config = match explicit_path {
            Some(path) => Self::from_toml(path)?,
            None => match Self::find_config_file() {
                Some(config_path) => Self::from_toml(&config_path)?,
                None => {
                    tracing::warn!("Configuration file not found, using defaults");
                    Config::default()
                },
            },
        };

        // 2. Override with environment variables
        config.apply_env_overrides()?;

        // 3. Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_SITE_URL: Public site origin
    /// - APP_ENVIRONMENT: production | development
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,calligraphy_site=debug")
    /// - APP_FONTS_ASSET_BASE_URL: Font file host
    /// - APP_FONTS_DOWNLOAD_BASE_URL: Font archive host
    /// - APP_FONTS_LOAD_TIMEOUT: Font load wait (accepts "3s", "500ms")
    /// - APP_INDEXNOW_KEY: IndexNow key
    /// - APP_INDEXNOW_ENABLED: Enable/disable IndexNow submission (true/false)
    ///
    /// A variable that is set but cannot be parsed is an error.
    fn apply_env_overrides(&mut self) -> Result<(), anyhow::Error> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), anyhow::Error> {
        if let Some(host) = var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Some(port) = var("APP_SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid APP_SERVER_PORT '{}': {}", port, e))?;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Some(url) = var("APP_SITE_URL") {
            self.site.url = url;
            tracing::info!("Override site.url from env: {}", self.site.url);
        }

        if let Some(env) = var("APP_ENVIRONMENT") {
            self.site.environment = env
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid APP_ENVIRONMENT '{}': {}", env, e))?;
            tracing::info!("Override site.environment from env: {:?}", self.site.environment);
        }

        if let Some(level) = var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Some(url) = var("APP_FONTS_ASSET_BASE_URL") {
            self.fonts.asset_base_url = url;
            tracing::info!("Override fonts.asset_base_url from env: {}", self.fonts.asset_base_url);
        }

        if let Some(url) = var("APP_FONTS_DOWNLOAD_BASE_URL") {
            self.fonts.download_base_url = url;
            tracing::info!(
                "Override fonts.download_base_url from env: {}",
                self.fonts.download_base_url
            );
        }

        if let Some(timeout) = var("APP_FONTS_LOAD_TIMEOUT") {
            self.fonts.load_timeout_ms = parse_duration_to_ms(&timeout).map_err(|e| {
                anyhow::anyhow!("Invalid APP_FONTS_LOAD_TIMEOUT '{}': {}", timeout, e)
            })?;
            tracing::info!(
                "Override fonts.load_timeout_ms from env: {}",
                self.fonts.load_timeout_ms
            );
        }

        if let Some(key) = var("APP_INDEXNOW_KEY") {
            self.indexnow.key = key;
            tracing::info!("Override indexnow.key from env");
        }

        if let Some(enabled) = var("APP_INDEXNOW_ENABLED") {
            self.indexnow.enabled = enabled.parse().map_err(|e| {
                anyhow::anyhow!("Invalid APP_INDEXNOW_ENABLED '{}': {}", enabled, e)
            })?;
            tracing::info!("Override indexnow.enabled from env: {}", self.indexnow.enabled);
        }

        Ok(())
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        // Validate server port
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        let site_url = self.site_url()?;
        if site_url.host_str().is_none() {
            anyhow::bail!("site.url must include a host");
        }

        if self.fonts.asset_base_url.trim().is_empty() {
            anyhow::bail!("fonts.asset_base_url cannot be empty");
        }
        if self.fonts.download_base_url.trim().is_empty() {
            anyhow::bail!("fonts.download_base_url cannot be empty");
        }
        if self.fonts.load_timeout_ms == 0 {
            anyhow::bail!("fonts.load_timeout_ms must be > 0");
        }
        if let Some(bad) = self.fonts.catalog.iter().find(|k| k.contains('/') || k.contains("..")) {
            anyhow::bail!("fonts.catalog entry '{}' must be a plain file name", bad);
        }

        if self.indexnow.enabled {
            if self.indexnow.key.trim().is_empty() {
                anyhow::bail!("indexnow.key is required when indexnow.enabled = true");
            }
            if self.indexnow.engines.is_empty() {
                anyhow::bail!("indexnow.engines cannot be empty when indexnow is enabled");
            }
        }

        if !self.site.environment.is_production() {
            tracing::warn!("Running in development mode: locale cookies are not marked Secure");
        }

        Ok(())
    }

    /// Parsed `site.url`.
    pub fn site_url(&self) -> Result<Url, anyhow::Error> {
        if self.site.url.trim().is_empty() {
            anyhow::bail!("site.url cannot be empty");
        }
        Url::parse(self.site.url.trim())
            .map_err(|e| anyhow::anyhow!("Invalid site.url '{}': {}", self.site.url, e))
    }

    pub fn font_load_timeout(&self) -> Duration {
        Duration::from_millis(self.fonts.load_timeout_ms)
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, anyhow::Error> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://arabiccalligraphygenerator.com".to_string(),
            environment: Environment::Development,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,calligraphy_site=debug".to_string(),
            file: Some("logs/calligraphy-site.log".to_string()),
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self { enabled: true, web_root: "web".to_string() }
    }
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            asset_base_url: "https://assets.arabiccalligraphygenerator.com".to_string(),
            download_base_url: "https://assets.arabiccalligraphygenerator.com/downloads"
                .to_string(),
            cache_dir: "data/fonts".to_string(),
            load_timeout_ms: 3000,
            catalog: vec![
                "Amiri-Regular.ttf".to_string(),
                "ReemKufi-Regular.ttf".to_string(),
                "Lateef-Regular.ttf".to_string(),
                "ScheherazadeNew-Regular.ttf".to_string(),
                "ArefRuqaa-Regular.ttf".to_string(),
            ],
        }
    }
}

impl Default for IndexNowConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            key: String::new(),
            engines: vec![
                SearchEngineConfig {
                    name: "indexnow".to_string(),
                    endpoint: "https://api.indexnow.org/indexnow".to_string(),
                },
                SearchEngineConfig {
                    name: "bing".to_string(),
                    endpoint: "https://www.bing.com/indexnow".to_string(),
                },
                SearchEngineConfig {
                    name: "yandex".to_string(),
                    endpoint: "https://yandex.com/indexnow".to_string(),
                },
            ],
        }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_duration_to_ms(input: &str) -> Result<u64, String> {
    // Accept plain numbers (treated as milliseconds)
    if let Ok(val) = input.trim().parse::<u64>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    match unit.trim() {
        "ms" | "millis" | "milliseconds" => Ok(n),
        "s" | "sec" | "secs" | "second" | "seconds" => Ok(n * 1000),
        "m" | "min" | "mins" | "minute" | "minutes" => Ok(n * 60 * 1000),
        other => Err(format!("unsupported unit: {}", other)),
    }
}

// Custom serde deserializer to support numeric or human-friendly string values
fn deserialize_duration_ms<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = u64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of milliseconds or a string like '500ms', '3s'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v)
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if v >= 0 { Ok(v as u64) } else { Err(E::custom("negative not allowed")) }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_ms(v).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}
