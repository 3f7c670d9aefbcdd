use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub landing: LandingConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

fn default_port() -> u16 {
    5000
}

fn default_host() -> String {
    "0.0.0.0".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// CSV file holding every stored result.
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> String {
    "speedtest_results.csv".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LandingConfig {
    /// Static test-runner page served verbatim at GET /.
    #[serde(default = "default_page_path")]
    pub page_path: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            page_path: default_page_path(),
        }
    }
}

fn default_page_path() -> String {
    "static/speedtest.html".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    /// Reverse proxies in front of us whose X-Forwarded-* values are believed. 0 = ignore them.
    #[serde(default = "default_trusted_hops")]
    pub trusted_hops: usize,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            trusted_hops: default_trusted_hops(),
        }
    }
}

fn default_trusted_hops() -> usize {
    1
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (default `config.toml`). A missing default file means built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        let explicit = std::env::var("CONFIG_FILE").ok();
        let path = explicit.clone().unwrap_or_else(|| "config.toml".into());
        if explicit.is_none() && !std::path::Path::new(&path).exists() {
            tracing::info!("No {} found, using default configuration", path);
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            !self.dataset.path.is_empty(),
            "dataset.path must be non-empty"
        );
        anyhow::ensure!(
            !self.landing.page_path.is_empty(),
            "landing.page_path must be non-empty"
        );
        Ok(())
    }
}
