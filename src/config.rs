use std::path::PathBuf;

use anyhow::Context;

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub appointments_url: String,
    pub reviews_url: String,
    pub public_dir: PathBuf,
    pub max_connections: u32,
    /// Origins allowed to call the API from a browser. Empty means same-origin only.
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    /// Builds the config from any variable source; missing keys take their defaults.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_owned());

        let port: u16 = or("PORT", "3000")
            .parse()
            .context("PORT must be a port number")?;
        let max_connections: u32 = or("DB_MAX_CONNECTIONS", "8")
            .parse()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?;
        anyhow::ensure!(max_connections > 0, "DB_MAX_CONNECTIONS must be a positive integer");

        let cors_origins = or("CORS_ORIGINS", "")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self {
            host: or("HOST", "0.0.0.0"),
            port,
            appointments_url: or("APPOINTMENTS_DATABASE_URL", "sqlite://appointments.db"),
            reviews_url: or("REVIEWS_DATABASE_URL", "sqlite://reviews.db"),
            public_dir: or("PUBLIC_DIR", "public").into(),
            max_connections,
            cors_origins,
        })
    }
}
