use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_DATABASE_URL: &str = "alchemy.sqlite3";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MEDIA_ROOT: &str = "media";
const DEFAULT_POOL_SIZE: u32 = 8;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub media_root: PathBuf,
    pub pool_size: u32,
    /// Catalog seed imported at startup, if set.
    pub seed_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDR '{bind_addr}' is not a socket address"))?;

        let pool_size = match var("DB_POOL_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| anyhow::anyhow!("DB_POOL_SIZE '{raw}' must be a positive integer"))?,
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Config {
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_addr,
            media_root: var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MEDIA_ROOT)),
            pool_size,
            seed_file: var("SEED_FILE").map(PathBuf::from),
        })
    }
}
