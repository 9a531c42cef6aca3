use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
}

impl Config {
    /// Read settings from the environment (after `.env`, if any, is loaded).
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("MEMALBUM_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("MEMALBUM_PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .context("Invalid MEMALBUM_PORT")?,
            db_path: std::env::var("MEMALBUM_DB_PATH")
                .unwrap_or_else(|_| "memalbum.db".into())
                .into(),
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}
