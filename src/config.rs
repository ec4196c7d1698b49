use crate::error::{Error, Result};
use directories::ProjectDirs;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
const SESSION_FILE_NAME: &str = "session.json";
const FALLBACK_SESSION_FILE: &str = ".superquiz-session.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub session_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let api_base_url = match env::var("SUPERQUIZ_API_URL") {
            Ok(raw) => parse_url("SUPERQUIZ_API_URL", &raw)?,
            Err(_) => parse_url("default API URL", DEFAULT_API_URL)?,
        };

        let session_file = env::var("SUPERQUIZ_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_file());

        Ok(Self {
            api_base_url,
            session_file,
        })
    }

    pub fn with_api_url(mut self, raw: &str) -> Result<Self> {
        self.api_base_url = parse_url("--api-url", raw)?;
        Ok(self)
    }

    pub fn with_session_file(mut self, path: PathBuf) -> Self {
        self.session_file = path;
        self
    }
}

pub fn parse_url(name: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!(
            "Invalid value for {}: {} cannot be used as a base URL",
            name, raw
        )));
    }
    Ok(url)
}

fn default_session_file() -> PathBuf {
    ProjectDirs::from("com", "superquiz", env!("CARGO_PKG_NAME"))
        .map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_SESSION_FILE))
}
