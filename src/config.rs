use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::engine::DEFAULT_MAX_HOPS;

/// Configuration for the HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Directory fetched responses are persisted under
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// How many redirect hops to follow before giving up
    #[serde(default = "default_max_hops")]
    pub max_hops: u32,

    /// Host of the search provider
    #[serde(default = "default_search_host")]
    pub search_host: String,

    /// Path prefix that joined search terms are appended to
    #[serde(default = "default_search_path")]
    pub search_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            user_agent: default_user_agent(),
            max_hops: default_max_hops(),
            search_host: default_search_host(),
            search_path: default_search_path(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Default directory for cached responses
fn default_cache_dir() -> String {
    "cached_responses".to_string()
}

/// Default User-Agent string
fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64; rv:123.0) Gecko/20100101 Firefox/123.0".to_string()
}

/// Default redirect hop budget
fn default_max_hops() -> u32 {
    DEFAULT_MAX_HOPS
}

/// Default search provider host
fn default_search_host() -> String {
    "www.google.com".to_string()
}

/// Default search path prefix
fn default_search_path() -> String {
    "/search?q=".to_string()
}
