// Re-export modules
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod parsers;
pub mod results;
pub mod target;
pub mod transport;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ClientConfig;
pub use error::FetchError;
pub use results::RawResponse;

use std::error::Error;
use std::path::Path;

use crate::cache::ResponseCache;
use crate::parsers::{ExtractMode, Parser};
use crate::transport::{HTTPS_PORT, TcpTransport};

/// High-level client tying the pipeline together: URL decomposition,
/// transport, redirect resolution, the response cache and content
/// extraction.
///
/// Fully synchronous: one request is in flight at a time and each call
/// blocks until the peer closes the connection.
pub struct Client {
    config: ClientConfig,
    cache: ResponseCache,
    transport: TcpTransport,
}

impl Client {
    /// Create a client with default configuration.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client from an explicit configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            cache: ResponseCache::new(&config.cache_dir),
            transport: TcpTransport::new(&config.user_agent),
            config,
        }
    }

    /// Create a client configured from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        Ok(Self::with_config(ClientConfig::from_file(path)?))
    }

    /// Override the cache directory.
    pub fn with_cache_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.cache_dir = dir.into();
        self.cache = ResponseCache::new(&self.config.cache_dir);
        self
    }

    /// Override the redirect hop budget.
    pub fn with_max_hops(mut self, max_hops: u32) -> Self {
        self.config.max_hops = max_hops;
        self
    }

    /// Fetch a URL and return the final raw response, following redirects
    /// and consulting the cache.
    pub fn fetch(&mut self, url: &str) -> Result<RawResponse, FetchError> {
        let target = target::decompose(url)?;
        ::log::info!("fetching {url}");

        engine::resolve(
            &self.transport,
            &mut self.cache,
            &target.host,
            target.port(),
            &target.path,
            self.config.max_hops,
        )
    }

    /// Fetch a URL and render its body as plain text.
    pub fn fetch_page(&mut self, url: &str) -> Result<String, FetchError> {
        let response = self.fetch(url)?;
        Ok(Parser::parse(&response.body, ExtractMode::PageText).content)
    }

    /// Run a web search and return up to the top ten result links.
    ///
    /// Terms are joined with '+' and appended to the configured search
    /// path; the request always goes to the search host on the TLS port.
    pub fn search(&mut self, terms: &[String]) -> Result<Vec<String>, FetchError> {
        let query = terms.join("+");
        let path = format!("{}{query}", self.config.search_path);
        let host = self.config.search_host.clone();
        ::log::info!("searching for {query:?} via {host}");

        let response = engine::resolve(
            &self.transport,
            &mut self.cache,
            &host,
            HTTPS_PORT,
            &path,
            self.config.max_hops,
        )?;

        Ok(Parser::parse(&response.body, ExtractMode::ResultLinks).links)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
