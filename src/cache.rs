use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FetchError;
use crate::results::RawResponse;
use crate::utils::escape_component;

/// Separator between the header block and the body in a cache file.
const ENTRY_SEPARATOR: &str = "\n\n";

/// The identity a stored response is indexed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl CacheKey {
    pub fn new(host: impl Into<String>, port: u16, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            path: path.into(),
        }
    }

    /// Filesystem-safe file name for this key.
    ///
    /// Host and path are escaped component-wise, so distinct keys always
    /// map to distinct names; there is no hash involved and therefore no
    /// collision to mishandle.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.txt",
            escape_component(&self.host),
            self.port,
            escape_component(&self.path)
        )
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}{}", self.host, self.port, self.path)
    }
}

/// Disk-backed memo of fetched responses, mirrored in memory for the
/// lifetime of the process.
///
/// Entries are written once per key and never expire; a `put` for an
/// existing key overwrites it. One writer by construction: the whole
/// client is single-threaded.
pub struct ResponseCache {
    dir: PathBuf,
    memory: HashMap<CacheKey, RawResponse>,
}

impl ResponseCache {
    /// Create a cache rooted at `dir`. The directory itself is only
    /// created when the first entry is written.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            memory: HashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Look up a previously stored response.
    ///
    /// Checks the in-memory mirror first, then disk; a disk hit is loaded
    /// into the mirror. Unreadable or malformed entry files count as misses.
    pub fn get(&mut self, key: &CacheKey) -> Option<RawResponse> {
        if let Some(hit) = self.memory.get(key) {
            ::log::info!("serving {key} from the in-memory cache");
            return Some(hit.clone());
        }

        let path = self.entry_path(key);
        let contents = fs::read_to_string(&path).ok()?;
        let (headers, body) = contents.split_once(ENTRY_SEPARATOR)?;

        ::log::info!("serving {key} from {}", path.display());
        let response = RawResponse::new(headers, body);
        self.memory.insert(key.clone(), response.clone());
        Some(response)
    }

    /// Store a response under `key`, overwriting any previous entry.
    pub fn put(&mut self, key: &CacheKey, response: &RawResponse) -> Result<(), FetchError> {
        fs::create_dir_all(&self.dir).map_err(FetchError::Cache)?;

        let contents = format!("{}{ENTRY_SEPARATOR}{}", response.headers, response.body);
        fs::write(self.entry_path(key), contents).map_err(FetchError::Cache)?;
        ::log::debug!("cached {key} as {}", key.file_name());

        self.memory.insert(key.clone(), response.clone());
        Ok(())
    }
}
