use crate::cache::{CacheKey, ResponseCache};
use crate::error::FetchError;
use crate::results::RawResponse;
use crate::target;
use crate::transport::Transport;

/// Statuses the engine follows instead of returning.
const REDIRECT_STATUSES: [u16; 2] = [301, 302];

/// Default redirect hop budget.
pub const DEFAULT_MAX_HOPS: u32 = 5;

/// Resolve `(host, port, path)` to a final response, following redirects
/// and consulting the cache.
///
/// The cache is checked before any network activity, so a cached entry is
/// returned even for a path that would redirect when fetched live. Every
/// non-redirect status is final here: 4xx/5xx bodies are cached and
/// returned like any other page.
///
/// Redirects recurse with the hop budget decremented and the port kept
/// from the current hop; when the chain bottoms out, the final response is
/// recorded under each key along the chain, so the original request
/// identity ends up storing the fully-resolved response.
pub fn resolve<T: Transport>(
    transport: &T,
    cache: &mut ResponseCache,
    host: &str,
    port: u16,
    path: &str,
    max_hops: u32,
) -> Result<RawResponse, FetchError> {
    if max_hops == 0 {
        return Err(FetchError::RedirectLimit);
    }

    let key = CacheKey::new(host, port, path);
    if let Some(hit) = cache.get(&key) {
        return Ok(hit);
    }

    let response = transport.fetch(host, port, path)?;
    let status = response.status_code()?;

    if REDIRECT_STATUSES.contains(&status) {
        let location = response.header("Location").ok_or(FetchError::MissingLocation)?;
        ::log::info!("{status} redirect from {key} to {location}");

        let next = target::decompose(location)?;
        let resolved = resolve(transport, cache, &next.host, port, &next.path, max_hops - 1)?;
        cache.put(&key, &resolved)?;
        return Ok(resolved);
    }

    cache.put(&key, &response)?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;
    use tempfile::tempdir;

    /// Transport double: canned responses keyed by (host, port, path),
    /// with a log of every fetch it served.
    struct ScriptedTransport {
        responses: HashMap<(String, u16, String), RawResponse>,
        calls: RefCell<Vec<(String, u16, String)>>,
    }

    impl ScriptedTransport {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn stub(mut self, host: &str, port: u16, path: &str, response: RawResponse) -> Self {
            self.responses
                .insert((host.to_string(), port, path.to_string()), response);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl Transport for ScriptedTransport {
        fn fetch(&self, host: &str, port: u16, path: &str) -> Result<RawResponse, FetchError> {
            let key = (host.to_string(), port, path.to_string());
            self.calls.borrow_mut().push(key.clone());
            self.responses.get(&key).cloned().ok_or_else(|| {
                FetchError::Connect(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    format!("no stub for {host}:{port}{path}"),
                ))
            })
        }
    }

    fn ok_response(body: &str) -> RawResponse {
        RawResponse::new("HTTP/1.1 200 OK\r\nContent-Type: text/html", body)
    }

    fn redirect_response(location: &str) -> RawResponse {
        RawResponse::new(
            format!("HTTP/1.1 301 Moved Permanently\r\nLocation: {location}"),
            "",
        )
    }

    #[test]
    fn test_plain_fetch_is_cached_and_idempotent() {
        let dir = tempdir().unwrap();
        let mut cache = ResponseCache::new(dir.path());
        let transport =
            ScriptedTransport::new().stub("example.com", 80, "/", ok_response("hello"));

        let first = resolve(&transport, &mut cache, "example.com", 80, "/", 5).unwrap();
        assert_eq!(first.body, "hello");
        assert_eq!(transport.call_count(), 1);

        // Second resolve must come from the cache with no socket activity.
        let second = resolve(&transport, &mut cache, "example.com", 80, "/", 5).unwrap();
        assert_eq!(second, first);
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_redirect_chain_is_followed_and_cached_under_the_original_key() {
        let dir = tempdir().unwrap();
        let mut cache = ResponseCache::new(dir.path());
        let transport = ScriptedTransport::new()
            .stub("a.example", 80, "/old", redirect_response("http://b.example/new"))
            .stub("b.example", 80, "/new", ok_response("landed"));

        let resolved = resolve(&transport, &mut cache, "a.example", 80, "/old", 5).unwrap();
        assert_eq!(resolved.body, "landed");
        assert_eq!(transport.call_count(), 2);

        // The original identity now stores the final response.
        let again = resolve(&transport, &mut cache, "a.example", 80, "/old", 5).unwrap();
        assert_eq!(again.body, "landed");
        assert_eq!(transport.call_count(), 2);
    }

    #[test]
    fn test_redirect_keeps_the_original_port() {
        let dir = tempdir().unwrap();
        let mut cache = ResponseCache::new(dir.path());
        // The Location names an https URL, but the next hop is issued on
        // the port the chain started on.
        let transport = ScriptedTransport::new()
            .stub("a.example", 80, "/", redirect_response("https://b.example/s"))
            .stub("b.example", 80, "/s", ok_response("kept port 80"));

        let resolved = resolve(&transport, &mut cache, "a.example", 80, "/", 5).unwrap();
        assert_eq!(resolved.body, "kept port 80");
        assert_eq!(
            transport.calls.borrow()[1],
            ("b.example".to_string(), 80, "/s".to_string())
        );
    }

    #[test]
    fn test_self_redirect_exhausts_the_hop_budget() {
        let dir = tempdir().unwrap();
        let mut cache = ResponseCache::new(dir.path());
        let transport = ScriptedTransport::new().stub(
            "loop.example",
            80,
            "/",
            redirect_response("http://loop.example/"),
        );

        let result = resolve(&transport, &mut cache, "loop.example", 80, "/", 5);
        assert!(matches!(result, Err(FetchError::RedirectLimit)));
        assert_eq!(transport.call_count(), 5);

        // Nothing along the failed chain was cached.
        let retry = resolve(&transport, &mut cache, "loop.example", 80, "/", 5);
        assert!(retry.is_err());
        assert_eq!(transport.call_count(), 10);
    }

    #[test]
    fn test_error_statuses_are_final_and_cached() {
        let dir = tempdir().unwrap();
        let mut cache = ResponseCache::new(dir.path());
        let transport = ScriptedTransport::new().stub(
            "example.com",
            80,
            "/missing",
            RawResponse::new("HTTP/1.1 404 Not Found", "nothing here"),
        );

        let resolved = resolve(&transport, &mut cache, "example.com", 80, "/missing", 5).unwrap();
        assert_eq!(resolved.status_code().unwrap(), 404);

        resolve(&transport, &mut cache, "example.com", 80, "/missing", 5).unwrap();
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_location_lookup_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let mut cache = ResponseCache::new(dir.path());
        let transport = ScriptedTransport::new()
            .stub(
                "a.example",
                80,
                "/",
                RawResponse::new("HTTP/1.1 302 Found\r\nlocation: http://b.example/", ""),
            )
            .stub("b.example", 80, "/", ok_response("found it"));

        let resolved = resolve(&transport, &mut cache, "a.example", 80, "/", 5).unwrap();
        assert_eq!(resolved.body, "found it");
    }

    #[test]
    fn test_redirect_without_location_is_an_error() {
        let dir = tempdir().unwrap();
        let mut cache = ResponseCache::new(dir.path());
        let transport = ScriptedTransport::new().stub(
            "a.example",
            80,
            "/",
            RawResponse::new("HTTP/1.1 301 Moved Permanently", ""),
        );

        let result = resolve(&transport, &mut cache, "a.example", 80, "/", 5);
        assert!(matches!(result, Err(FetchError::MissingLocation)));
    }

    #[test]
    fn test_cached_entries_bypass_redirect_handling() {
        let dir = tempdir().unwrap();
        let mut cache = ResponseCache::new(dir.path());

        // Seed the cache with a redirect response under this key; resolve
        // must return it as-is instead of chasing the Location.
        let stored = redirect_response("http://elsewhere.example/");
        cache
            .put(&CacheKey::new("a.example", 80, "/"), &stored)
            .unwrap();

        let transport = ScriptedTransport::new();
        let resolved = resolve(&transport, &mut cache, "a.example", 80, "/", 5).unwrap();
        assert_eq!(resolved, stored);
        assert_eq!(transport.call_count(), 0);
    }
}
