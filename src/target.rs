use url::Url;

use crate::error::FetchError;
use crate::transport::{HTTP_PORT, HTTPS_PORT};

/// URL scheme, reduced to the two transports this client speaks.
///
/// Anything that is not plain "http" is assumed to want the TLS port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// The port implied by the scheme; explicit ports in the URL are ignored.
    pub fn port(self) -> u16 {
        match self {
            Scheme::Http => HTTP_PORT,
            Scheme::Https => HTTPS_PORT,
        }
    }
}

/// The decomposed identity of one fetch: scheme, host and path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub scheme: Scheme,
    pub host: String,
    pub path: String,
}

impl RequestTarget {
    /// Port derived from the scheme alone.
    pub fn port(&self) -> u16 {
        self.scheme.port()
    }
}

/// Split a URL string into its scheme, host and path components.
///
/// A URL without a path yields "/". The query string is not carried into
/// the path; callers that need one embed it in the path they construct.
pub fn decompose(url: &str) -> Result<RequestTarget, FetchError> {
    let parsed = Url::parse(url)?;

    let scheme = if parsed.scheme() == "http" {
        Scheme::Http
    } else {
        Scheme::Https
    };

    let host = parsed
        .host_str()
        .ok_or_else(|| FetchError::MissingHost(url.to_string()))?
        .to_string();

    Ok(RequestTarget {
        scheme,
        host,
        path: parsed.path().to_string(),
    })
}
