use std::io;
use std::str::Utf8Error;

use thiserror::Error;

/// Everything that can go wrong between a URL string and a rendered page.
///
/// Status codes are deliberately absent: 4xx/5xx responses are valid
/// terminal content for this client, not failures.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The target (or a redirect Location) did not parse as a URL.
    #[error("malformed URL: {0}")]
    MalformedUrl(#[from] url::ParseError),

    /// The URL parsed but carries no host to connect to.
    #[error("URL has no host: {0}")]
    MissingHost(String),

    /// The host is not usable as a TLS server name.
    #[error("invalid TLS server name: {0}")]
    InvalidServerName(String),

    /// TCP connection establishment failed.
    #[error("connection failed: {0}")]
    Connect(#[source] io::Error),

    /// TLS session setup failed.
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    /// The socket died while writing the request or reading the response.
    #[error("socket I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The response payload is not valid UTF-8.
    #[error("response is not valid UTF-8: {0}")]
    Decode(#[from] Utf8Error),

    /// The response never contained the blank line ending the header block.
    #[error("response has no header/body separator")]
    MalformedResponse,

    /// The status line's second token did not parse as a status code.
    #[error("unreadable status line: {0:?}")]
    BadStatusLine(String),

    /// A 301/302 response without a Location header.
    #[error("redirect response carries no Location header")]
    MissingLocation,

    /// The redirect hop budget ran out before reaching a final response.
    #[error("redirect limit exhausted")]
    RedirectLimit,

    /// Reading or writing a cache file failed.
    #[error("cache file error: {0}")]
    Cache(#[source] io::Error),
}
