use crate::error::FetchError;

/// One completed HTTP exchange: the raw header block and the decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// CRLF-joined header lines. The first line is the status line
    /// ("HTTP/<ver> <code> <reason>"); there is no terminating blank line.
    pub headers: String,

    /// Response body, already decoded as UTF-8. May be empty.
    pub body: String,
}

impl RawResponse {
    /// Create a response from an already-split header block and body.
    pub fn new(headers: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            headers: headers.into(),
            body: body.into(),
        }
    }

    /// The first line of the header block.
    pub fn status_line(&self) -> &str {
        self.headers.lines().next().unwrap_or("")
    }

    /// Numeric status code: the second whitespace-delimited token of the
    /// status line.
    pub fn status_code(&self) -> Result<u16, FetchError> {
        self.status_line()
            .split_whitespace()
            .nth(1)
            .and_then(|token| token.parse().ok())
            .ok_or_else(|| FetchError::BadStatusLine(self.status_line().to_string()))
    }

    /// Look up a header value by name, case-insensitively.
    ///
    /// Returns the first matching header with surrounding whitespace
    /// trimmed from the value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.trim().eq_ignore_ascii_case(name) {
                Some(value.trim())
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawResponse {
        RawResponse::new(
            "HTTP/1.1 301 Moved Permanently\r\nContent-Type: text/html\r\nlocation: https://example.com/new",
            "",
        )
    }

    #[test]
    fn test_status_code() {
        assert_eq!(sample().status_code().unwrap(), 301);

        let ok = RawResponse::new("HTTP/1.1 200 OK", "hello");
        assert_eq!(ok.status_code().unwrap(), 200);
    }

    #[test]
    fn test_status_code_unparseable() {
        let garbled = RawResponse::new("HTTP/1.1 abc OK", "");
        assert!(matches!(
            garbled.status_code(),
            Err(FetchError::BadStatusLine(_))
        ));

        let empty = RawResponse::new("", "");
        assert!(empty.status_code().is_err());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = sample();
        assert_eq!(response.header("Location"), Some("https://example.com/new"));
        assert_eq!(response.header("LOCATION"), Some("https://example.com/new"));
        assert_eq!(response.header("content-type"), Some("text/html"));
        assert_eq!(response.header("Set-Cookie"), None);
    }

    #[test]
    fn test_header_lookup_ignores_the_status_line() {
        let response = RawResponse::new("HTTP/1.1 200 OK\r\nHost: example.com", "");
        assert_eq!(response.header("Host"), Some("example.com"));
    }
}
