use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};

use crate::error::FetchError;
use crate::results::RawResponse;

pub const HTTP_PORT: u16 = 80;
pub const HTTPS_PORT: u16 = 443;

const RECV_CHUNK: usize = 4096;

/// The seam between the request engine and the network.
///
/// One call is one complete HTTP exchange. Tests drive the engine through
/// a scripted implementation of this trait instead of real sockets.
pub trait Transport {
    fn fetch(&self, host: &str, port: u16, path: &str) -> Result<RawResponse, FetchError>;
}

/// Blocking TCP transport; requests to the HTTPS port are wrapped in TLS.
///
/// There is deliberately no connect or read timeout: the exchange relies on
/// the peer honoring `Connection: close`, and a server that keeps the
/// connection open blocks the calling thread until it gives up.
pub struct TcpTransport {
    user_agent: String,
}

impl TcpTransport {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    /// The single fixed-shape HTTP/1.1 request this client ever sends.
    fn request_bytes(&self, host: &str, path: &str) -> Vec<u8> {
        format!(
            "GET {path} HTTP/1.1\r\n\
             Host: {host}\r\n\
             Connection: close\r\n\
             User-Agent: {}\r\n\
             Accept: */*\r\n\
             \r\n",
            self.user_agent
        )
        .into_bytes()
    }

    /// Write the request and read the response until the peer closes.
    fn exchange<S: Read + Write>(
        &self,
        stream: &mut S,
        host: &str,
        path: &str,
    ) -> Result<Vec<u8>, FetchError> {
        stream.write_all(&self.request_bytes(host, path))?;
        stream.flush()?;

        let mut response = Vec::new();
        let mut chunk = [0u8; RECV_CHUNK];
        loop {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => response.extend_from_slice(&chunk[..n]),
                // TLS peers that drop the link without close_notify surface
                // as UnexpectedEof; end-of-stream is still the only framing.
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(FetchError::Io(e)),
            }
        }
        Ok(response)
    }
}

impl Transport for TcpTransport {
    fn fetch(&self, host: &str, port: u16, path: &str) -> Result<RawResponse, FetchError> {
        ::log::debug!("GET {host}:{port}{path}");

        let sock = TcpStream::connect((host, port)).map_err(FetchError::Connect)?;

        let raw = if port == HTTPS_PORT {
            let connection = ClientConnection::new(tls_config(), server_name(host)?)?;
            let mut stream = StreamOwned::new(connection, sock);
            self.exchange(&mut stream, host, path)?
        } else {
            let mut stream = sock;
            self.exchange(&mut stream, host, path)?
        };

        ::log::debug!("received {} bytes from {host}:{port}", raw.len());
        split_response(&raw)
    }
}

/// TLS client configuration: webpki trust anchors, no client auth.
fn tls_config() -> Arc<ClientConfig> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    Arc::new(
        ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth(),
    )
}

fn server_name(host: &str) -> Result<ServerName<'static>, FetchError> {
    ServerName::try_from(host.to_string())
        .map_err(|_| FetchError::InvalidServerName(host.to_string()))
}

/// Decode the accumulated bytes and split them on the first blank line
/// into header block and body.
fn split_response(raw: &[u8]) -> Result<RawResponse, FetchError> {
    let text = std::str::from_utf8(raw)?;
    let (headers, body) = text
        .split_once("\r\n\r\n")
        .ok_or(FetchError::MalformedResponse)?;
    Ok(RawResponse::new(headers, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_has_the_fixed_header_set() {
        let transport = TcpTransport::new("test-agent/1.0");
        let request = String::from_utf8(transport.request_bytes("example.com", "/index")).unwrap();

        assert!(request.starts_with("GET /index HTTP/1.1\r\n"));
        assert!(request.contains("Host: example.com\r\n"));
        assert!(request.contains("Connection: close\r\n"));
        assert!(request.contains("User-Agent: test-agent/1.0\r\n"));
        assert!(request.contains("Accept: */*\r\n"));
        assert!(request.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_split_response_on_first_blank_line() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n<html>\r\n\r\n</html>";
        let response = split_response(raw).unwrap();
        assert_eq!(
            response.headers,
            "HTTP/1.1 200 OK\r\nContent-Type: text/html"
        );
        // Later blank lines belong to the body.
        assert_eq!(response.body, "<html>\r\n\r\n</html>");
    }

    #[test]
    fn test_split_response_with_empty_body() {
        let raw = b"HTTP/1.1 204 No Content\r\n\r\n";
        let response = split_response(raw).unwrap();
        assert_eq!(response.status_code().unwrap(), 204);
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_response_without_separator_is_malformed() {
        assert!(matches!(
            split_response(b"HTTP/1.1 200 OK\r\n"),
            Err(FetchError::MalformedResponse)
        ));
    }

    #[test]
    fn test_non_utf8_response_is_a_decode_failure() {
        let raw = b"HTTP/1.1 200 OK\r\n\r\n\xff\xfe";
        assert!(matches!(split_response(raw), Err(FetchError::Decode(_))));
    }
}
