//! Executes `HttpRequest` values over the network.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
///
/// Non-2xx statuses are data, not errors: only failures that leave no
/// response behind map to `ApiError::Transport`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a ureq agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => decorate(self.agent.get(url), &request).call(),
            HttpMethod::Post => send(decorate(self.agent.post(url), &request), &request),
            HttpMethod::Put => send(decorate(self.agent.put(url), &request), &request),
            HttpMethod::Delete => send(
                decorate(self.agent.delete(url), &request).force_send_body(),
                &request,
            ),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

fn decorate<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    builder
}

fn send(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match &request.body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    use super::*;

    /// Accept one connection, answer 204 and hand back the raw request.
    fn serve_once() -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 1024];
            let head_end = loop {
                let n = stream.read(&mut chunk).unwrap();
                assert!(n > 0, "connection closed before headers");
                raw.extend_from_slice(&chunk[..n]);
                if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&raw[..head_end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map(|value| value.trim().parse::<usize>().unwrap())
                .unwrap_or(0);
            while raw.len() < head_end + length {
                let n = stream.read(&mut chunk).unwrap();
                assert!(n > 0, "connection closed before body");
                raw.extend_from_slice(&chunk[..n]);
            }
            stream
                .write_all(b"HTTP/1.1 204 No Content\r\nconnection: close\r\n\r\n")
                .unwrap();
            String::from_utf8(raw).unwrap()
        });
        (base, handle)
    }

    fn delete(url: String, body: Option<&str>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url,
            query: Vec::new(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn delete_sends_json_body() {
        let (base, server) = serve_once();
        let body = r#"{"isbn":"9781449325862","userId":"u1"}"#;
        let response = UreqTransport::new()
            .execute(delete(format!("{base}/BookStore/v1/Book"), Some(body)))
            .unwrap();

        assert_eq!(response.status, 204);
        let raw = server.join().unwrap();
        assert!(raw.starts_with("DELETE /BookStore/v1/Book HTTP/1.1"));
        assert!(raw.ends_with(body));
    }

    #[test]
    fn delete_without_body_still_completes() {
        let (base, server) = serve_once();
        let response = UreqTransport::new()
            .execute(delete(format!("{base}/BookStore/v1/Books"), None))
            .unwrap();

        assert_eq!(response.status, 204);
        assert!(response.body.is_empty());
        let raw = server.join().unwrap();
        assert!(raw.starts_with("DELETE /BookStore/v1/Books HTTP/1.1"));
        assert!(raw.ends_with("\r\n\r\n"));
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = UreqTransport::new()
            .execute(delete(format!("http://{addr}/BookStore/v1/Book"), None))
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
