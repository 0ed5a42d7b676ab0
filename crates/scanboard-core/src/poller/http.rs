//! Status endpoint client

use super::StatusSource;
use crate::{CoreError, CoreResult, PollerConfig, ScanId, ScanStatusSnapshot};
use async_trait::async_trait;

/// Fetches `GET {base_url}{status_path}/{scan_id}`
pub struct HttpStatusSource {
    client: reqwest::Client,
    base_url: String,
    status_path: String,
}

impl HttpStatusSource {
    pub fn new(base_url: impl Into<String>, config: &PollerConfig) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, config)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        config: &PollerConfig,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            status_path: config.status_path.trim_matches('/').to_string(),
        }
    }

    pub fn status_url(&self, scan_id: &ScanId) -> String {
        format!("{}/{}/{}", self.base_url, self.status_path, scan_id)
    }
}

#[async_trait(?Send)]
impl StatusSource for HttpStatusSource {
    async fn fetch_status(&self, scan_id: &ScanId) -> CoreResult<ScanStatusSnapshot> {
        let url = self.status_url(scan_id);
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CoreError::UnexpectedStatus {
                scan_id: scan_id.clone(),
                code: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        ScanStatusSnapshot::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScanStatus;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single request with a canned response; returns the base URL
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
    }

    #[test]
    fn test_status_url() {
        let source = HttpStatusSource::new("http://localhost:5000", &PollerConfig::default());
        assert_eq!(
            source.status_url(&ScanId::new("42")),
            "http://localhost:5000/scan_status/42"
        );
    }

    #[test]
    fn test_status_url_normalizes_slashes() {
        let config = PollerConfig {
            status_path: "/api/scan_status/".to_string(),
            ..Default::default()
        };
        let source = HttpStatusSource::new("https://dash.example.com/", &config);
        assert_eq!(
            source.status_url(&ScanId::new("abc")),
            "https://dash.example.com/api/scan_status/abc"
        );
    }

    #[tokio::test]
    async fn test_server_error_is_poll_failure() {
        let base = serve_once(http_response("500 Internal Server Error", "")).await;
        let source = HttpStatusSource::new(base, &PollerConfig::default());

        match source.fetch_status(&ScanId::new("1")).await {
            Err(CoreError::UnexpectedStatus { scan_id, code }) => {
                assert_eq!(scan_id, ScanId::new("1"));
                assert_eq!(code, 500);
            }
            other => panic!("expected UnexpectedStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_poll_failure() {
        let base = serve_once(http_response("200 OK", "not json")).await;
        let source = HttpStatusSource::new(base, &PollerConfig::default());

        assert!(matches!(
            source.fetch_status(&ScanId::new("1")).await,
            Err(CoreError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_status_body_decoded() {
        let base = serve_once(http_response("200 OK", r#"{"id": 1, "status": "completed"}"#)).await;
        let source = HttpStatusSource::new(base, &PollerConfig::default());

        let snapshot = source.fetch_status(&ScanId::new("1")).await.unwrap();
        assert_eq!(snapshot.status, ScanStatus::Completed);
    }
}
