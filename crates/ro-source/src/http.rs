//! Fetching the running-order page over HTTP.

use std::time::Duration;

use crate::error::SourceError;
use crate::plan::DayPlan;
use crate::source::HtmlDocument;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Running-order page of the 2025 edition.
pub const DEFAULT_URL: &str = "https://www.summer-breeze.de/en/running-order/";

const USER_AGENT: &str = concat!("ro/", env!("CARGO_PKG_VERSION"));

/// HTTP source for the running-order page.
///
/// Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    url: String,
}

impl HttpSource {
    /// Creates a source for `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is blank or the HTTP client fails to build.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(SourceError::InvalidUrl {
                reason: "URL cannot be empty",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(SourceError::ClientBuild)?;

        Ok(Self { http, url })
    }

    /// Creates a source that reuses an existing client.
    pub fn with_client(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Downloads the page body.
    pub async fn fetch(&self) -> Result<String, SourceError> {
        tracing::debug!(url = %self.url, "fetching running order");
        let response = self.http.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), "fetched running order");
        Ok(body)
    }

    /// Downloads the page and wraps it as a table source.
    pub async fn fetch_document(&self, plan: DayPlan) -> Result<HtmlDocument, SourceError> {
        let html = self.fetch().await?;
        Ok(HtmlDocument::new(html, plan))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;
    use crate::source::RawTableSource;

    /// Serves a single HTTP response on a local port.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{addr}/en/running-order/")
    }

    fn local_source(url: String) -> HttpSource {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpSource::with_client(http, url)
    }

    #[test]
    fn rejects_blank_url() {
        let err = HttpSource::new("  ", DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, SourceError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn fetches_page_into_document() {
        let url = serve_once(
            "200 OK",
            "<table><tr><th>Main Stage</th></tr><tr><td>20:00  21:00</td><td>Kreator</td></tr></table>",
        );
        let source = local_source(url);
        let document = source.fetch_document(DayPlan::default()).await.unwrap();

        let tables = document.raw_tables().unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows[0].performer_text, "Kreator");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let url = serve_once("503 Service Unavailable", "maintenance");
        let source = local_source(url.clone());
        let err = source.fetch().await.unwrap_err();
        match err {
            SourceError::Status { url: failed, status } => {
                assert_eq!(status, 503);
                assert_eq!(failed, url);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
