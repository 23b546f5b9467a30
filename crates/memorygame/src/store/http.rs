//! Remote REST document store.
//!
//! Documents live at `{base_url}/{collection}/{id}`. `GET` returns the JSON
//! document or 404, `PUT` stores the JSON request body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::DocumentStore;
use crate::error::{Error, Result};

/// Document store reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpDocumentStore {
    /// Create a client for the store at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` cannot hold path segments or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| Error::ConfigValidation {
            message: format!("invalid base_url '{base_url}': {e}"),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::ConfigValidation {
                message: format!("base_url '{base_url}' cannot hold document paths"),
            });
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// URL of a single document. Segments are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot hold path segments.
    pub fn document_url(&self, collection: &str, id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::internal("base_url cannot hold path segments"))?
            .pop_if_empty()
            .push(collection)
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<serde_json::Value>> {
        let url = self.document_url(collection, id)?;
        debug!("GET {}", url);

        let response = self.authorize(self.client.get(url.clone())).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(Error::RemoteStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }

    async fn put(&self, collection: &str, id: &str, document: &serde_json::Value) -> Result<()> {
        let url = self.document_url(collection, id)?;
        debug!("PUT {}", url);

        let response = self
            .authorize(self.client.put(url.clone()).json(document))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::RemoteStatus {
                status: status.as_u16(),
                url: url.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned response and hand back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
                    let content_length = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}/v1"), handle)
    }

    fn store(base_url: &str, api_key: Option<&str>) -> HttpDocumentStore {
        HttpDocumentStore::new(
            base_url,
            api_key.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_document_url() {
        let store = store("http://localhost:8080/v1", None);
        let url = store.document_url("games", "beach").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v1/games/beach");
    }

    #[test]
    fn test_document_url_trailing_slash_and_escaping() {
        let store = store("http://localhost:8080/v1/", None);
        let url = store.document_url("games", "my game/1").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v1/games/my%20game%2F1");
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let result = HttpDocumentStore::new("not a url", None, Duration::from_secs(1));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));

        let result = HttpDocumentStore::new("mailto:someone", None, Duration::from_secs(1));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[tokio::test]
    async fn test_get_document() {
        let (base_url, server) = serve_once("200 OK", r#"{"images":["a","b"]}"#).await;
        let store = store(&base_url, Some("secret"));

        let doc = store.get("games", "beach").await.unwrap();
        assert_eq!(doc, Some(json!({ "images": ["a", "b"] })));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /v1/games/beach HTTP/1.1"));
        assert!(request.to_lowercase().contains("authorization: bearer secret"));
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let (base_url, server) = serve_once("404 Not Found", "{}").await;
        let store = store(&base_url, None);

        assert!(store.get("games", "nothing").await.unwrap().is_none());
        let request = server.await.unwrap();
        assert!(!request.to_lowercase().contains("authorization"));
    }

    #[tokio::test]
    async fn test_get_server_error() {
        let (base_url, server) = serve_once("500 Internal Server Error", "{}").await;
        let store = store(&base_url, None);

        let err = store.get("games", "beach").await.unwrap_err();
        assert!(matches!(err, Error::RemoteStatus { status: 500, .. }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_put_document() {
        let (base_url, server) = serve_once("200 OK", "{}").await;
        let store = store(&base_url, None);

        store
            .put("games", "garden", &json!({ "images": ["x"] }))
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("PUT /v1/games/garden HTTP/1.1"));
        assert!(request.contains(r#"{"images":["x"]}"#));
    }

    #[tokio::test]
    async fn test_put_rejected() {
        let (base_url, server) = serve_once("403 Forbidden", "{}").await;
        let store = store(&base_url, None);

        let err = store
            .put("games", "garden", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RemoteStatus { status: 403, .. }));
        server.await.unwrap();
    }
}
