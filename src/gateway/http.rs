//! HTTP implementation of the catalog gateway

use super::error::GatewayError;
use super::payload::{AbilityPayload, IndexPayload, RecordPayload};
use super::{CatalogGateway, DetailPayload};
use crate::catalog::{Ability, CatalogRecord, RecordId, RecordSummary};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Default provider endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Gateway over a PokeAPI-compatible REST service
///
/// No request timeout is configured: a request that never answers stalls the
/// caller. This is a known limitation.
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    /// Create a gateway rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidUrl` if `base_url` is not an absolute URL,
    /// or `GatewayError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(concat!("dexr/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(base_url, client)
    }

    /// Create a gateway rooted at `base_url` that sends through `client`
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidUrl` if `base_url` is not an absolute URL.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, GatewayError> {
        // Url::join drops the last path segment unless it ends with a slash
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the catalog index limited to `limit` entries
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidUrl` if the URL cannot be built.
    pub fn index_url(&self, limit: usize) -> Result<Url, GatewayError> {
        let mut url = self.base_url.join("pokemon")?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        Ok(url)
    }

    /// URL of the record with `id`
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidUrl` if the URL cannot be built.
    pub fn record_url(&self, id: RecordId) -> Result<Url, GatewayError> {
        Ok(self.base_url.join(&format!("pokemon/{id}"))?)
    }

    fn resolve(&self, url_or_id: &str) -> Result<Url, GatewayError> {
        match url_or_id.trim().parse::<RecordId>() {
            Ok(id) => self.record_url(id),
            Err(_) => Ok(Url::parse(url_or_id)?),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GatewayError> {
        tracing::trace!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(GatewayError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| GatewayError::Parse(format!("{url}: {e}")))
    }
}

#[async_trait(?Send)]
impl CatalogGateway for HttpGateway {
    async fn list_summaries(&self, limit: usize) -> Result<Vec<RecordSummary>, GatewayError> {
        let index: IndexPayload = self.get_json(self.index_url(limit)?).await?;
        Ok(index.into())
    }

    async fn fetch_record(&self, url_or_id: &str) -> Result<CatalogRecord, GatewayError> {
        let payload: RecordPayload = self.get_json(self.resolve(url_or_id)?).await?;
        Ok(payload.to_record())
    }

    async fn fetch_detail(&self, id: RecordId) -> Result<DetailPayload, GatewayError> {
        let payload: RecordPayload = self.get_json(self.record_url(id)?).await?;
        Ok(DetailPayload {
            record: payload.to_record(),
            stats: payload.to_stats(),
            abilities: payload.to_ability_refs(),
        })
    }

    async fn fetch_ability(&self, url: &str) -> Result<Ability, GatewayError> {
        let payload: AbilityPayload = self.get_json(Url::parse(url)?).await?;
        Ok(payload.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer one request on a local port with `status` and `body`
    ///
    /// Returns the base URL of the server.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}/api/v2")
    }

    async fn local_gateway(status: &'static str, body: &'static str) -> HttpGateway {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpGateway::with_client(&serve_once(status, body).await, client).unwrap()
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let gateway = local_gateway("404 Not Found", r#"{"detail":"Not found."}"#).await;
        let result = gateway.fetch_detail(9999).await;
        assert!(matches!(result, Err(GatewayError::NotFound(url)) if url.ends_with("/pokemon/9999")));
    }

    #[tokio::test]
    async fn test_server_error_keeps_status() {
        let gateway = local_gateway("503 Service Unavailable", "{}").await;
        let result = gateway.list_summaries(151).await;
        assert!(matches!(result, Err(GatewayError::Status { status: 503, .. })));
        assert!(result.unwrap_err().is_network());
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let gateway = local_gateway("200 OK", r#"{"garbage""#).await;
        let result = gateway.fetch_record("25").await;
        assert!(matches!(result, Err(GatewayError::Parse(_))));
    }

    #[tokio::test]
    async fn test_record_with_unknown_fields_loads() {
        let gateway = local_gateway(
            "200 OK",
            r#"{"id":25,"name":"pikachu","height":4,"types":[{"slot":1,"type":{"name":"electric","url":""}}]}"#,
        )
        .await;

        let record = gateway.fetch_record("25").await.unwrap();
        assert_eq!(record.id, 25);
        assert_eq!(record.name, "pikachu");
        assert_eq!(record.categories, vec!["electric".to_string()]);
    }

    #[test]
    fn test_base_url_without_trailing_slash() {
        let gateway = HttpGateway::new("https://pokeapi.co/api/v2").unwrap();
        assert_eq!(
            gateway.record_url(25).unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon/25"
        );
    }

    #[test]
    fn test_index_url_carries_limit() {
        let gateway = HttpGateway::new("https://pokeapi.co/api/v2/").unwrap();
        assert_eq!(
            gateway.index_url(1025).unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon?limit=1025"
        );
    }

    #[test]
    fn test_resolve_id_or_url() {
        let gateway = HttpGateway::new(DEFAULT_API_BASE_URL).unwrap();
        assert_eq!(
            gateway.resolve("7").unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon/7"
        );
        assert_eq!(
            gateway.resolve("https://pokeapi.co/api/v2/pokemon/7/").unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon/7/"
        );
        assert!(matches!(gateway.resolve("nope"), Err(GatewayError::InvalidUrl(_))));
    }

    #[test]
    fn test_relative_base_url_is_rejected() {
        assert!(matches!(HttpGateway::new("api/v2"), Err(GatewayError::InvalidUrl(_))));
    }
}
