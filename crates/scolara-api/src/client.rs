// HTTP client for the Scolara REST API.
//
// Wraps `reqwest::Client` with base-URL handling, bearer-token
// attachment, body encoding, and response normalization. Endpoint
// modules (students, rooms, etc.) are implemented as inherent methods
// via separate files to keep this module focused on transport mechanics.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::token::TokenStore;
use crate::transport::TransportConfig;

/// Request body encoding.
///
/// A request carries a JSON document or a form-encoded map, never both.
/// The enum makes the invalid combination unrepresentable, which is the
/// rejection policy for dual-body inputs.
#[derive(Debug, Clone)]
pub enum Body {
    None,
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

/// Async client for the Scolara REST API.
///
/// Holds the shared `reqwest::Client`, the configured base URL, and a
/// handle to the process-wide token slot. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client from a base URL, token slot, and transport config.
    pub fn new(
        base_url: Url,
        tokens: Arc<dyn TokenStore>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url,
            tokens,
        })
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http,
            base_url,
            tokens,
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Handle to the token slot shared with this client.
    pub fn tokens(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }

    /// Build a full URL for an API path (`path` must start with `/`).
    ///
    /// String concatenation rather than `Url::join` so a base URL with a
    /// path prefix (e.g. behind a reverse proxy) is preserved.
    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{path}")).map_err(Error::InvalidUrl)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }

    // ── Request dispatch ─────────────────────────────────────────────

    /// Send a request and apply the session-wide 401 rule.
    ///
    /// The bearer token is attached unless the caller already supplied
    /// an `Authorization` header. A 401 from any endpoint clears the
    /// persisted token *before* the error is returned, so the very next
    /// request goes out unauthenticated.
    ///
    /// This is the raw escape hatch; prefer the typed endpoint methods.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Body,
        headers: HeaderMap,
    ) -> Result<reqwest::Response, Error> {
        let url = self.url(path, query)?;
        debug!(%method, %url, "request");

        let caller_auth = headers.contains_key(AUTHORIZATION);
        let mut builder = self.http.request(method, url).headers(headers);

        builder = match body {
            Body::None => builder,
            Body::Json(value) => builder.json(&value),
            Body::Form(fields) => builder.form(&fields),
        };

        if !caller_auth {
            if let Some(token) = self.tokens.get() {
                builder = builder.bearer_auth(token.expose_secret());
            }
        }

        let resp = builder.send().await.map_err(Error::Transport)?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            warn!(path, "server returned 401, clearing stored token");
            self.tokens.clear();
            return Err(Error::SessionExpired);
        }

        Ok(resp)
    }

    // ── Verb helpers ─────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = self
            .send(Method::GET, path, &[], Body::None, HeaderMap::new())
            .await?;
        Self::parse_json(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let resp = self
            .send(Method::GET, path, params, Body::None, HeaderMap::new())
            .await?;
        Self::parse_json(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let resp = self
            .send(
                Method::POST,
                path,
                &[],
                Body::Json(encode(body)?),
                HeaderMap::new(),
            )
            .await?;
        Self::parse_json(resp).await
    }

    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
    ) -> Result<T, Error> {
        let resp = self
            .send(Method::POST, path, &[], Body::Form(fields), HeaderMap::new())
            .await?;
        Self::parse_json(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let resp = self
            .send(
                Method::PUT,
                path,
                &[],
                Body::Json(encode(body)?),
                HeaderMap::new(),
            )
            .await?;
        Self::parse_json(resp).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let resp = self
            .send(
                Method::PATCH,
                path,
                &[],
                Body::Json(encode(body)?),
                HeaderMap::new(),
            )
            .await?;
        Self::parse_json(resp).await
    }

    pub(crate) async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = self
            .send(Method::PATCH, path, &[], Body::None, HeaderMap::new())
            .await?;
        Self::parse_json(resp).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = self
            .send(Method::POST, path, &[], Body::None, HeaderMap::new())
            .await?;
        Self::parse_json(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let resp = self
            .send(Method::DELETE, path, &[], Body::None, HeaderMap::new())
            .await?;
        Self::parse_empty(resp)
    }

    // ── Response handling ────────────────────────────────────────────

    /// Parse a typed JSON response.
    ///
    /// Non-success statuses fail with [`Error::Api`] carrying the raw
    /// body text. A success response that does not declare a JSON
    /// content type, or whose body does not match the expected schema,
    /// fails with [`Error::Deserialization`].
    pub(crate) async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let declares_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        let body = resp.text().await.map_err(Error::Transport)?;

        if !declares_json {
            return Err(Error::Deserialization {
                message: "expected a JSON response".into(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    /// Discard the body of a success response (DELETE and friends).
    ///
    /// Whatever the server sent back, a success result is treated as
    /// empty; non-success statuses fail the same way as `parse_json`.
    pub(crate) fn parse_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Api {
                status: status.as_u16(),
                body: String::new(),
            })
        }
    }
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, Error> {
    serde_json::to_value(body).map_err(|e| Error::Encode(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reqwest::header::HeaderValue;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::token::MemoryTokenStore;

    fn client_for(server: &MockServer, tokens: Arc<dyn TokenStore>) -> ApiClient {
        let base = Url::parse(&server.uri()).unwrap();
        ApiClient::with_client(reqwest::Client::new(), base, tokens)
    }

    #[tokio::test]
    async fn caller_supplied_authorization_header_wins() {
        let server = MockServer::start().await;
        let tokens = Arc::new(MemoryTokenStore::new());
        tokens.set(secrecy::SecretString::from("stored-token"));
        let client = client_for(&server, tokens);

        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("authorization", "Bearer caller-token"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer caller-token"));
        let resp = client
            .send(Method::GET, "/ping", &[], Body::None, headers)
            .await
            .unwrap();
        assert!(resp.status().is_success());
    }

    #[tokio::test]
    async fn base_url_path_prefix_is_preserved() {
        let server = MockServer::start().await;
        let base = Url::parse(&format!("{}/sis", server.uri())).unwrap();
        let client = ApiClient::with_client(
            reqwest::Client::new(),
            base,
            Arc::new(MemoryTokenStore::new()),
        );

        Mock::given(method("GET"))
            .and(path("/sis/students"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client
            .send(Method::GET, "/students", &[], Body::None, HeaderMap::new())
            .await
            .unwrap();
    }
}
