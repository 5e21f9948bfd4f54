use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;
use url::{form_urlencoded, Url};

use cognito_types::{CallbackError, ProviderConfig};

/// Upper bound for the whole token exchange round trip.
pub const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A fully built POST to the token endpoint.
#[derive(Debug, Clone)]
pub struct TokenRequest {
    pub url: Url,
    pub headers: HeaderMap,
    pub body: String,
}

impl TokenRequest {
    /// Build the `authorization_code` grant for `code`.
    pub fn authorization_code(
        config: &ProviderConfig,
        code: &str,
    ) -> Result<Self, CallbackError> {
        let token_url = config.token_url();
        let url = Url::parse(token_url).map_err(|e| {
            CallbackError::RequestBuild(format!("invalid token url '{}': {}", token_url, e))
        })?;

        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "authorization_code")
            .append_pair("client_id", config.client_id())
            .append_pair("code", code)
            .append_pair("redirect_uri", config.redirect_url())
            .finish();

        let authorization = HeaderValue::from_str(&format!("Basic {}", config.basic_credential()))
            .map_err(|e| CallbackError::RequestBuild(format!("invalid credential: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));

        Ok(Self { url, headers, body })
    }
}

/// Raw reply of the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReply {
    pub status: u16,
    pub body: String,
}

/// Sends token requests. Implemented over reqwest in production and stubbed
/// in tests.
#[async_trait]
pub trait TokenClient: Send + Sync {
    async fn send(&self, request: TokenRequest) -> Result<TokenReply, CallbackError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTokenClient {
    http_client: Client,
}

impl ReqwestTokenClient {
    pub fn new() -> Result<Self, CallbackError> {
        let http_client = Client::builder()
            .timeout(TOKEN_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                CallbackError::RequestBuild(format!("failed to build http client: {}", e))
            })?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl TokenClient for ReqwestTokenClient {
    async fn send(&self, request: TokenRequest) -> Result<TokenReply, CallbackError> {
        let response = self
            .http_client
            .post(request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| CallbackError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| CallbackError::Transport(format!("failed to read response: {}", e)))?;

        debug!("Token endpoint replied with status {}", status);
        Ok(TokenReply { status, body })
    }
}
