use std::collections::HashMap;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Result as ActixResult};
use tracing::{debug, error, info, warn};

use cognito_types::{
    CallbackError, CallbackRequest, CallbackResponse, ProviderConfig, ProxyRequest, ProxyResponse,
    TokenResponse, JSON_CONTENT_TYPE,
};

use crate::token_client::{TokenClient, TokenRequest};

/// Answers the Cognito redirect: hands out the sign-in link when no code is
/// present, otherwise trades the code for tokens.
#[derive(Clone)]
pub struct CallbackHandler {
    config: Arc<ProviderConfig>,
    token_client: Arc<dyn TokenClient>,
}

impl CallbackHandler {
    pub fn new(config: ProviderConfig, token_client: Arc<dyn TokenClient>) -> Self {
        Self {
            config: Arc::new(config),
            token_client,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Never fails: every error is logged and turned into a JSON error body.
    pub async fn handle(&self, request: &CallbackRequest) -> CallbackResponse {
        let Some(code) = request.code() else {
            info!("Callback invoked without authorization code, returning sign-in link");
            return self.sign_up_response();
        };

        match self.exchange_code(code).await {
            Ok(response) => response,
            Err(e) => {
                if e.is_upstream() {
                    warn!("Token endpoint rejected authorization code: {}", e);
                } else {
                    error!("Failed to exchange authorization code: {}", e);
                }
                CallbackResponse::from(&e)
            }
        }
    }

    pub fn sign_up_response(&self) -> CallbackResponse {
        CallbackResponse::sign_up(self.config.sign_in_url())
    }

    pub async fn exchange_code(&self, code: &str) -> Result<CallbackResponse, CallbackError> {
        let request = TokenRequest::authorization_code(&self.config, code)?;
        debug!("Exchanging authorization code at {}", request.url);

        let reply = self.token_client.send(request).await?;
        if reply.status != 200 {
            return Err(CallbackError::Upstream {
                status: reply.status,
                body: reply.body,
            });
        }

        let tokens: TokenResponse =
            serde_json::from_str(&reply.body).map_err(|e| CallbackError::Decode(e.to_string()))?;

        info!("Authorization code exchanged successfully");
        CallbackResponse::json(200, &tokens).map_err(|e| CallbackError::Decode(e.to_string()))
    }
}

/// Handle the provider redirect
/// GET /cognito-callback?code=...
pub async fn handle_callback(
    query: web::Query<HashMap<String, String>>,
    handler: web::Data<CallbackHandler>,
) -> ActixResult<HttpResponse> {
    let request = CallbackRequest::new(query.into_inner());
    let response = handler.handle(&request).await;
    Ok(into_http_response(response))
}

/// Handle a raw API Gateway proxy event
/// POST /events
pub async fn handle_proxy_event(
    event: web::Json<ProxyRequest>,
    handler: web::Data<CallbackHandler>,
) -> ActixResult<HttpResponse> {
    let event = event.into_inner();
    debug!(
        "Proxy event received: method={:?} path={:?}",
        event.http_method, event.path
    );
    let response = handler.handle(&CallbackRequest::from(event)).await;
    Ok(HttpResponse::Ok().json(ProxyResponse::from(response)))
}

/// Health check for the callback server
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("Callback server OK")
}

fn into_http_response(response: CallbackResponse) -> HttpResponse {
    let status = StatusCode::from_u16(response.status_code).unwrap_or_else(|_| {
        warn!("Unrepresentable status code {}", response.status_code);
        StatusCode::INTERNAL_SERVER_ERROR
    });
    HttpResponse::build(status)
        .content_type(JSON_CONTENT_TYPE)
        .body(response.body)
}
