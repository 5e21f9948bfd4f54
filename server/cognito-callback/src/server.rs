use std::net::SocketAddr;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use dotenvy::dotenv;
use tracing::info;

use cognito_types::{CallbackError, CognitoSettings, ProviderConfig, CALLBACK_PATH};

use crate::oauth_handler::{handle_callback, handle_proxy_event, health_check, CallbackHandler};

/// Load the Cognito settings from the process environment, reading `.env`
/// first when one exists.
pub fn settings_from_env() -> Result<CognitoSettings, CallbackError> {
    let _ = dotenv();
    CognitoSettings::from_lookup(|key| std::env::var(key))
}

pub fn provider_config_from_env() -> Result<ProviderConfig, CallbackError> {
    settings_from_env().map(ProviderConfig::new)
}

/// Register the callback routes for `handler` on an actix app.
pub fn configure(cfg: &mut web::ServiceConfig, handler: web::Data<CallbackHandler>) {
    let stage_route = handler.config().callback_route();
    cfg.app_data(handler)
        .route("/health", web::get().to(health_check))
        .route(&format!("/{}", CALLBACK_PATH), web::get().to(handle_callback))
        .route(&stage_route, web::get().to(handle_callback))
        .route("/events", web::post().to(handle_proxy_event));
}

/// Hosts a [`CallbackHandler`] over HTTP.
pub struct CallbackServer {
    bind_addr: SocketAddr,
    handler: web::Data<CallbackHandler>,
}

impl CallbackServer {
    pub fn new(bind_addr: SocketAddr, handler: CallbackHandler) -> Self {
        Self {
            bind_addr,
            handler: web::Data::new(handler),
        }
    }

    pub async fn run(self) -> Result<(), CallbackError> {
        info!(
            "Starting Cognito callback server on {} (redirect uri: {})",
            self.bind_addr,
            self.handler.config().redirect_url()
        );

        let handler = self.handler.clone();
        HttpServer::new(move || {
            let handler = handler.clone();
            App::new()
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .configure(move |cfg| configure(cfg, handler))
        })
        .bind(self.bind_addr)
        .map_err(|e| {
            CallbackError::ServerError(format!("Failed to bind to {}: {}", self.bind_addr, e))
        })?
        .shutdown_timeout(5)
        .run()
        .await
        .map_err(|e| CallbackError::ServerError(format!("Server error: {}", e)))
    }
}
