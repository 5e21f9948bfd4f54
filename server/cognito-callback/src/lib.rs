pub mod logging;
pub mod oauth_handler;
mod server;
pub mod token_client;

pub use server::{configure, provider_config_from_env, settings_from_env, CallbackServer};

pub use oauth_handler::{handle_callback, handle_proxy_event, health_check, CallbackHandler};
pub use token_client::{ReqwestTokenClient, TokenClient, TokenReply, TokenRequest};
