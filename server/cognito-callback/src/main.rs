use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use cognito_callback::logging::init_logging;
use cognito_callback::{
    provider_config_from_env, CallbackHandler, CallbackServer, ReqwestTokenClient,
};

/// Exchanges Cognito authorization codes for tokens.
#[derive(Parser, Debug)]
#[command(name = "cognito-callback", version, about)]
struct Cli {
    /// Address the callback server listens on
    #[arg(long, env = "CALLBACK_BIND_ADDR", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = provider_config_from_env()?;
    info!("Sign-in link: {}", config.sign_in_url());

    let token_client = ReqwestTokenClient::new()?;
    let handler = CallbackHandler::new(config, Arc::new(token_client));

    CallbackServer::new(cli.bind, handler).run().await?;
    Ok(())
}
