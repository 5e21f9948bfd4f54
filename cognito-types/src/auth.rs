use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize};
use std::env::VarError;
use url::form_urlencoded;

use crate::CallbackError;

/// Cognito user pool domain prefix of the hosted UI.
pub const COGNITO_DOMAIN: &str = "tech-challenge-grp36";
/// API Gateway stage the callback is deployed under.
pub const API_STAGE: &str = "default";
/// API Gateway resource path receiving the provider redirect.
pub const CALLBACK_PATH: &str = "cognito-callback";
/// Scopes requested by the sign-in link.
pub const SIGN_IN_SCOPES: &str = "email openid phone";

pub const CLIENT_ID_ENV: &str = "CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "CLIENT_SECRET";
pub const API_GW_ID_ENV: &str = "API_GW_ID";
pub const AWS_REGION_ENV: &str = "AWS_REGION";
/// Optional override of `https://<domain>.auth.<region>.amazoncognito.com`.
pub const AUTH_BASE_URL_ENV: &str = "COGNITO_AUTH_BASE_URL";

/// Raw inputs the provider configuration is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CognitoSettings {
    pub client_id: String,
    pub client_secret: String,
    pub api_gateway_id: String,
    pub region: String,
    pub domain: String,
    pub stage: String,
    pub auth_base_url: Option<String>,
}

impl CognitoSettings {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        api_gateway_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_gateway_id: api_gateway_id.into(),
            region: region.into(),
            domain: COGNITO_DOMAIN.to_string(),
            stage: API_STAGE.to_string(),
            auth_base_url: None,
        }
    }

    /// Point the token and authorize endpoints at another host, e.g. a local
    /// Cognito emulator.
    pub fn with_auth_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.auth_base_url = Some(base_url.into());
        self
    }

    /// Read the settings through `lookup`, which behaves like `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CallbackError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let invalid_unicode = |key: &str| {
            CallbackError::InvalidConfig(format!(
                "environment variable {} contains invalid unicode",
                key
            ))
        };
        let optional = |key: &str| -> Result<Option<String>, CallbackError> {
            match lookup(key) {
                Ok(value) => Ok(Some(value)),
                Err(VarError::NotPresent) => Ok(None),
                Err(VarError::NotUnicode(_)) => Err(invalid_unicode(key)),
            }
        };
        let required = |key: &str| -> Result<String, CallbackError> {
            match optional(key)? {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(CallbackError::InvalidConfig(format!(
                    "environment variable {} is not set",
                    key
                ))),
            }
        };

        // App clients without a secret are valid; the credential is then `id:`.
        let mut settings = Self::new(
            required(CLIENT_ID_ENV)?,
            optional(CLIENT_SECRET_ENV)?.unwrap_or_default(),
            required(API_GW_ID_ENV)?,
            required(AWS_REGION_ENV)?,
        );

        settings.auth_base_url = optional(AUTH_BASE_URL_ENV)?
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(settings)
    }
}

/// Everything the handler needs to talk to the hosted authorization server.
/// Built once from [`CognitoSettings`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    client_id: String,
    stage: String,
    redirect_url: String,
    token_url: String,
    sign_in_url: String,
    basic_credential: String,
}

impl ProviderConfig {
    pub fn new(settings: CognitoSettings) -> Self {
        let auth_base_url = match &settings.auth_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "https://{}.auth.{}.amazoncognito.com",
                settings.domain, settings.region
            ),
        };

        let redirect_url = format!(
            "https://{}.execute-api.{}.amazonaws.com/{}/{}",
            settings.api_gateway_id, settings.region, settings.stage, CALLBACK_PATH
        );
        let token_url = format!("{}/oauth2/token", auth_base_url);

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("response_type", "code")
            .append_pair("scope", SIGN_IN_SCOPES)
            .append_pair("client_id", &settings.client_id)
            .append_pair("redirect_uri", &redirect_url)
            .finish();
        let sign_in_url = format!("{}/oauth2/authorize?{}", auth_base_url, query);

        let basic_credential =
            STANDARD.encode(format!("{}:{}", settings.client_id, settings.client_secret));

        Self {
            client_id: settings.client_id,
            stage: settings.stage,
            redirect_url,
            token_url,
            sign_in_url,
            basic_credential,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    pub fn sign_in_url(&self) -> &str {
        &self.sign_in_url
    }

    /// `base64(client_id:client_secret)`, without the `Basic ` prefix.
    pub fn basic_credential(&self) -> &str {
        &self.basic_credential
    }

    /// Route the callback is served on behind the API gateway stage.
    pub fn callback_route(&self) -> String {
        format!("/{}/{}", self.stage, CALLBACK_PATH)
    }
}

/// Token payload returned by the `/oauth2/token` endpoint.
///
/// Absent or `null` fields decode to empty values; the payload is forwarded
/// as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TokenResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub id_token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub access_token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub refresh_token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expires_in: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub token_type: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
