use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::CallbackError;

pub const CODE_PARAM: &str = "code";
pub const JSON_CONTENT_TYPE: &str = "application/json";

const FALLBACK_ERROR_BODY: &str = r#"{"status":"error","message-error":"internal error"}"#;

/// Inbound callback invocation: just the query string parameters.
#[derive(Debug, Clone, Default)]
pub struct CallbackRequest {
    pub query: HashMap<String, String>,
}

impl CallbackRequest {
    pub fn new(query: HashMap<String, String>) -> Self {
        Self { query }
    }

    /// The authorization code, if present and non-empty.
    pub fn code(&self) -> Option<&str> {
        self.query
            .get(CODE_PARAM)
            .map(String::as_str)
            .filter(|code| !code.is_empty())
    }
}

/// Status code and JSON body returned for every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackResponse {
    pub status_code: u16,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: String,
    #[serde(rename = "message-error")]
    pub message_error: String,
}

#[derive(Debug, Serialize)]
pub struct SignUpBody {
    pub status: String,
    pub message: String,
}

impl CallbackResponse {
    pub fn json<T: Serialize>(status_code: u16, value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status_code,
            body: serde_json::to_string(value)?,
        })
    }

    pub fn sign_up(sign_in_url: &str) -> Self {
        let body = SignUpBody {
            status: "ok".to_string(),
            message: format!(
                "Please, access the link and proceed with the sign-in: [{}]",
                sign_in_url
            ),
        };
        Self::json(200, &body)
            .unwrap_or_else(|_| Self::error(500, "failed to encode sign-up message"))
    }

    pub fn error(status_code: u16, message: &str) -> Self {
        let body = ErrorBody {
            status: "error".to_string(),
            message_error: message.to_string(),
        };
        Self::json(status_code, &body).unwrap_or_else(|_| Self {
            status_code,
            body: FALLBACK_ERROR_BODY.to_string(),
        })
    }
}

impl From<&CallbackError> for CallbackResponse {
    fn from(err: &CallbackError) -> Self {
        CallbackResponse::error(err.status_code(), err.message())
    }
}

/// API Gateway proxy integration event, reduced to the fields the callback
/// reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl From<ProxyRequest> for CallbackRequest {
    fn from(event: ProxyRequest) -> Self {
        CallbackRequest::new(event.query_string_parameters.unwrap_or_default())
    }
}

/// API Gateway proxy integration response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl From<CallbackResponse> for ProxyResponse {
    fn from(response: CallbackResponse) -> Self {
        Self {
            status_code: response.status_code,
            headers: HashMap::from([(
                "Content-Type".to_string(),
                JSON_CONTENT_TYPE.to_string(),
            )]),
            body: response.body,
            is_base64_encoded: false,
        }
    }
}
