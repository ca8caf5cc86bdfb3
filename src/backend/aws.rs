use std::env;
use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use hmac::{Hmac, Mac};
use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::backend::{
    ImportTerminologyRequest, TranslateBackend, TranslateRequest, TranslateResponse,
};
use crate::errors::BackendError;

/// Amazon Translate client
///
/// Speaks the service's `x-amz-json-1.1` protocol directly over a blocking
/// HTTP client, with SigV4 request signing. Credentials and region always
/// come from the caller (environment or configuration); nothing is embedded.
const SERVICE: &str = "translate";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const TARGET_TRANSLATE_TEXT: &str = "AWSShineFrontendService_20170701.TranslateText";
const TARGET_IMPORT_TERMINOLOGY: &str = "AWSShineFrontendService_20170701.ImportTerminology";
const REQUEST_TIMEOUT_SECS: u64 = 60;

type HmacSha256 = Hmac<Sha256>;

/// AWS credentials, resolved from the environment
#[derive(Clone)]
pub struct AwsCredentials {
    /// Access key id
    pub access_key_id: String,

    /// Secret access key
    pub secret_access_key: String,

    /// Session token for temporary credentials
    pub session_token: Option<String>,
}

impl AwsCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        AwsCredentials {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Read credentials from the standard AWS environment variables
    pub fn from_env() -> Result<Self, BackendError> {
        let access_key_id = env::var("AWS_ACCESS_KEY_ID")
            .map_err(|_| BackendError::Authentication("AWS_ACCESS_KEY_ID is not set".to_string()))?;
        let secret_access_key = env::var("AWS_SECRET_ACCESS_KEY").map_err(|_| {
            BackendError::Authentication("AWS_SECRET_ACCESS_KEY is not set".to_string())
        })?;
        let session_token = env::var("AWS_SESSION_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());
        Ok(AwsCredentials {
            access_key_id,
            secret_access_key,
            session_token,
        })
    }
}

// Secrets stay out of Debug output
impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Region from the standard AWS environment variables
pub fn region_from_env() -> Option<String> {
    env::var("AWS_REGION")
        .ok()
        .or_else(|| env::var("AWS_DEFAULT_REGION").ok())
        .filter(|region| !region.is_empty())
}

/// Client for the Amazon Translate service
pub struct AmazonTranslate {
    /// HTTP client for API requests
    client: Client,

    /// Service region
    region: String,

    /// Service origin, `https://translate.{region}.amazonaws.com` by default
    endpoint: String,

    /// Signing credentials
    credentials: AwsCredentials,
}

impl fmt::Debug for AmazonTranslate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmazonTranslate")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl AmazonTranslate {
    /// Create a new client for the given region and credentials
    pub fn new(
        region: impl Into<String>,
        credentials: AwsCredentials,
    ) -> Result<Self, BackendError> {
        let region = region.into();
        let endpoint = format!("https://translate.{}.amazonaws.com", region);
        Self::with_endpoint(region, endpoint, credentials)
    }

    /// Create a client against a non-default service origin
    ///
    /// The endpoint must be an origin without a path; signing assumes the
    /// request URI is `/`.
    pub fn with_endpoint(
        region: impl Into<String>,
        endpoint: impl Into<String>,
        credentials: AwsCredentials,
    ) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| BackendError::RequestFailed(format!("failed to build HTTP client: {}", e)))?;
        Ok(AmazonTranslate {
            client,
            region: region.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn host(&self) -> &str {
        self.endpoint
            .trim_start_matches("https://")
            .trim_start_matches("http://")
    }

    /// Issue one signed request and return the raw response body
    fn call(&self, target: &str, body: &str) -> Result<String, BackendError> {
        let now = Utc::now();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date_stamp = now.format("%Y%m%d").to_string();
        let payload_hash = sha256_hex(body.as_bytes());

        // Canonical headers, already in byte order
        let mut headers: Vec<(&str, String)> = vec![
            ("content-type", CONTENT_TYPE.to_string()),
            ("host", self.host().to_string()),
            ("x-amz-date", amz_date.clone()),
        ];
        if let Some(token) = &self.credentials.session_token {
            headers.push(("x-amz-security-token", token.clone()));
        }
        headers.push(("x-amz-target", target.to_string()));

        let signed_headers = headers
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(";");
        let canonical_headers: String = headers
            .iter()
            .map(|(name, value)| format!("{}:{}\n", name, value.trim()))
            .collect();
        let canonical_request = format!(
            "POST\n/\n\n{}\n{}\n{}",
            canonical_headers, signed_headers, payload_hash
        );

        let scope = format!("{}/{}/{}/aws4_request", date_stamp, self.region, SERVICE);
        let string_to_sign = format!(
            "AWS4-HMAC-SHA256\n{}\n{}\n{}",
            amz_date,
            scope,
            sha256_hex(canonical_request.as_bytes())
        );

        let mut key = hmac_sha256(
            format!("AWS4{}", self.credentials.secret_access_key).as_bytes(),
            date_stamp.as_bytes(),
        );
        key = hmac_sha256(&key, self.region.as_bytes());
        key = hmac_sha256(&key, SERVICE.as_bytes());
        key = hmac_sha256(&key, b"aws4_request");
        let signature = hex(&hmac_sha256(&key, string_to_sign.as_bytes()));

        let authorization = format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            self.credentials.access_key_id, scope, signed_headers, signature
        );

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Date", &amz_date)
            .header("X-Amz-Target", target)
            .header("Authorization", authorization)
            .body(body.to_string());
        if let Some(token) = &self.credentials.session_token {
            request = request.header("X-Amz-Security-Token", token);
        }

        let response = request
            .send()
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        if !status.is_success() {
            return Err(classify_error(status.as_u16(), &text));
        }
        Ok(text)
    }
}

impl TranslateBackend for AmazonTranslate {
    fn translate_text(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, BackendError> {
        let body = serde_json::to_string(&TranslateTextBody {
            text: request.text.clone(),
            source_language_code: request.source_language_code.clone(),
            target_language_code: request.target_language_code.clone(),
            terminology_names: request.terminology_names.clone(),
        })
        .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        let response = self.call(TARGET_TRANSLATE_TEXT, &body)?;
        let result: TranslateTextResult = serde_json::from_str(&response)
            .map_err(|e| BackendError::RequestFailed(format!("failed to parse response: {}", e)))?;
        debug!(
            "Translated {} chars {} -> {}",
            request.text.len(),
            request.source_language_code,
            request.target_language_code
        );
        Ok(TranslateResponse {
            translated_text: result.translated_text,
        })
    }

    fn import_terminology(&self, request: &ImportTerminologyRequest) -> Result<(), BackendError> {
        let body = serde_json::to_string(&ImportTerminologyBody {
            name: request.name.clone(),
            merge_strategy: request.merge_strategy.as_str().to_string(),
            terminology_data: TerminologyData {
                file: BASE64.encode(&request.data),
                format: "CSV".to_string(),
            },
        })
        .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        self.call(TARGET_IMPORT_TERMINOLOGY, &body)?;
        debug!("Imported terminology {}", request.name);
        Ok(())
    }
}

/// Map a non-success response to the error taxonomy
///
/// The service reports the failing exception class in the `__type` field of
/// the error body. Input-validation classes are the recoverable ones; the
/// oversized-text case has its own exception class and belongs with them.
fn classify_error(status_code: u16, body: &str) -> BackendError {
    let parsed: AwsErrorBody = serde_json::from_str(body).unwrap_or_default();
    let error_type = parsed.error_type.unwrap_or_default();
    let message = match parsed.message {
        Some(message) if !message.is_empty() => message,
        _ => body.to_string(),
    };

    if error_type.contains("ValidationException")
        || error_type.contains("TextSizeLimitExceededException")
    {
        BackendError::Validation(message)
    } else if status_code == 401 || status_code == 403 {
        BackendError::Authentication(message)
    } else {
        BackendError::Api {
            status_code,
            message,
        }
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn sha256_hex(data: &[u8]) -> String {
    hex(&Sha256::digest(data))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}

/// Amazon Translate TranslateText request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TranslateTextBody {
    text: String,
    source_language_code: String,
    target_language_code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    terminology_names: Vec<String>,
}

/// Amazon Translate TranslateText response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TranslateTextResult {
    translated_text: String,
}

/// Amazon Translate ImportTerminology request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ImportTerminologyBody {
    name: String,
    merge_strategy: String,
    terminology_data: TerminologyData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TerminologyData {
    file: String,
    format: String,
}

/// Error body shared by the service's exception responses
#[derive(Debug, Default, Deserialize)]
struct AwsErrorBody {
    #[serde(rename = "__type")]
    error_type: Option<String>,
    #[serde(rename = "message", alias = "Message")]
    message: Option<String>,
}
