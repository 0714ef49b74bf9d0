//! OpenBao Transit client for HMAC operations.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

/// Configuration for connecting to an OpenBao instance.
#[derive(Debug, Clone)]
pub struct OpenBaoConfig {
    /// OpenBao server address, e.g. `"http://localhost:8200"`.
    pub addr: String,

    /// OpenBao authentication token.
    pub token: String,

    /// Transit key name to use for HMAC operations.
    pub transit_key: String,
}

/// HTTP client for OpenBao Transit HMAC operations.
#[derive(Debug, Clone)]
pub struct OpenBaoClient {
    config: OpenBaoConfig,
    http: Client,
}

impl OpenBaoClient {
    #[must_use]
    pub fn new(config: OpenBaoConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Compute an HMAC over `input` with the configured transit key.
    ///
    /// Returns the opaque verifier string (e.g. `"vault:v1:..."`) to store.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn hmac(&self, input: &[u8]) -> Result<String, OpenBaoError> {
        let encoded = BASE64.encode(input);

        let response: TransitResponse<HmacData> = self
            .transit(
                "hmac",
                &TransitRequest {
                    input: &encoded,
                    hmac: None,
                },
            )
            .await?;

        Ok(response.data.hmac)
    }

    /// Check `input` against a stored verifier.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn verify(&self, input: &[u8], hmac: &str) -> Result<bool, OpenBaoError> {
        let encoded = BASE64.encode(input);

        let response: TransitResponse<VerifyData> = self
            .transit(
                "verify",
                &TransitRequest {
                    input: &encoded,
                    hmac: Some(hmac),
                },
            )
            .await?;

        Ok(response.data.valid)
    }

    async fn transit<T: DeserializeOwned>(
        &self,
        operation: &str,
        body: &TransitRequest<'_>,
    ) -> Result<T, OpenBaoError> {
        let url = format!(
            "{}/v1/transit/{operation}/{}",
            self.config.addr.trim_end_matches('/'),
            self.config.transit_key
        );

        debug!(operation, "calling OpenBao transit");

        let response = self
            .http
            .post(&url)
            .header("X-Vault-Token", &self.config.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(OpenBaoError::UnexpectedResponse(format!(
                "{operation} request failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Serialize)]
struct TransitRequest<'a> {
    input: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    hmac: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TransitResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct HmacData {
    hmac: String,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    valid: bool,
}

/// Errors that can occur when communicating with OpenBao.
#[derive(Debug, Error)]
pub enum OpenBaoError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// OpenBao returned a non-2xx response.
    #[error("unexpected response from OpenBao: {0}")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hmac_request_omits_verifier() {
        let body = serde_json::to_value(TransitRequest {
            input: "aGVsbG8=",
            hmac: None,
        })
        .expect("request should serialize");

        assert_eq!(body, serde_json::json!({ "input": "aGVsbG8=" }));
    }

    #[test]
    fn verify_request_includes_verifier() {
        let body = serde_json::to_value(TransitRequest {
            input: "aGVsbG8=",
            hmac: Some("vault:v1:abc"),
        })
        .expect("request should serialize");

        assert_eq!(
            body,
            serde_json::json!({ "input": "aGVsbG8=", "hmac": "vault:v1:abc" })
        );
    }

    #[test]
    fn verify_response_deserializes() {
        let parsed: TransitResponse<VerifyData> =
            serde_json::from_str(r#"{"data":{"valid":true}}"#).expect("response should parse");

        assert!(parsed.data.valid);
    }
}
