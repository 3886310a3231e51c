use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::*;

/// Error from the billing API.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ApiError {
    /// Network or HTTP transport error.
    Network(String),
    /// The backend returned an error envelope.
    Api(String),
    /// Failed to parse the response.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "billing API network error: {e}"),
            Self::Api(e) => write!(f, "billing API error: {e}"),
            Self::Parse(e) => write!(f, "billing API parse error: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Async client for the backend billing API.
///
/// One method per endpoint. All methods require network access and
/// return [`ApiError::Network`] on connection issues, [`ApiError::Api`]
/// when the backend answers with an error envelope, and
/// [`ApiError::Parse`] on unexpected response shapes.
#[derive(Debug, Clone)]
pub struct BillingClient {
    base_url: String,
    http: reqwest::Client,
}

impl BillingClient {
    /// Create a client for a backend at `base_url`
    /// (e.g. "http://localhost:8000/api").
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Check backend and SUNAT web-service connectivity.
    pub async fn test_connection(&self) -> Result<ConnectionTestResponse, ApiError> {
        self.get("/test-sunat-connection/", &[]).await
    }

    /// Create the built-in multi-scenario test document (taxed, exempt,
    /// free, and percepción lines) and return its id and totals.
    pub async fn create_test_scenario(&self) -> Result<CreateTestScenarioResponse, ApiError> {
        self.post("/create-test-scenarios/", None::<&()>).await
    }

    /// Generate the UBL 2.1 XML for a document.
    pub async fn convert_to_ubl(&self, invoice_id: i64) -> Result<ConvertUblResponse, ApiError> {
        self.post(&format!("/invoice/{invoice_id}/convert-ubl/"), None::<&()>)
            .await
    }

    /// Digitally sign the generated XML and package it for SUNAT.
    pub async fn sign(&self, invoice_id: i64) -> Result<SignResponse, ApiError> {
        self.post(&format!("/invoice/{invoice_id}/sign/"), None::<&()>)
            .await
    }

    /// Submit the signed ZIP to SUNAT.
    ///
    /// A `Warning` status marks the expected 401 with test credentials:
    /// the document was generated and signed correctly, only the
    /// submission leg failed.
    pub async fn send_to_sunat(&self, invoice_id: i64) -> Result<SendToSunatResponse, ApiError> {
        self.post(&format!("/invoice/{invoice_id}/send-sunat/"), None::<&()>)
            .await
    }

    /// Poll SUNAT for the processing state of a ticketed submission.
    pub async fn check_sunat_status(
        &self,
        invoice_id: i64,
    ) -> Result<TicketStatusResponse, ApiError> {
        self.post(&format!("/invoice/{invoice_id}/check-status/"), None::<&()>)
            .await
    }

    /// Run the complete flow (UBL → sign → SUNAT) in one call.
    pub async fn process_complete(
        &self,
        invoice_id: i64,
    ) -> Result<ProcessCompleteResponse, ApiError> {
        self.post(
            &format!("/invoice/{invoice_id}/process-complete/"),
            None::<&()>,
        )
        .await
    }

    /// Fetch a document's lifecycle status, artifact paths, SUNAT info,
    /// and server-computed totals.
    pub async fn invoice_status(&self, invoice_id: i64) -> Result<InvoiceStatusResponse, ApiError> {
        self.get(&format!("/invoice/{invoice_id}/status/"), &[]).await
    }

    /// List recently created documents (newest first).
    pub async fn list_documents(&self) -> Result<DocumentListResponse, ApiError> {
        self.get("/documents/", &[]).await
    }

    /// Fetch the content of an XML/ZIP/CDR artifact by backend path.
    pub async fn file_content(&self, path: &str) -> Result<FileContentResponse, ApiError> {
        self.get("/file-content/", &[("path", path)]).await
    }

    /// Validate the XML-DSig signature of an XML document.
    pub async fn validate_signature(
        &self,
        xml_content: impl Into<String>,
    ) -> Result<SignatureValidationResponse, ApiError> {
        let body = SignatureValidationRequest {
            xml_content: xml_content.into(),
        };
        self.post("/validate-signature/", Some(&body)).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {url}");
        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {url}");
        let mut req = self.http.post(&url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            // The backend wraps errors as {"status": "error", "message": …,
            // "suggestion": …}; fall back to the raw body when it doesn't.
            let detail = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(env) => {
                    let mut msg = env.message.unwrap_or_else(|| body.clone());
                    if let Some(suggestion) = env.suggestion {
                        msg = format!("{msg} ({suggestion})");
                    }
                    msg
                }
                Err(_) => body,
            };
            return Err(ApiError::Api(format!("HTTP {status}: {detail}")));
        }

        serde_json::from_str(&body).map_err(|e: serde_json::Error| ApiError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_normalized() {
        let client = BillingClient::new("http://localhost:8000/api/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn signature_request_serialization() {
        let req = SignatureValidationRequest {
            xml_content: "<Invoice/>".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"xml_content":"<Invoice/>"}"#);
    }
}
