//! Wire types for the backend billing API.
//!
//! Field names mirror the backend's JSON exactly (snake_case). Monetary
//! values arrive as JSON numbers with 2 fractional digits and are
//! decoded into [`Decimal`]; tax categories travel as the literal
//! strings `"S"`, `"E"`, `"O"`, `"Z"`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{DocumentType, ProcessingStatus};

/// Envelope discriminator used across backend responses.
///
/// `Warning` marks degraded-but-usable outcomes, e.g. a SUNAT 401 with
/// test credentials: the document was generated and signed correctly,
/// only the submission leg failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Server-computed document totals.
///
/// Authoritative over the client-side estimate once a document exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalsPayload {
    /// Total operaciones gravadas.
    #[serde(default)]
    pub total_taxed_amount: Decimal,
    /// Total operaciones exoneradas.
    #[serde(default)]
    pub total_exempt_amount: Decimal,
    /// Total operaciones inafectas (omitted by some endpoints).
    #[serde(default)]
    pub total_unaffected_amount: Decimal,
    /// Total operaciones gratuitas.
    #[serde(default)]
    pub total_free_amount: Decimal,
    /// IGV amount.
    #[serde(default)]
    pub igv_amount: Decimal,
    /// Percepción amount.
    #[serde(default)]
    pub perception_amount: Decimal,
    /// Importe total.
    #[serde(default)]
    pub total_amount: Decimal,
}

/// Response of `POST /create-test-scenarios/`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestScenarioResponse {
    pub status: ApiStatus,
    pub message: String,
    pub invoice_id: i64,
    /// Full document name, e.g. "20123456789-03-B001-00000007".
    pub invoice_reference: String,
    /// Correlative assigned within the series.
    #[serde(default)]
    pub number_generated: Option<u32>,
    pub totals: TotalsPayload,
}

/// Response of `POST /invoice/{id}/convert-ubl/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertUblResponse {
    pub status: ApiStatus,
    pub message: String,
    pub invoice_id: i64,
    pub xml_filename: String,
    pub xml_path: String,
    /// First 500 characters of the generated XML.
    #[serde(default)]
    pub preview: Option<String>,
}

/// X.509 certificate details reported by the signer.
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateInfo {
    /// RUC of the certificate subject.
    #[serde(default)]
    pub ruc: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub is_valid: bool,
    #[serde(default)]
    pub not_valid_before: Option<String>,
    #[serde(default)]
    pub not_valid_after: Option<String>,
}

/// Response of `POST /invoice/{id}/sign/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SignResponse {
    pub status: ApiStatus,
    pub message: String,
    pub invoice_id: i64,
    pub signed_xml_path: String,
    pub zip_path: String,
    #[serde(default)]
    pub certificate_info: Option<CertificateInfo>,
}

/// Response of `POST /invoice/{id}/send-sunat/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendToSunatResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub message: Option<String>,
    /// Raw SUNAT web-service response (shape varies by outcome).
    #[serde(default)]
    pub sunat_response: Option<serde_json::Value>,
    #[serde(default)]
    pub suggestion: Option<String>,
}

/// One step of the complete processing flow.
#[derive(Debug, Clone, Deserialize)]
pub struct StepResult {
    /// Step identifier: "ubl_conversion", "digital_signature",
    /// "sunat_submission".
    pub step: String,
    pub status: ApiStatus,
    pub message: String,
}

/// Response of `POST /invoice/{id}/process-complete/`
/// (UBL → sign → SUNAT in one call).
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessCompleteResponse {
    pub invoice_id: i64,
    pub steps: Vec<StepResult>,
    /// "success", "success_with_warnings", or "error".
    #[serde(default)]
    pub overall_status: Option<String>,
}

/// Artifact paths recorded for a document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSet {
    #[serde(default)]
    pub xml_file: Option<String>,
    #[serde(default)]
    pub zip_file: Option<String>,
    #[serde(default)]
    pub cdr_file: Option<String>,
}

/// SUNAT submission details recorded for a document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SunatInfo {
    #[serde(default)]
    pub ticket: Option<String>,
    #[serde(default)]
    pub response_code: Option<String>,
    #[serde(default)]
    pub response_description: Option<String>,
}

/// Response of `GET /invoice/{id}/status/`.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceStatusResponse {
    pub invoice_id: i64,
    pub document_reference: String,
    pub status: ProcessingStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub files: FileSet,
    #[serde(default)]
    pub sunat_info: SunatInfo,
    #[serde(default)]
    pub totals: Option<TotalsPayload>,
}

/// Response of `POST /invoice/{id}/check-status/` (ticket polling).
#[derive(Debug, Clone, Deserialize)]
pub struct TicketStatusResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub message: Option<String>,
    pub invoice_id: i64,
    /// "completed", "in_progress", or "error".
    #[serde(default)]
    pub processing_status: Option<String>,
    /// Raw SUNAT status payload.
    #[serde(default)]
    pub sunat_response: Option<serde_json::Value>,
    /// Document status after the poll.
    #[serde(default)]
    pub invoice_status: Option<ProcessingStatus>,
}

/// One document row of `GET /documents/`.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSummary {
    pub id: i64,
    pub document_type: DocumentType,
    pub document_reference: String,
    pub series: String,
    pub number: u32,
    pub customer_name: String,
    pub total_amount: Decimal,
    pub status: ProcessingStatus,
    pub created_at: String,
    pub issue_date: String,
    /// Artifact presence flags.
    pub xml_file: bool,
    pub zip_file: bool,
    pub cdr_file: bool,
}

/// Response of `GET /documents/`.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentListResponse {
    pub status: ApiStatus,
    pub results: Vec<DocumentSummary>,
    pub count: usize,
}

/// One entry inside a ZIP artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct ZipEntry {
    pub filename: String,
    pub size: u64,
    #[serde(default)]
    pub date: Option<String>,
}

/// Response of `GET /file-content/?path=…` for XML, ZIP, and CDR
/// artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct FileContentResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub message: Option<String>,
    /// Text content, or base64 when `encoding` says so.
    #[serde(default)]
    pub content: Option<String>,
    /// "xml", "zip", or "binary".
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    /// Whether the XML carries an enveloped signature.
    #[serde(default)]
    pub is_signed: bool,
    /// ZIP directory listing.
    #[serde(default)]
    pub contents: Option<Vec<ZipEntry>>,
    /// XML extracted from inside a ZIP/CDR.
    #[serde(default)]
    pub xml_content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Request body of `POST /validate-signature/`.
#[derive(Debug, Clone, Serialize)]
pub struct SignatureValidationRequest {
    pub xml_content: String,
}

/// Technical details of a signature validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationDetails {
    pub has_signature: bool,
    pub signature_algorithm: String,
    pub canonicalization: String,
}

/// Response of `POST /validate-signature/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SignatureValidationResponse {
    pub status: ApiStatus,
    pub is_valid: bool,
    pub message: String,
    #[serde(default)]
    pub certificate_info: Option<CertificateInfo>,
    pub validation_details: ValidationDetails,
}

/// Response of `GET /test-sunat-connection/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionTestResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub message: Option<String>,
    /// "BETA" or "PRODUCCIÓN".
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
}

/// Error envelope the backend returns with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
}
