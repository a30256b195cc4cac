//! GS1 Digital Link URI construction
//!
//! Links take the form `<resolver>/01/<gtin>[/21/<serial>][/10/<lot>]`.
//! Application identifiers always appear in that order; serial and lot are
//! percent-encoded as single path segments.

use serde::Deserialize;
use url::Url;
use validator::Validate;

use super::gtin::validate_gtin_format;
use crate::domain::validation::validate_request;
use crate::domain::DomainError;

/// The GS1 global resolver
pub const DEFAULT_RESOLVER: &str = "https://id.gs1.org";

const AI_GTIN: &str = "01";
const AI_SERIAL: &str = "21";
const AI_LOT: &str = "10";

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DigitalLinkRequest {
    #[validate(custom(function = "validate_gtin_format"))]
    #[serde(default)]
    pub gtin: String,

    #[validate(length(max = 20, message = "Serial number must be at most 20 characters"))]
    #[serde(default)]
    pub serial_number: Option<String>,

    #[validate(length(max = 20, message = "Lot number must be at most 20 characters"))]
    #[serde(default)]
    pub lot_number: Option<String>,

    /// Resolver base URL; the configured resolver when absent
    #[serde(default)]
    pub base_url: Option<String>,
}

impl DigitalLinkRequest {
    pub fn new(gtin: impl Into<String>) -> Self {
        Self {
            gtin: gtin.into(),
            ..Default::default()
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn with_lot(mut self, lot: impl Into<String>) -> Self {
        self.lot_number = Some(lot.into());
        self
    }
}

/// Digital link plus the verification / anchoring parameters embedded in QR codes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeRequest {
    #[serde(flatten)]
    pub link: DigitalLinkRequest,

    #[serde(default)]
    pub verification_id: Option<String>,

    /// Transaction hash anchoring the passport on chain
    #[serde(default)]
    pub anchor_tx: Option<String>,

    #[serde(default)]
    pub chain: Option<String>,

    /// Side length in pixels of the rendered code
    #[serde(default)]
    pub size: Option<u32>,
}

/// Build a digital link against the request's base URL or the GS1 resolver
pub fn generate_digital_link(request: &DigitalLinkRequest) -> Result<String, DomainError> {
    let base = request.base_url.as_deref().unwrap_or(DEFAULT_RESOLVER);
    generate_digital_link_with_base(request, base)
}

/// Build a digital link against `default_base` unless the request names one
pub fn generate_digital_link_with_base(
    request: &DigitalLinkRequest,
    default_base: &str,
) -> Result<String, DomainError> {
    Ok(build_url(request, default_base)?.to_string())
}

/// The digital link with verification and anchoring query parameters
pub fn anchored_url(request: &QrCodeRequest, default_base: &str) -> Result<String, DomainError> {
    let mut url = build_url(&request.link, default_base)?;

    let params = [
        ("verificationId", &request.verification_id),
        ("anchorTx", &request.anchor_tx),
        ("chain", &request.chain),
    ];

    let present: Vec<(&str, &str)> = params
        .iter()
        .filter_map(|(name, value)| non_empty(value).map(|v| (*name, v)))
        .collect();

    if !present.is_empty() {
        url.query_pairs_mut().extend_pairs(present);
    }

    Ok(url.to_string())
}

fn build_url(request: &DigitalLinkRequest, default_base: &str) -> Result<Url, DomainError> {
    validate_request(request)?;

    let base = non_empty(&request.base_url).unwrap_or(default_base);
    let mut url = Url::parse(base.trim())
        .map_err(|e| DomainError::invalid_field("base_url", format!("Invalid base URL '{}': {}", base, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(DomainError::invalid_field(
            "base_url",
            format!("Base URL must be http or https, got '{}'", url.scheme()),
        ));
    }

    url.set_query(None);
    url.set_fragment(None);

    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            DomainError::invalid_field("base_url", format!("Base URL '{}' cannot take a path", base))
        })?;

        segments.pop_if_empty().push(AI_GTIN).push(request.gtin.trim());

        if let Some(serial) = non_empty(&request.serial_number) {
            segments.push(AI_SERIAL).push(serial);
        }

        if let Some(lot) = non_empty(&request.lot_number) {
            segments.push(AI_LOT).push(lot);
        }
    }

    Ok(url)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
