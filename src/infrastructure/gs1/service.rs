//! GS1 digital link and QR code actions

use serde::Serialize;
use tracing::debug;

use super::qr::QrRenderer;
use crate::domain::DomainError;
use crate::domain::gs1::{
    DigitalLinkRequest, QrCodeRequest, anchored_url, generate_digital_link_with_base,
    has_valid_check_digit,
};
use crate::infrastructure::latency::LatencySimulator;

/// Digital link response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalLinkResult {
    pub digital_link: String,
    pub check_digit_valid: bool,
}

/// QR code response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeResult {
    pub digital_link: String,
    /// The URL actually encoded, including verification parameters
    pub qr_url: String,
    pub data_url: String,
    pub size: u32,
}

/// Builds digital links against the configured resolver
#[derive(Debug, Clone)]
pub struct Gs1Service {
    resolver_base_url: String,
    renderer: QrRenderer,
    latency: LatencySimulator,
}

impl Gs1Service {
    pub fn new(resolver_base_url: impl Into<String>, latency: LatencySimulator) -> Self {
        Self {
            resolver_base_url: resolver_base_url.into(),
            renderer: QrRenderer::new(),
            latency,
        }
    }

    pub fn digital_link(&self, request: &DigitalLinkRequest) -> Result<DigitalLinkResult, DomainError> {
        let digital_link = generate_digital_link_with_base(request, &self.resolver_base_url)?;
        let check_digit_valid = has_valid_check_digit(&request.gtin);

        debug!(
            gtin = %request.gtin,
            check_digit_valid,
            link = %digital_link,
            "Generated digital link"
        );

        Ok(DigitalLinkResult {
            digital_link,
            check_digit_valid,
        })
    }

    pub async fn qr_code(&self, request: &QrCodeRequest) -> Result<QrCodeResult, DomainError> {
        let digital_link = generate_digital_link_with_base(&request.link, &self.resolver_base_url)?;
        let qr_url = anchored_url(request, &self.resolver_base_url)?;

        let renderer = match request.size {
            Some(size) => self.renderer.with_size(size),
            None => self.renderer,
        };

        self.latency.pause().await;

        let data_url = renderer.render_data_url(&qr_url)?;

        debug!(gtin = %request.link.gtin, qr_url = %qr_url, "Rendered QR code");

        Ok(QrCodeResult {
            digital_link,
            qr_url,
            data_url,
            size: renderer.size(),
        })
    }
}
