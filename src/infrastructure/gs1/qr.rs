//! SVG QR rendering

use base64::{Engine as _, engine::general_purpose::STANDARD};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

use crate::domain::DomainError;

pub const DEFAULT_QR_SIZE: u32 = 256;
const MIN_QR_SIZE: u32 = 64;
const MAX_QR_SIZE: u32 = 2048;

const SVG_DATA_URL_PREFIX: &str = "data:image/svg+xml;base64,";

/// Renders text as an SVG QR code wrapped in a data URL
#[derive(Debug, Clone, Copy)]
pub struct QrRenderer {
    size: u32,
    ec_level: EcLevel,
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self {
            size: DEFAULT_QR_SIZE,
            ec_level: EcLevel::M,
        }
    }
}

impl QrRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Raw SVG markup for `data`
    pub fn render_svg(&self, data: &str) -> Result<String, DomainError> {
        if !(MIN_QR_SIZE..=MAX_QR_SIZE).contains(&self.size) {
            return Err(DomainError::invalid_field(
                "size",
                format!(
                    "QR size must be between {} and {} pixels",
                    MIN_QR_SIZE, MAX_QR_SIZE
                ),
            ));
        }

        let code = QrCode::with_error_correction_level(data.as_bytes(), self.ec_level)
            .map_err(|e| DomainError::invalid_field("url", format!("Cannot encode QR code: {}", e)))?;

        Ok(code
            .render::<svg::Color>()
            .min_dimensions(self.size, self.size)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build())
    }

    /// `data:image/svg+xml;base64,...` URL for `data`
    pub fn render_data_url(&self, data: &str) -> Result<String, DomainError> {
        let svg = self.render_svg(data)?;
        Ok(format!("{}{}", SVG_DATA_URL_PREFIX, STANDARD.encode(svg)))
    }
}
