//! Digital link command - builds GS1 Digital Links without starting the server

use clap::Args;

use crate::config::AppConfig;
use crate::domain::gs1::{DigitalLinkRequest, QrCodeRequest};
use crate::infrastructure::gs1::Gs1Service;
use crate::infrastructure::latency::LatencySimulator;
use crate::infrastructure::logging::init_cli_logging;

#[derive(Args, Debug, Clone)]
pub struct DigitalLinkArgs {
    /// GTIN-8, -12, -13 or -14
    #[arg(long)]
    pub gtin: String,

    /// Serial number (AI 21)
    #[arg(long)]
    pub serial: Option<String>,

    /// Batch / lot number (AI 10)
    #[arg(long)]
    pub lot: Option<String>,

    /// Resolver base URL, overrides gs1.resolver_base_url
    #[arg(long)]
    pub base_url: Option<String>,

    /// Also print the QR code as an SVG data URL
    #[arg(long)]
    pub qr: bool,

    /// Verification id embedded in the QR URL
    #[arg(long, requires = "qr")]
    pub verification_id: Option<String>,

    /// Anchoring transaction hash embedded in the QR URL
    #[arg(long, requires = "qr")]
    pub anchor_tx: Option<String>,

    /// Chain name embedded in the QR URL
    #[arg(long, requires = "qr")]
    pub chain: Option<String>,
}

impl DigitalLinkArgs {
    fn link_request(&self) -> DigitalLinkRequest {
        DigitalLinkRequest {
            gtin: self.gtin.clone(),
            serial_number: self.serial.clone(),
            lot_number: self.lot.clone(),
            base_url: self.base_url.clone(),
        }
    }

    fn qr_request(&self) -> QrCodeRequest {
        QrCodeRequest {
            link: self.link_request(),
            verification_id: self.verification_id.clone(),
            anchor_tx: self.anchor_tx.clone(),
            chain: self.chain.clone(),
            size: None,
        }
    }
}

pub async fn run(args: DigitalLinkArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_cli_logging();

    let config = AppConfig::load().unwrap_or_default();
    let service = Gs1Service::new(config.gs1.resolver_base_url, LatencySimulator::none());

    for line in render(&service, &args).await? {
        println!("{}", line);
    }

    Ok(())
}

async fn render(service: &Gs1Service, args: &DigitalLinkArgs) -> anyhow::Result<Vec<String>> {
    let link = service.digital_link(&args.link_request())?;
    let mut lines = vec![link.digital_link];

    if !link.check_digit_valid {
        tracing::warn!(gtin = %args.gtin, "GTIN check digit does not validate");
    }

    if args.qr {
        let qr = service.qr_code(&args.qr_request()).await?;
        lines.push(qr.data_url);
    }

    Ok(lines)
}
