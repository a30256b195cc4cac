//! GS1 Digital Link and QR code rendering

mod qr;
mod service;

pub use qr::{QrRenderer, DEFAULT_QR_SIZE};
pub use service::{DigitalLinkResult, Gs1Service, QrCodeResult};
