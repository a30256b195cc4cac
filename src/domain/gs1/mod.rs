//! GS1 Digital Link domain

mod digital_link;
mod gtin;

pub use digital_link::{
    DEFAULT_RESOLVER, DigitalLinkRequest, QrCodeRequest, anchored_url, generate_digital_link,
    generate_digital_link_with_base,
};
pub use gtin::{compute_check_digit, has_valid_check_digit, validate_gtin_format};
