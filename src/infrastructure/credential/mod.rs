//! Credential issuance actions

mod service;

pub use service::CredentialService;
