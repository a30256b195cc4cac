//! Issued credential domain

mod entity;
mod validation;
mod verifiable;

pub use entity::{CredentialId, CredentialStatus, IssuedCredential};
pub use validation::IssueCredentialRequest;
pub use verifiable::{MOCK_CRYPTOSUITE, VC_CONTEXT, to_verifiable_credential};
