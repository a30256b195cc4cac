//! Decentralized identifier domain

mod entity;
mod validation;

pub use entity::{Did, DidDocument, DidStatus, VerificationMethod, DID_CONTEXT};
pub use validation::{CreateDidRequest, UpdateDidAliasRequest, slugify};
