//! API key infrastructure: token generation and the key actions

mod generator;
mod service;

pub use generator::{ApiKeyGenerator, GeneratedApiKey};
pub use service::{ApiKeyService, CreatedApiKey};
