//! DID document actions

mod service;

pub use service::DidService;
