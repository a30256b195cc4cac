//! Action envelope types
//!
//! Every action answers `{ success, data?, message?, errors? }`.

pub mod envelope;
pub mod error;
pub mod json;

pub use envelope::{ActionResponse, ActionResult, Envelope};
pub use error::ActionError;
pub use json::Json;
