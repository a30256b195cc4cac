//! Storage domain - process-lifetime collections behind a generic trait

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use repository::{Mutation, Storage};
