//! Infrastructure layer - Services over the mock repositories and external checkers

pub mod api_key;
pub mod compliance;
pub mod credential;
pub mod did;
pub mod gs1;
pub mod latency;
pub mod logging;
pub mod seed;
pub mod staking;
pub mod storage;
pub mod team;
