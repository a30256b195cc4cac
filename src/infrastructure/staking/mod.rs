//! Staking actions

mod service;

pub use service::StakingService;
