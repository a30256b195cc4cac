//! Staking history domain

mod entity;

pub use entity::{StakeRequest, StakingEvent, StakingEventId, StakingEventKind, StakingSummary};
