//! Staking ledger events
//!
//! The ledger is append-only; balances are always derived from the events.

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::storage::{StorageEntity, StorageKey};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StakingEventId(String);

impl StakingEventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("stk_{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageKey for StakingEventId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakingEventKind {
    Stake,
    Unstake,
    ClaimRewards,
}

impl std::fmt::Display for StakingEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stake => write!(f, "stake"),
            Self::Unstake => write!(f, "unstake"),
            Self::ClaimRewards => write!(f, "claim_rewards"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakingEvent {
    id: StakingEventId,
    kind: StakingEventKind,
    /// Token amount in whole units
    amount: u64,
    timestamp: DateTime<Utc>,
    /// Mock transaction hash, `0x` + 64 hex chars
    tx_hash: String,
}

impl StakingEvent {
    pub fn new(kind: StakingEventKind, amount: u64) -> Self {
        let mut hash = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut hash);

        Self {
            id: StakingEventId::generate(),
            kind,
            amount,
            timestamp: Utc::now(),
            tx_hash: format!("0x{}", hex::encode(hash)),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn id(&self) -> &StakingEventId {
        &self.id
    }

    pub fn kind(&self) -> StakingEventKind {
        self.kind
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn tx_hash(&self) -> &str {
        &self.tx_hash
    }
}

impl StorageEntity for StakingEvent {
    type Key = StakingEventId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Balances derived from a ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingSummary {
    pub staked: u64,
    pub rewards_claimed: u64,
    pub event_count: usize,
}

impl StakingSummary {
    pub fn from_events(events: &[StakingEvent]) -> Self {
        events.iter().fold(Self::default(), |mut summary, event| {
            match event.kind {
                StakingEventKind::Stake => summary.staked = summary.staked.saturating_add(event.amount),
                StakingEventKind::Unstake => summary.staked = summary.staked.saturating_sub(event.amount),
                StakingEventKind::ClaimRewards => {
                    summary.rewards_claimed = summary.rewards_claimed.saturating_add(event.amount)
                }
            }
            summary.event_count += 1;
            summary
        })
    }

    /// Reward claimable on the current stake at `rate_bps` basis points
    ///
    /// Saturates at `u64::MAX` for rates above 100%.
    pub fn claimable(&self, rate_bps: u32) -> u64 {
        let reward = u128::from(self.staked) * u128::from(rate_bps) / 10_000;
        u64::try_from(reward).unwrap_or(u64::MAX)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StakeRequest {
    #[validate(range(min = 1, message = "Amount must be at least 1"))]
    pub amount: u64,
}
