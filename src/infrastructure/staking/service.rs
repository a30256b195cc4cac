//! Staking service
//!
//! Appends stake, unstake and reward events to the mock ledger. Ledger
//! writes are serialized so balance checks and appends cannot interleave.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::domain::staking::{StakeRequest, StakingEvent, StakingEventKind, StakingSummary};
use crate::domain::storage::Storage;
use crate::domain::validation::validate_request;
use crate::domain::DomainError;
use crate::infrastructure::latency::LatencySimulator;

#[derive(Debug)]
pub struct StakingService {
    storage: Arc<dyn Storage<StakingEvent>>,
    reward_rate_bps: u32,
    latency: LatencySimulator,
    write_lock: Mutex<()>,
}

impl StakingService {
    pub fn new(
        storage: Arc<dyn Storage<StakingEvent>>,
        reward_rate_bps: u32,
        latency: LatencySimulator,
    ) -> Self {
        Self {
            storage,
            reward_rate_bps,
            latency,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn stake(&self, request: StakeRequest) -> Result<StakingEvent, DomainError> {
        validate_request(&request)?;
        self.latency.pause().await;

        let _guard = self.write_lock.lock().await;
        let summary = self.current_summary().await?;

        if summary.staked.checked_add(request.amount).is_none() {
            return Err(DomainError::invalid_field(
                "amount",
                format!(
                    "Cannot stake {} tokens, the staked balance of {} would overflow",
                    request.amount, summary.staked
                ),
            ));
        }

        self.append(StakingEventKind::Stake, request.amount).await
    }

    pub async fn unstake(&self, request: StakeRequest) -> Result<StakingEvent, DomainError> {
        validate_request(&request)?;
        self.latency.pause().await;

        let _guard = self.write_lock.lock().await;
        let summary = self.current_summary().await?;

        if request.amount > summary.staked {
            return Err(DomainError::invalid_field(
                "amount",
                format!(
                    "Cannot unstake {} tokens, only {} staked",
                    request.amount, summary.staked
                ),
            ));
        }

        self.append(StakingEventKind::Unstake, request.amount).await
    }

    pub async fn claim_rewards(&self) -> Result<StakingEvent, DomainError> {
        self.latency.pause().await;

        let _guard = self.write_lock.lock().await;
        let reward = self.current_summary().await?.claimable(self.reward_rate_bps);

        if reward == 0 {
            return Err(DomainError::validation("No rewards available to claim"));
        }

        self.append(StakingEventKind::ClaimRewards, reward).await
    }

    /// Number of records, also used as a readiness probe
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }

    /// Ledger events, newest first
    pub async fn history(&self) -> Result<Vec<StakingEvent>, DomainError> {
        self.latency.pause().await;

        let mut events = self.storage.list().await?;
        events.reverse();
        Ok(events)
    }

    pub async fn summary(&self) -> Result<StakingSummary, DomainError> {
        self.latency.pause().await;
        self.current_summary().await
    }

    async fn current_summary(&self) -> Result<StakingSummary, DomainError> {
        Ok(StakingSummary::from_events(&self.storage.list().await?))
    }

    async fn append(&self, kind: StakingEventKind, amount: u64) -> Result<StakingEvent, DomainError> {
        let event = self.storage.create(StakingEvent::new(kind, amount)).await?;

        info!(kind = %kind, amount = amount, tx_hash = %event.tx_hash(), "Recorded staking event");
        Ok(event)
    }
}
