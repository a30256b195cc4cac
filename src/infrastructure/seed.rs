//! Demo records for the mock repositories

use chrono::{Duration, Utc};

use super::api_key::ApiKeyGenerator;
use crate::domain::DomainError;
use crate::domain::api_key::{ApiKey, ApiKeyId};
use crate::domain::credential::{CredentialId, CredentialStatus, IssuedCredential};
use crate::domain::did::{Did, DidDocument, VerificationMethod};
use crate::domain::staking::{StakingEvent, StakingEventKind};
use crate::domain::team::{MemberStatus, TeamMember, TeamMemberId, TeamRole};

const ORG_KEY_MULTIBASE: &str = "z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK";

/// Initial contents of every repository
#[derive(Debug, Default)]
pub struct SeedData {
    pub api_keys: Vec<ApiKey>,
    pub dids: Vec<DidDocument>,
    pub team_members: Vec<TeamMember>,
    pub credentials: Vec<IssuedCredential>,
    pub staking_events: Vec<StakingEvent>,
}

impl SeedData {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The platform's demo organization, keyed to `did_domain`
    pub fn demo(did_domain: &str) -> Result<Self, DomainError> {
        let org_did = Did::parse(format!("did:web:{}", did_domain))?;

        Ok(Self {
            api_keys: demo_api_keys()?,
            dids: vec![demo_org_did(&org_did)],
            team_members: demo_team(did_domain),
            credentials: vec![demo_credential(&org_did)],
            staking_events: demo_staking_history(),
        })
    }
}

fn demo_api_keys() -> Result<Vec<ApiKey>, DomainError> {
    let now = Utc::now();
    let generator = ApiKeyGenerator::live();

    let production = generator.generate();
    let production = ApiKey::new(
        ApiKeyId::generate(),
        "Production ERP Integration",
        production.hash,
        production.prefix,
    )
    .with_permissions(vec!["passports:read".to_string(), "passports:write".to_string()])
    .with_created_at(now - Duration::days(45))
    .with_last_used_at(now - Duration::hours(6));

    let legacy = generator.generate();
    let mut legacy = ApiKey::new(
        ApiKeyId::generate(),
        "Legacy Supplier Portal",
        legacy.hash,
        legacy.prefix,
    )
    .with_permissions(vec!["passports:read".to_string()])
    .with_created_at(now - Duration::days(120))
    .with_last_used_at(now - Duration::days(40));
    legacy.revoke()?;

    Ok(vec![production, legacy])
}

fn demo_org_did(org_did: &Did) -> DidDocument {
    let method = VerificationMethod::ed25519(org_did, "key-1", ORG_KEY_MULTIBASE);

    DidDocument::new(org_did.clone(), "Norruva Organization", method)
        .with_created(Utc::now() - Duration::days(180))
}

fn demo_team(did_domain: &str) -> Vec<TeamMember> {
    let now = Utc::now();

    vec![
        TeamMember::invited(
            TeamMemberId::generate(),
            "Elena Fischer",
            format!("elena.fischer@{}", did_domain),
            TeamRole::Admin,
        )
        .with_status(MemberStatus::Active)
        .with_joined_date(now - Duration::days(180))
        .with_last_login(now - Duration::hours(2)),
        TeamMember::invited(
            TeamMemberId::generate(),
            "Marco Rossi",
            format!("marco.rossi@{}", did_domain),
            TeamRole::Editor,
        )
        .with_status(MemberStatus::Active)
        .with_joined_date(now - Duration::days(90))
        .with_last_login(now - Duration::days(1)),
        TeamMember::invited(
            TeamMemberId::generate(),
            "Priya Nair",
            format!("priya.nair@{}", did_domain),
            TeamRole::Auditor,
        )
        .with_joined_date(now - Duration::days(3)),
    ]
}

fn demo_credential(org_did: &Did) -> IssuedCredential {
    IssuedCredential::new(
        CredentialId::generate(),
        "ProductComplianceCredential",
        org_did.as_str(),
        "DPP001",
        CredentialStatus::Valid,
    )
    .with_issuance_date(Utc::now() - Duration::days(30))
}

fn demo_staking_history() -> Vec<StakingEvent> {
    let now = Utc::now();

    vec![
        StakingEvent::new(StakingEventKind::Stake, 5_000).with_timestamp(now - Duration::days(60)),
        StakingEvent::new(StakingEventKind::ClaimRewards, 250)
            .with_timestamp(now - Duration::days(30)),
        StakingEvent::new(StakingEventKind::Stake, 2_500).with_timestamp(now - Duration::days(7)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::ApiKeyStatus;
    use crate::domain::staking::StakingSummary;

    #[test]
    fn test_demo_contents() {
        let seed = SeedData::demo("norruva.com").unwrap();

        assert_eq!(seed.api_keys.len(), 2);
        assert_eq!(seed.api_keys[1].status(), ApiKeyStatus::Revoked);
        assert_eq!(seed.dids[0].id().as_str(), "did:web:norruva.com");
        assert_eq!(seed.team_members.len(), 3);
        assert_eq!(seed.team_members[2].status(), MemberStatus::Pending);
        assert_eq!(seed.credentials[0].issuer(), "did:web:norruva.com");

        let summary = StakingSummary::from_events(&seed.staking_events);
        assert_eq!(summary.staked, 7_500);
        assert_eq!(summary.rewards_claimed, 250);
    }

    #[test]
    fn test_team_emails_are_unique() {
        let seed = SeedData::demo("norruva.com").unwrap();
        let members = &seed.team_members;

        for (i, member) in members.iter().enumerate() {
            assert!(!members[i + 1..].iter().any(|m| m.has_email(member.email())));
        }
    }

    #[test]
    fn test_invalid_domain_rejected() {
        assert!(SeedData::demo("bad domain").is_err());
    }
}
