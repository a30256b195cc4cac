//! W3C Verifiable Credential rendering
//!
//! The proof is a placeholder: `proofValue` is the hex SHA-256 digest of
//! the unsigned credential JSON, not a signature. It lets clients detect
//! accidental edits and nothing more.

use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use super::entity::IssuedCredential;

pub const VC_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Cryptosuite name advertised on mock proofs
pub const MOCK_CRYPTOSUITE: &str = "norruva-mock-sha256";

/// Render a credential record as VC JSON with a mock proof
///
/// `verification_method` is the issuer key reference placed in the proof.
pub fn to_verifiable_credential(credential: &IssuedCredential, verification_method: &str) -> Value {
    let mut vc = json!({
        "@context": [VC_CONTEXT],
        "id": credential.id().as_str(),
        "type": ["VerifiableCredential", credential.credential_type()],
        "issuer": credential.issuer(),
        "issuanceDate": credential.issuance_date().to_rfc3339(),
        "credentialSubject": {
            "id": format!("urn:norruva:dpp:{}", credential.subject_dpp_id()),
            "productPassportId": credential.subject_dpp_id(),
        },
        "credentialStatus": {
            "type": "NorruvaCredentialStatus",
            "status": credential.status().to_string(),
        },
    });

    let digest = Sha256::digest(vc.to_string().as_bytes());

    vc["proof"] = json!({
        "type": "DataIntegrityProof",
        "cryptosuite": MOCK_CRYPTOSUITE,
        "created": credential.issuance_date().to_rfc3339(),
        "verificationMethod": verification_method,
        "proofPurpose": "assertionMethod",
        "proofValue": hex::encode(digest),
    });

    vc
}
