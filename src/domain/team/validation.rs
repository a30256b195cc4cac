//! Team request validation

use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::entity::TeamRole;
use crate::domain::validation::validate_trimmed_length;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteTeamMemberRequest {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub role: TeamRole,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTeamRoleRequest {
    pub role: TeamRole,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    validate_trimmed_length(name, 2, 100, "Name must be between 2 and 100 characters")
}
