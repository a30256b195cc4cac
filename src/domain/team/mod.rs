//! Team roster domain

mod entity;
mod validation;

pub use entity::{MemberStatus, TeamMember, TeamMemberId, TeamRole};
pub use validation::{InviteTeamMemberRequest, UpdateTeamRoleRequest};
