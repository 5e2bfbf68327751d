//! Well-known role name constants.
//!
//! These are the values stored in `users.role` and carried in the JWT.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_INITIATOR: &str = "initiator";
pub const ROLE_ALLOCATOR: &str = "allocator";
pub const ROLE_INVESTIGATOR: &str = "investigator";
pub const ROLE_REGIONAL_INVESTIGATOR: &str = "regional_investigator";
pub const ROLE_REVIEWER: &str = "reviewer";
pub const ROLE_APPROVER: &str = "approver";
pub const ROLE_LEGAL_REVIEWER: &str = "legal_reviewer";
pub const ROLE_ACTIONER: &str = "actioner";

pub const ALL_ROLES: [&str; 9] = [
    ROLE_ADMIN,
    ROLE_INITIATOR,
    ROLE_ALLOCATOR,
    ROLE_INVESTIGATOR,
    ROLE_REGIONAL_INVESTIGATOR,
    ROLE_REVIEWER,
    ROLE_APPROVER,
    ROLE_LEGAL_REVIEWER,
    ROLE_ACTIONER,
];

pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}

/// Whether `role` may act where `allowed` roles are required. Admin always may.
pub fn role_permits(role: &str, allowed: &[&str]) -> bool {
    role == ROLE_ADMIN || allowed.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_always_permitted() {
        assert!(role_permits(ROLE_ADMIN, &[ROLE_ACTIONER]));
        assert!(role_permits(ROLE_ADMIN, &[]));
    }

    #[test]
    fn other_roles_need_to_be_listed() {
        assert!(role_permits(ROLE_APPROVER, &[ROLE_REVIEWER, ROLE_APPROVER]));
        assert!(!role_permits(ROLE_INITIATOR, &[ROLE_APPROVER]));
    }

    #[test]
    fn role_names_are_validated() {
        assert!(is_valid_role("legal_reviewer"));
        assert!(!is_valid_role("Legal Reviewer"));
        assert!(!is_valid_role("superuser"));
    }
}
