//! Role names understood by the authorization layer.

/// Full access, including create and delete of catalog entries
pub const ADMINISTRATOR: &str = "Administrator";

/// Regular authenticated user
pub const USER: &str = "User";

/// Roles seeded into every store
pub const DEFAULT_ROLES: [&str; 2] = [ADMINISTRATOR, USER];

/// Uppercased form used for case-insensitive lookups
pub fn normalize(role: &str) -> String {
    role.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" administrator "), "ADMINISTRATOR");
        assert_eq!(normalize(USER), "USER");
    }
}
