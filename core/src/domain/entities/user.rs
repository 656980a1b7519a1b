//! Identity user of the hotel listing API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered API user; the email doubles as the user name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUser {
    pub id: Uuid,

    pub email: String,

    pub first_name: Option<String>,

    pub last_name: Option<String>,

    pub phone_number: Option<String>,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Changes whenever credentials or sessions are invalidated
    pub security_stamp: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl ApiUser {
    /// Creates a new user with a fresh id and security stamp
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into().trim().to_string(),
            first_name: None,
            last_name: None,
            phone_number: None,
            password_hash: password_hash.into(),
            security_stamp: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_profile(
        mut self,
        first_name: Option<String>,
        last_name: Option<String>,
        phone_number: Option<String>,
    ) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self.phone_number = phone_number;
        self
    }

    /// User name used as the token subject
    pub fn user_name(&self) -> &str {
        &self.email
    }

    /// Uppercased email used for unique, case-insensitive lookup
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }

    /// Rotates the security stamp
    pub fn rotate_security_stamp(&mut self) {
        self.security_stamp = Uuid::new_v4().to_string();
        self.updated_at = Utc::now();
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = ApiUser::new(" guest@hotels.test ", "$2b$hash");
        assert_eq!(user.email, "guest@hotels.test");
        assert_eq!(user.user_name(), "guest@hotels.test");
        assert_eq!(user.normalized_email(), "GUEST@HOTELS.TEST");
        assert!(user.first_name.is_none());
    }

    #[test]
    fn test_rotate_security_stamp() {
        let mut user = ApiUser::new("guest@hotels.test", "hash");
        let stamp = user.security_stamp.clone();
        user.rotate_security_stamp();
        assert_ne!(user.security_stamp, stamp);
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = ApiUser::new("guest@hotels.test", "secret-hash")
            .with_profile(Some("Ada".into()), None, None);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("Ada"));
    }
}
