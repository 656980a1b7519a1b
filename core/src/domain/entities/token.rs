//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login provider recorded against stored refresh tokens
pub const REFRESH_TOKEN_PROVIDER: &str = "HotelListingApi";

/// Name under which the refresh token is stored
pub const REFRESH_TOKEN_NAME: &str = "RefreshToken";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user name, which is the user's email)
    pub sub: String,

    /// User ID
    pub uid: String,

    /// Role names granted to the user
    #[serde(default)]
    pub roles: Vec<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token
    pub fn new_access_token(
        user_id: Uuid,
        user_name: impl Into<String>,
        roles: Vec<String>,
        issuer: impl Into<String>,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + lifetime;

        Self {
            sub: user_name.into(),
            uid: user_id.to_string(),
            roles,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Checks if the claims are valid (not expired and after nbf)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.uid)
    }

    /// Whether the role is granted (exact, case-sensitive match)
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Refresh token entity stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// SHA-256 hex digest of the token handed to the client
    pub token_hash: String,

    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked (consumed or invalidated)
    pub is_revoked: bool,
}

impl RefreshToken {
    /// Creates a new refresh token expiring after `lifetime`
    pub fn new(user_id: Uuid, token_hash: String, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + lifetime,
            is_revoked: false,
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// A token is valid if it hasn't expired and hasn't been revoked
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_revoked
    }

    /// Revokes the refresh token
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}
