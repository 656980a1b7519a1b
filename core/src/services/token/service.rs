//! Main token service implementation

use std::sync::Arc;

use chrono::Duration;
use constant_time_eq::constant_time_eq;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::domain::entities::user::ApiUser;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Length of the opaque refresh token handed to clients
const REFRESH_TOKEN_LENGTH: usize = 32;

/// Service for managing JWT access tokens and refresh tokens
pub struct TokenService {
    repository: Arc<dyn TokenRepository>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    /// Same checks as `validation` minus expiry, for the refresh flow
    expired_validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh token persistence
    /// * `config` - Signing key, issuer and lifetimes
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or an internal error when the signing key is empty
    pub fn new(
        repository: Arc<dyn TokenRepository>,
        config: TokenServiceConfig,
    ) -> Result<Self, DomainError> {
        if config.signing_key.trim().is_empty() {
            return Err(DomainError::internal("JWT signing key is not configured"));
        }

        let encoding_key = EncodingKey::from_secret(config.signing_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.signing_key.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_aud = false;
        validation.validate_exp = true;
        validation.validate_nbf = true;

        let mut expired_validation = validation.clone();
        expired_validation.validate_exp = false;
        expired_validation.set_required_spec_claims(&["iss", "sub"]);

        Ok(Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
            expired_validation,
        })
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Access token lifetime in seconds, as reported to clients
    pub fn access_token_lifetime_seconds(&self) -> i64 {
        self.config.access_token_expiry_minutes * 60
    }

    /// Generates a new token pair (access + refresh tokens) for a user
    pub async fn generate_tokens(
        &self,
        user: &ApiUser,
        roles: Vec<String>,
    ) -> Result<TokenPair, DomainError> {
        let access_token = self.generate_access_token(user, roles)?;
        let refresh_token = self.generate_refresh_token(user.id).await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_token_lifetime_seconds(),
        })
    }

    /// Signs an access token carrying the user's name, id and roles
    pub fn generate_access_token(
        &self,
        user: &ApiUser,
        roles: Vec<String>,
    ) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(
            user.id,
            user.user_name(),
            roles,
            self.config.issuer.clone(),
            Duration::minutes(self.config.access_token_expiry_minutes),
        );
        self.encode_jwt(&claims)
    }

    /// Generates a refresh token and stores its hash
    pub async fn generate_refresh_token(&self, user_id: Uuid) -> Result<String, DomainError> {
        let token_string: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(REFRESH_TOKEN_LENGTH)
            .map(char::from)
            .collect();

        let refresh_token = RefreshToken::new(
            user_id,
            Self::hash_token(&token_string),
            Duration::days(self.config.refresh_token_expiry_days),
        );

        self.repository
            .save_refresh_token(refresh_token)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Failed to store refresh token");
                DomainError::Token(TokenError::TokenGenerationFailed)
            })?;

        Ok(token_string)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token and returns the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError)` - Token is invalid, expired, or malformed
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)
    }

    /// Decodes a token whose lifetime may have elapsed.
    ///
    /// Signature and issuer are still checked.
    pub fn decode_expired_token(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.expired_validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)
    }

    /// Consumes a presented refresh token for `user_id`.
    ///
    /// Returns `Ok(true)` only when the token matched one of the user's active
    /// tokens and this call was the one that revoked it.
    pub async fn consume_refresh_token(
        &self,
        user_id: Uuid,
        refresh_token: &str,
    ) -> Result<bool, DomainError> {
        let presented = Self::hash_token(refresh_token);
        let active = self.repository.find_by_user_id(user_id).await?;

        let matched = active
            .iter()
            .find(|stored| constant_time_eq(stored.token_hash.as_bytes(), presented.as_bytes()));

        match matched {
            Some(stored) => self.repository.revoke_token(&stored.token_hash).await,
            None => Ok(false),
        }
    }

    /// Revokes every refresh token the user holds
    pub async fn revoke_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        self.repository.revoke_all_user_tokens(user_id).await
    }

    /// Removes expired tokens from storage
    pub async fn cleanup_expired_tokens(&self) -> Result<usize, DomainError> {
        self.repository.delete_expired_tokens().await
    }

    /// SHA-256 hex digest of a refresh token
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}

fn map_jwt_error(error: jsonwebtoken::errors::Error) -> DomainError {
    let token_error = match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
        ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim {
            claim: claim.clone(),
        },
        _ => TokenError::InvalidTokenFormat,
    };
    DomainError::Token(token_error)
}
