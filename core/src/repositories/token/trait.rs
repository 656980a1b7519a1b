//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken entity persistence operations
///
/// # Security Considerations
/// - Only token hashes are stored, never the token handed to the client
/// - Revocation must be atomic: of two concurrent revokes of the same
///   token, exactly one reports success
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Duration;
    /// # use uuid::Uuid;
    /// # use hotel_core::repositories::TokenRepository;
    /// # use hotel_core::domain::entities::token::RefreshToken;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let token = RefreshToken::new(Uuid::new_v4(), "hashed_token_value".to_string(), Duration::days(7));
    /// let saved = repo.save_refresh_token(token).await?;
    /// println!("Token saved with ID: {}", saved.id);
    /// # Ok(())
    /// # }
    /// ```
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Find all valid (non-expired, non-revoked) refresh tokens for a user
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError>;

    /// Revoke a specific refresh token
    ///
    /// # Returns
    /// * `Ok(true)` - This call revoked the token
    /// * `Ok(false)` - Token not found or already revoked
    async fn revoke_token(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Revoke all refresh tokens for a user, returning how many were active
    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Delete expired and revoked refresh tokens, returning how many were removed
    async fn delete_expired_tokens(&self) -> Result<usize, DomainError>;

    /// Check if a token exists and is valid
    async fn is_token_valid(&self, token_hash: &str) -> Result<bool, DomainError> {
        match self.find_refresh_token(token_hash).await? {
            Some(token) => Ok(token.is_valid()),
            None => Ok(false),
        }
    }

    /// Count active tokens for a user
    async fn count_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let tokens = self.find_by_user_id(user_id).await?;
        Ok(tokens.len())
    }
}
