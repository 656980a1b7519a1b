//! Main authentication service implementation

use std::sync::Arc;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::ApiUser;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Account registration request
#[derive(Debug, Clone, Default)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub roles: Vec<String>,
}

/// Authentication service for registration, login and token refresh
pub struct AuthService {
    /// User repository for identity persistence
    user_repository: Arc<dyn UserRepository>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    config: AuthServiceConfig,
    /// Verified against when the email is unknown; hashed at the configured
    /// cost so a miss takes as long as a wrong password
    pub(super) dummy_hash: String,
}

impl AuthService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        let dummy_hash = bcrypt::hash(uuid::Uuid::new_v4().to_string(), config.bcrypt_cost)
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, cost = config.bcrypt_cost, "Invalid bcrypt cost");
                String::new()
            });

        Self {
            user_repository,
            token_service,
            config,
            dummy_hash,
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Register a new account
    ///
    /// This method:
    /// 1. Checks the email is present and the password satisfies the policy
    /// 2. Hashes the password with bcrypt
    /// 3. Creates the user with the requested roles, all or nothing
    ///
    /// # Errors
    ///
    /// * `ValidationError` - Missing email, weak password or unknown role
    /// * `AuthError::UserAlreadyExists` - The email is already registered
    pub async fn register(&self, request: RegisterUser) -> DomainResult<ApiUser> {
        let email = request.email.trim();
        if email.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        self.config.password_policy.validate(&request.password)?;

        if self.user_repository.find_by_email(email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let roles = if request.roles.is_empty() {
            vec![self.config.default_role.clone()]
        } else {
            request.roles
        };

        let password_hash = hash_password(request.password, self.config.bcrypt_cost).await?;
        let user = ApiUser::new(email, password_hash).with_profile(
            request.first_name,
            request.last_name,
            request.phone_number,
        );

        let user = self.user_repository.create(user, &roles).await?;
        tracing::info!(user_id = %user.id, roles = ?roles, "Registered new account");
        Ok(user)
    }

    /// Checks credentials, returning the user when they match
    pub async fn validate_user(&self, email: &str, password: &str) -> DomainResult<Option<ApiUser>> {
        let user = self.user_repository.find_by_email(email).await?;

        let hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.clone(),
        };
        let matches = verify_password(password.to_string(), hash).await?;

        Ok(user.filter(|_| matches))
    }

    /// Log in with email and password
    ///
    /// Existing refresh tokens of the user are revoked before a new pair is
    /// issued.
    ///
    /// # Errors
    ///
    /// * `AuthError::AuthenticationFailed` - Unknown email or wrong password
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let user = match self.validate_user(email, password).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login failed");
                return Err(AuthError::AuthenticationFailed.into());
            }
        };

        let revoked = self.token_service.revoke_user_tokens(user.id).await?;
        let roles = self.user_repository.get_roles(user.id).await?;
        let pair = self.token_service.generate_tokens(&user, roles).await?;

        tracing::info!(user_id = %user.id, revoked_tokens = revoked, "User logged in");
        Ok(pair)
    }

    /// Exchange a (possibly expired) access token and its refresh token for
    /// a new pair
    ///
    /// The refresh token is single use. A token that does not match any of
    /// the user's active tokens revokes all of them and rotates the
    /// security stamp.
    ///
    /// # Errors
    ///
    /// * `TokenError` - The access token is forged or malformed
    /// * `TokenError::InvalidRefreshToken` - No active refresh token matched
    pub async fn refresh(&self, access_token: &str, refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self.token_service.decode_expired_token(access_token)?;

        let user = self
            .user_repository
            .find_by_email(&claims.sub)
            .await?
            .filter(|user| claims.user_id().map_or(false, |id| id == user.id))
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        if !self
            .token_service
            .consume_refresh_token(user.id, refresh_token)
            .await?
        {
            let revoked = self.token_service.revoke_user_tokens(user.id).await?;
            self.user_repository.update_security_stamp(user.id).await?;
            tracing::warn!(
                user_id = %user.id,
                revoked_tokens = revoked,
                "Refresh token rejected, revoked all refresh tokens"
            );
            return Err(TokenError::InvalidRefreshToken.into());
        }

        let roles = self.user_repository.get_roles(user.id).await?;
        let pair = self.token_service.generate_tokens(&user, roles).await?;

        tracing::debug!(user_id = %user.id, "Refresh token rotated");
        Ok(pair)
    }
}

async fn hash_password(password: String, cost: u32) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::internal(format!("password hashing task failed: {}", e)))?
        .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
}

async fn verify_password(password: String, hash: String) -> DomainResult<bool> {
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::internal(format!("password verification task failed: {}", e)))?;

    // A malformed stored hash is a failed match, not a server error
    Ok(verified.unwrap_or(false))
}
