//! User repository trait defining the interface for identity persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::ApiUser;
use crate::errors::DomainError;

/// Repository trait for [`ApiUser`] persistence and role membership
///
/// Implementations own the identity tables (users, roles, user-role links).
/// Email lookups are case-insensitive.
///
/// # Example
/// ```no_run
/// # use hotel_core::repositories::UserRepository;
/// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
/// if let Some(user) = repo.find_by_email("admin@hotels.test").await? {
///     let roles = repo.get_roles(user.id).await?;
///     println!("{} has roles {:?}", user.email, roles);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApiUser>, DomainError>;

    /// Find a user by email (the user name), ignoring case
    async fn find_by_email(&self, email: &str) -> Result<Option<ApiUser>, DomainError>;

    /// Create a user and add it to the given roles in one step
    ///
    /// # Returns
    /// * `Ok(ApiUser)` - The stored user
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    /// * `Err(DomainError::ValidationErr(ValidationError::UnknownRole))` - A role does not exist
    async fn create(&self, user: ApiUser, roles: &[String]) -> Result<ApiUser, DomainError>;

    /// Role names of a user
    async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, DomainError>;

    /// Names of every defined role
    async fn list_roles(&self) -> Result<Vec<String>, DomainError>;

    /// Rotate the user's security stamp
    ///
    /// # Returns
    /// * `Ok(true)` - Stamp rotated
    /// * `Ok(false)` - No such user
    async fn update_security_stamp(&self, user_id: Uuid) -> Result<bool, DomainError>;
}
