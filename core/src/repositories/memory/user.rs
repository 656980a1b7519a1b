//! In-memory user repository

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::role::{self, DEFAULT_ROLES};
use crate::domain::entities::user::{normalize_email, ApiUser};
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::user::UserRepository;

#[derive(Debug, Default)]
struct Identity {
    users: HashMap<Uuid, ApiUser>,
    /// Role names keyed by normalized name
    roles: HashMap<String, String>,
    memberships: HashMap<Uuid, HashSet<String>>,
}

/// In-memory user repository seeded with the default roles
pub struct InMemoryUserRepository {
    identity: Arc<RwLock<Identity>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        let roles = DEFAULT_ROLES
            .iter()
            .map(|r| (role::normalize(r), r.to_string()))
            .collect();

        Self {
            identity: Arc::new(RwLock::new(Identity {
                roles,
                ..Default::default()
            })),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApiUser>, DomainError> {
        let identity = self.identity.read().await;
        Ok(identity.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<ApiUser>, DomainError> {
        let normalized = normalize_email(email);
        let identity = self.identity.read().await;
        Ok(identity
            .users
            .values()
            .find(|u| u.normalized_email() == normalized)
            .cloned())
    }

    async fn create(&self, user: ApiUser, roles: &[String]) -> Result<ApiUser, DomainError> {
        let mut identity = self.identity.write().await;

        let normalized = user.normalized_email();
        if identity.users.values().any(|u| u.normalized_email() == normalized) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let mut granted = HashSet::new();
        for requested in roles {
            let name = identity
                .roles
                .get(&role::normalize(requested))
                .cloned()
                .ok_or_else(|| ValidationError::UnknownRole {
                    role: requested.clone(),
                })?;
            granted.insert(name);
        }

        identity.memberships.insert(user.id, granted);
        identity.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, DomainError> {
        let identity = self.identity.read().await;
        let mut roles: Vec<String> = identity
            .memberships
            .get(&user_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        roles.sort();
        Ok(roles)
    }

    async fn list_roles(&self) -> Result<Vec<String>, DomainError> {
        let identity = self.identity.read().await;
        let mut roles: Vec<String> = identity.roles.values().cloned().collect();
        roles.sort();
        Ok(roles)
    }

    async fn update_security_stamp(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let mut identity = self.identity.write().await;
        match identity.users.get_mut(&user_id) {
            Some(user) => {
                user.rotate_security_stamp();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
