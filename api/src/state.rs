//! Application state shared by every worker
//!
//! Backends are chosen from configuration: the in-memory stores serve
//! development and tests, MySQL and Redis serve deployments.

use std::sync::Arc;
use std::time::Duration;

use hotel_core::repositories::{
    DataStore, InMemoryTokenRepository, InMemoryUserRepository, MemoryStore, TokenRepository,
    UnitOfWork, UserRepository,
};
use hotel_core::services::{
    AuthService, AuthServiceConfig, MemoryRateLimitStore, MemoryResponseCache, RateLimitRule,
    RateLimitStore, ResponseCache, TokenService, TokenServiceConfig,
};
use hotel_core::DomainResult;
use hotel_infra::{
    DatabasePool, MySqlStore, MySqlTokenRepository, MySqlUserRepository, RedisClient,
    RedisRateLimitStore, RedisResponseCache,
};
use hotel_shared::{AppConfig, CacheBackend, DatabaseBackend};

/// Everything a request handler needs, cloned cheaply per worker
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DataStore>,
    pub auth: Arc<AuthService>,
    pub cache: Arc<dyn ResponseCache>,
    pub rate_limiter: Arc<dyn RateLimitStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// State over the in-memory backends, seeded with the starter catalog
    pub fn in_memory(config: AppConfig) -> DomainResult<Self> {
        Self::assemble(
            config,
            Arc::new(MemoryStore::seeded()),
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryTokenRepository::new()),
            Arc::new(MemoryResponseCache::new()),
            Arc::new(MemoryRateLimitStore::new()),
        )
    }

    /// State over the backends named in `config`
    pub async fn from_config(config: AppConfig) -> DomainResult<Self> {
        let (store, users, tokens): (
            Arc<dyn DataStore>,
            Arc<dyn UserRepository>,
            Arc<dyn TokenRepository>,
        ) = match config.database.backend {
            DatabaseBackend::Memory => {
                tracing::warn!("Using the in-memory database; data is lost on restart");
                (
                    Arc::new(MemoryStore::seeded()),
                    Arc::new(InMemoryUserRepository::new()),
                    Arc::new(InMemoryTokenRepository::new()),
                )
            }
            DatabaseBackend::Mysql => {
                let pool = DatabasePool::new(config.database.clone()).await?;
                if config.database.run_migrations {
                    pool.run_migrations().await?;
                }
                let pool = pool.get_pool().clone();
                (
                    Arc::new(MySqlStore::new(pool.clone())),
                    Arc::new(MySqlUserRepository::new(pool.clone())),
                    Arc::new(MySqlTokenRepository::new(pool)),
                )
            }
        };

        let (cache, rate_limiter): (Arc<dyn ResponseCache>, Arc<dyn RateLimitStore>) =
            match config.cache.backend {
                CacheBackend::Memory => (
                    Arc::new(MemoryResponseCache::new()),
                    Arc::new(MemoryRateLimitStore::new()),
                ),
                CacheBackend::Redis => {
                    let client = RedisClient::new(config.cache.clone()).await?;
                    (
                        Arc::new(RedisResponseCache::new(client.clone())),
                        Arc::new(RedisRateLimitStore::new(client)),
                    )
                }
            };

        Self::assemble(config, store, users, tokens, cache, rate_limiter)
    }

    fn assemble(
        config: AppConfig,
        store: Arc<dyn DataStore>,
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        cache: Arc<dyn ResponseCache>,
        rate_limiter: Arc<dyn RateLimitStore>,
    ) -> DomainResult<Self> {
        let token_service = TokenService::new(tokens, TokenServiceConfig::from(&config.jwt))?;
        let auth = AuthService::new(
            users,
            Arc::new(token_service),
            AuthServiceConfig::from(&config.password),
        );

        Ok(Self {
            store,
            auth: Arc::new(auth),
            cache,
            rate_limiter,
            config: Arc::new(config),
        })
    }

    /// A fresh unit of work for one request
    pub fn unit_of_work(&self) -> UnitOfWork {
        UnitOfWork::new(self.store.clone())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.config.cache.ttl_seconds)
    }

    pub fn rate_limit_rule(&self) -> RateLimitRule {
        RateLimitRule::from_config(&self.config.rate_limit)
    }
}
