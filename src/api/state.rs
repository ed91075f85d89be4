//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::Context;

use crate::auth::TokenService;
use crate::cache::{InMemoryCache, ResponseCache};
use crate::config::Config;
use crate::error::Result;
use crate::providers::Providers;
use crate::search::{FailurePolicy, SearchService};
use crate::store::Database;

/// Everything a request handler may need.
///
/// The search cache is created here once per process and lives as long as
/// the router that owns this state.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
    pub cache: Arc<dyn ResponseCache>,
    pub db: Arc<Database>,
    pub tokens: Arc<TokenService>,
    /// bcrypt work factor for new accounts
    pub password_cost: u32,
}

impl AppState {
    /// Assembles state from already-built parts.
    pub fn new(
        cache: Arc<dyn ResponseCache>,
        providers: Providers,
        policy: FailurePolicy,
        db: Database,
        tokens: TokenService,
        password_cost: u32,
    ) -> Self {
        Self {
            search: Arc::new(SearchService::new(cache.clone(), providers, policy)),
            cache,
            db: Arc::new(db),
            tokens: Arc::new(tokens),
            password_cost,
        }
    }

    /// Creates the process-wide state from configuration.
    ///
    /// Opens the database, builds the upstream clients and an empty cache.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cache: Arc<dyn ResponseCache> =
            Arc::new(InMemoryCache::new(config.cache_max_entries, config.cache_ttl));
        let providers =
            Providers::from_config(config).context("Failed to build upstream providers")?;
        let db = Database::open(&config.database_url)
            .with_context(|| format!("Failed to open database at {}", config.database_url))?;
        let tokens = TokenService::new(&config.secret_key, config.token_ttl_minutes)
            .context("Invalid ACCESS_TOKEN_EXPIRE_MINUTES")?;

        Ok(Self::new(
            cache,
            providers,
            FailurePolicy::from(config),
            db,
            tokens,
            config.password_hash_cost,
        ))
    }

    /// Runs a database operation on the blocking thread pool.
    ///
    /// SQLite calls hold the connection mutex for their whole duration and
    /// must not run on an async worker.
    pub async fn with_db<F, T>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        run_blocking(move || op(&db)).await
    }
}

/// Runs CPU-bound or blocking work off the async workers.
pub async fn run_blocking<F, T>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}
