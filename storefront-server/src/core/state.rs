use std::sync::Arc;
use std::time::Duration;

use crate::auth::SessionService;
use crate::cart::CartService;
use crate::catalog::CatalogService;
use crate::core::{BackgroundTasks, Config};
use crate::orders::engine::OrderEngine;
use crate::services::{MockGateway, PaymentGateway, UserDirectory};
use crate::store::Store;
use crate::utils::{AppError, AppResult};

/// How often expired sessions are swept from the store
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(600);

/// Shared server state
///
/// Holds every service behind cheap clones; handlers receive it
/// through axum's `State` extractor.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Store,
    pub catalog: CatalogService,
    pub directory: UserDirectory,
    sessions: SessionService,
    pub carts: CartService,
    pub engine: Arc<OrderEngine>,
    pub payments: Arc<dyn PaymentGateway>,
}

impl ServerState {
    /// Initialize all services against an on-disk database under
    /// `config.work_dir` and seed the demo data.
    pub fn initialize(config: &Config) -> AppResult<Self> {
        let db_path = config.database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::internal(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let store = Store::open(&db_path)?;
        Self::with_store(config, store)
    }

    /// Initialize against an in-memory database, used by tests
    pub fn initialize_in_memory(config: &Config) -> AppResult<Self> {
        let store = Store::open_in_memory()?;
        Self::with_store(config, store)
    }

    fn with_store(config: &Config, store: Store) -> AppResult<Self> {
        let directory = UserDirectory::new(store.clone());
        let seeded = directory.seed_demo_users()?;
        if seeded > 0 {
            tracing::info!(users = seeded, "Fresh database seeded");
        }

        let state = Self {
            config: config.clone(),
            catalog: CatalogService::new(),
            directory,
            sessions: SessionService::new(store.clone(), config.session_ttl_minutes),
            carts: CartService::new(store.clone()),
            engine: Arc::new(OrderEngine::new(
                store.clone(),
                config.estimated_delivery_minutes,
            )),
            payments: Arc::new(MockGateway),
            store,
        };
        Ok(state)
    }

    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }

    /// Register the periodic workers. Must be called before serving.
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let auto_confirm_secs = self.config.auto_confirm_secs.max(1);
        let min_age_millis = (auto_confirm_secs * 1000) as i64;

        let engine = self.engine.clone();
        let token = tasks.shutdown_token();
        tasks.spawn("auto_confirm", async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(auto_confirm_secs));
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        match engine.auto_confirm_pending(min_age_millis) {
                            Ok(0) => {}
                            Ok(n) => tracing::info!(confirmed = n, "Auto-confirmed pending orders"),
                            Err(e) => tracing::error!(error = %e, "Auto-confirm sweep failed"),
                        }
                    }
                }
            }
        });

        let sessions = self.sessions.clone();
        let token = tasks.shutdown_token();
        tasks.spawn("session_sweeper", async move {
            let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        match sessions.sweep_expired() {
                            Ok(0) => {}
                            Ok(n) => tracing::debug!(removed = n, "Swept expired sessions"),
                            Err(e) => tracing::error!(error = %e, "Session sweep failed"),
                        }
                    }
                }
            }
        });
    }
}
