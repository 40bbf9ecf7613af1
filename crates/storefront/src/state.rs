//! Application state shared across handlers.

use std::sync::Arc;

use cafe_ancestral_core::OrderHandoff;
use sqlx::PgPool;

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    handoff: OrderHandoff,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let handoff = config.order.handoff();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                handoff,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Builder for WhatsApp order links.
    #[must_use]
    pub fn handoff(&self) -> &OrderHandoff {
        &self.inner.handoff
    }
}
