//! Application state management.
//!
//! The state is built once at startup and cloned into handlers (cheap `Arc`
//! and handle clones). It contains:
//! - Configuration
//! - The decorated todo service
//! - The MongoDB client and database when `TODO_STORE=mongodb`

use domain_todos::{InMemoryTodoRepository, MongoTodoRepository, TodoService, service};
use mongodb::{Client, Database};
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, StoreKind};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    /// Core service wrapped in the configured middleware
    pub service: Arc<dyn TodoService>,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Option<Client>,
    /// MongoDB database instance, probed by `/ready`
    pub db: Option<Database>,
}

impl AppState {
    /// Connect the configured store and build the service stack.
    pub async fn connect(config: Config) -> eyre::Result<Self> {
        match config.store {
            StoreKind::Mongodb => {
                info!("Connecting to MongoDB at {}", config.mongodb.url());

                let client =
                    database::mongodb::connect_from_config_with_retry(&config.mongodb, None)
                        .await?;
                let db = client.database(config.mongodb.database());

                info!(
                    database = config.mongodb.database(),
                    collection = %config.collection,
                    "Successfully connected to MongoDB"
                );

                let repository =
                    MongoTodoRepository::with_collection(db.clone(), &config.collection);
                let service = service::new(repository, Self::middleware(&config));

                Ok(Self {
                    config,
                    service,
                    mongo_client: Some(client),
                    db: Some(db),
                })
            }
            StoreKind::Memory => Ok(Self::in_memory(config)),
        }
    }

    /// State backed by the in-process store; nothing survives a restart.
    pub fn in_memory(config: Config) -> Self {
        info!("Using in-memory todo store");
        let service = service::new(InMemoryTodoRepository::new(), Self::middleware(&config));

        Self {
            config,
            service,
            mongo_client: None,
            db: None,
        }
    }

    fn middleware(config: &Config) -> Vec<service::Middleware> {
        config.middleware.iter().map(|kind| kind.build()).collect()
    }
}
