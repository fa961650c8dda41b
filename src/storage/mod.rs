//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryStore;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::DocumentStore;
use crate::core::error::{ConfigError, RestaurantError};
use crate::entities::{Food, Invoice, Menu, Order, OrderItem, Table, User};
use std::sync::Arc;

/// One store handle per collection
///
/// Built once at startup and handed to every component that needs it.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn DocumentStore<User>>,
    pub menus: Arc<dyn DocumentStore<Menu>>,
    pub foods: Arc<dyn DocumentStore<Food>>,
    pub tables: Arc<dyn DocumentStore<Table>>,
    pub orders: Arc<dyn DocumentStore<Order>>,
    pub order_items: Arc<dyn DocumentStore<OrderItem>>,
    pub invoices: Arc<dyn DocumentStore<Invoice>>,
}

impl Stores {
    /// Fresh, empty in-memory collections
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryStore::<User>::new()),
            menus: Arc::new(InMemoryStore::<Menu>::new()),
            foods: Arc::new(InMemoryStore::<Food>::new()),
            tables: Arc::new(InMemoryStore::<Table>::new()),
            orders: Arc::new(InMemoryStore::<Order>::new()),
            order_items: Arc::new(InMemoryStore::<OrderItem>::new()),
            invoices: Arc::new(InMemoryStore::<Invoice>::new()),
        }
    }

    /// Collections of the given MongoDB database
    #[cfg(feature = "mongodb_backend")]
    pub fn mongo(database: ::mongodb::Database) -> Self {
        Self {
            users: Arc::new(MongoStore::<User>::new(database.clone())),
            menus: Arc::new(MongoStore::<Menu>::new(database.clone())),
            foods: Arc::new(MongoStore::<Food>::new(database.clone())),
            tables: Arc::new(MongoStore::<Table>::new(database.clone())),
            orders: Arc::new(MongoStore::<Order>::new(database.clone())),
            order_items: Arc::new(MongoStore::<OrderItem>::new(database.clone())),
            invoices: Arc::new(MongoStore::<Invoice>::new(database)),
        }
    }

    /// Open the backend selected by the configuration
    pub async fn open(config: &StorageConfig) -> Result<Self, RestaurantError> {
        match config.backend {
            StorageBackend::InMemory => {
                tracing::info!("using in-memory storage");
                Ok(Self::in_memory())
            }
            StorageBackend::Mongodb => Self::open_mongo(config).await,
        }
    }

    #[cfg(feature = "mongodb_backend")]
    async fn open_mongo(config: &StorageConfig) -> Result<Self, RestaurantError> {
        use crate::core::error::StorageError;

        let url = config.mongodb_url.as_deref().ok_or_else(|| ConfigError::InvalidValue {
            key: "MONGODB_URL".to_string(),
            message: "required when STORAGE_BACKEND=mongodb".to_string(),
        })?;

        let client = ::mongodb::Client::with_uri_str(url).await.map_err(|e| {
            StorageError::ConnectionError {
                backend: "mongodb".to_string(),
                message: e.to_string(),
            }
        })?;

        tracing::info!(database = %config.mongodb_database, "connected to MongoDB");
        Ok(Self::mongo(client.database(&config.mongodb_database)))
    }

    #[cfg(not(feature = "mongodb_backend"))]
    async fn open_mongo(_config: &StorageConfig) -> Result<Self, RestaurantError> {
        Err(ConfigError::InvalidValue {
            key: "STORAGE_BACKEND".to_string(),
            message: "mongodb support is not compiled in (enable the mongodb_backend feature)"
                .to_string(),
        }
        .into())
    }
}
