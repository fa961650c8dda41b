//! Integration tests for the MongoDB store using the storage test harness.
//!
//! # Requirements
//!
//! - Docker must be running (testcontainers launches a MongoDB container)
//! - Feature flag `mongodb_backend` must be enabled
//!
//! # Running
//!
//! ```sh
//! cargo test --features mongodb_backend --test mongodb_tests -- --test-threads=1
//! ```
//!
//! All tests share a single MongoDB container; each test gets its own
//! database.

#![cfg(feature = "mongodb_backend")]

#[macro_use]
mod storage_harness;

use mongodb::Client;
use restaurant::prelude::*;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use storage_harness::*;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;

struct MongoTestEnv {
    /// Dropping the handle stops the container
    _container: testcontainers::ContainerAsync<Mongo>,
    connection_url: String,
}

static TEST_ENV: OnceLock<MongoTestEnv> = OnceLock::new();

async fn init_mongo_env() -> &'static MongoTestEnv {
    if let Some(env) = TEST_ENV.get() {
        return env;
    }

    let container = Mongo::default()
        .start()
        .await
        .expect("Failed to start MongoDB container, is Docker running?");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(27017).await.unwrap();
    let url = format!("mongodb://{}:{}", host, port);

    let env = MongoTestEnv {
        _container: container,
        connection_url: url,
    };

    let _ = TEST_ENV.set(env);
    TEST_ENV.get().unwrap()
}

static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A fresh database per call so tests never see each other's documents
async fn mongo_database() -> mongodb::Database {
    let env = init_mongo_env().await;
    let client = Client::with_uri_str(&env.connection_url)
        .await
        .expect("Failed to connect to MongoDB");
    let db_num = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    client.database(&format!("restaurant_test_{}", db_num))
}

async fn mongo_stores() -> Stores {
    Stores::mongo(mongo_database().await)
}

document_store_tests!(mongo_stores().await);

#[tokio::test]
async fn test_documents_keep_collection_names() {
    let db = mongo_database().await;
    let stores = Stores::mongo(db.clone());
    stores
        .order_items
        .insert(item_record("o1", "f1", "M", 4.5))
        .await
        .unwrap();

    let names = db.list_collection_names().await.unwrap();
    assert!(names.contains(&"orderItem".to_string()));
}
