//! Core module containing fundamental traits and types for the service

pub mod auth;
pub mod entity;
pub mod error;
pub mod field;
pub mod money;
pub mod query;
pub mod store;

pub use auth::{AuthContext, AuthProvider, NoAuthProvider, StaticTokenProvider};
pub use entity::{Entity, new_id};
pub use error::{RestaurantError, RestaurantResult};
pub use field::{FieldUpdates, FieldValue, Filter};
pub use money::round_price;
pub use query::{PageParams, PageWindow};
pub use store::DocumentStore;
