//! Read side of the staff accounts

use super::{fetch, list_all};
use crate::core::error::{RestaurantResult, StoreResultExt};
use crate::core::query::{PageParams, UserPage};
use crate::core::{DocumentStore, Entity, Filter};
use crate::entities::{User, UserView};
use crate::storage::Stores;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn DocumentStore<User>>,
}

impl UserService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            users: stores.users.clone(),
        }
    }

    pub async fn list_users(&self, params: &PageParams) -> RestaurantResult<UserPage<UserView>> {
        let total_count = self
            .users
            .count(&Filter::All)
            .await
            .in_store(User::resource_name(), "count")?;
        let users = list_all(self.users.as_ref()).await?;

        Ok(UserPage {
            total_count: total_count as usize,
            user_items: params
                .window()
                .slice(users)
                .into_iter()
                .map(UserView::from)
                .collect(),
        })
    }

    pub async fn get_user(&self, user_id: &str) -> RestaurantResult<UserView> {
        fetch(self.users.as_ref(), user_id).await.map(UserView::from)
    }
}
