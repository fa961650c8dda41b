//! User read handlers

use crate::core::error::RestaurantError;
use crate::core::query::{PageParams, UserPage};
use crate::entities::UserView;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};

pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<UserPage<UserView>>, RestaurantError> {
    state.users.list_users(&params).await.map(Json)
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserView>, RestaurantError> {
    state.users.get_user(&user_id).await.map(Json)
}
