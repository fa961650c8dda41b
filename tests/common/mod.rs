//! Shared fixtures for the integration suites
//!
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use chrono::Utc;
use restaurant::prelude::*;

/// Insert a menu directly into the store
pub async fn seed_menu(stores: &Stores, name: &str) -> Menu {
    let menu = NewMenu {
        name: Some(name.to_string()),
        category: Some("mains".to_string()),
        ..Default::default()
    }
    .into_record(Utc::now())
    .unwrap();
    stores.menus.insert(menu).await.unwrap()
}

/// Insert a food directly into the store
pub async fn seed_food(stores: &Stores, menu_id: &str, name: &str, price: f64) -> Food {
    let food = NewFood {
        name: Some(name.to_string()),
        price: Some(price),
        food_image: Some(format!("https://img.example/{}.png", name)),
        menu_id: Some(menu_id.to_string()),
    }
    .into_record(Utc::now())
    .unwrap();
    stores.foods.insert(food).await.unwrap()
}

/// Insert a table directly into the store
pub async fn seed_table(stores: &Stores, table_number: i64) -> Table {
    let table = NewTable {
        number_of_guests: Some(4),
        table_number: Some(table_number),
    }
    .into_record(Utc::now())
    .unwrap();
    stores.tables.insert(table).await.unwrap()
}

/// Insert a user directly into the store
pub async fn seed_user(stores: &Stores, first_name: &str) -> User {
    let now = Utc::now();
    let user = User {
        user_id: new_id(),
        first_name: first_name.to_string(),
        last_name: "Doe".to_string(),
        password: "hashed-secret".to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        avatar: None,
        phone: "+33600000000".to_string(),
        token: Some("jwt".to_string()),
        refresh_token: Some("refresh".to_string()),
        created_at: now,
        updated_at: now,
    };
    stores.users.insert(user).await.unwrap()
}

/// Two foods (10.01 and 5.00) and table number 7
pub struct Dinner {
    pub stores: Stores,
    pub steak: Food,
    pub salad: Food,
    pub table: Table,
}

pub async fn dinner() -> Dinner {
    let stores = Stores::in_memory();
    let menu = seed_menu(&stores, "Dinner").await;
    let steak = seed_food(&stores, &menu.menu_id, "steak", 10.01).await;
    let salad = seed_food(&stores, &menu.menu_id, "salad", 5.00).await;
    let table = seed_table(&stores, 7).await;
    Dinner {
        stores,
        steak,
        salad,
        table,
    }
}
