//! Category creation and listing endpoints.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, CategoryData, CategoryName, create_category, get_all_categories},
    db::lock_connection,
};

/// The state needed for the category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryState {
    /// The database connection shared by every request.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Create a category, responding with the new category and 201 Created.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    Json(data): Json<CategoryData>,
) -> Result<impl IntoResponse, Error> {
    let name = CategoryName::new(&data.name)?;

    let connection = lock_connection(&state.db_connection)?;
    let category = create_category(name, &connection)?;
    tracing::debug!("Created category {}", category.id);

    Ok((StatusCode::CREATED, Json(category)))
}

/// List every category.
pub async fn get_categories_endpoint(
    State(state): State<CategoryState>,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_all_categories(&connection).map(Json)
}
