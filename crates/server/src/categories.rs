//! Categories API endpoints.

use api_types::category::{CategoryListResponse, CategoryNew, CategoryUpdate, CategoryView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{CreateCategory, DeleteCategory, UpdateCategory};

use crate::{
    ServerError,
    groups::{map_flow, map_group},
    server::ServerState,
    user,
};

fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        abbr: category.abbr,
        flow: map_flow(category.flow),
        group_id: category.group_id,
        group: category.group.map(map_group),
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<CategoryListResponse>, ServerError> {
    let categories = state
        .engine
        .categories(user.owner_id())
        .await?
        .into_iter()
        .map(map_category)
        .collect();

    Ok(Json(CategoryListResponse { categories }))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state.engine.category(id, user.owner_id()).await?;
    Ok(Json(map_category(category)))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .create_category(CreateCategory::new(
            user.owner_id(),
            payload.name,
            payload.abbr,
            payload.flow.as_str(),
            payload.group_id,
        ))
        .await?;
    Ok((StatusCode::CREATED, Json(map_category(category))))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state
        .engine
        .update_category(UpdateCategory::new(
            user.owner_id(),
            id,
            payload.name,
            payload.abbr,
        ))
        .await?;
    Ok(Json(map_category(category)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state
        .engine
        .delete_category(DeleteCategory::new(user.owner_id(), id))
        .await?;
    Ok(Json(map_category(category)))
}
