//! Cash API endpoints.

use api_types::cash::{CashListResponse, CashNew, CashUpdate, CashView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{CreateCash, DeleteCash, UpdateCash};

use crate::{ServerError, server::ServerState, user};

fn map_cash(cash: engine::Cash) -> CashView {
    CashView {
        id: cash.id,
        name: cash.name,
        value: cash.value.to_string(),
        created_at: cash.created_at,
        category_id: cash.category_id,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<CashListResponse>, ServerError> {
    let cash = state
        .engine
        .cash_entries(user.owner_id())
        .await?
        .into_iter()
        .map(map_cash)
        .collect();

    Ok(Json(CashListResponse { cash }))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<CashView>, ServerError> {
    let cash = state.engine.cash(id, user.owner_id()).await?;
    Ok(Json(map_cash(cash)))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CashNew>,
) -> Result<(StatusCode, Json<CashView>), ServerError> {
    let cash = state
        .engine
        .create_cash(CreateCash::new(
            user.owner_id(),
            payload.name,
            payload.value,
            payload.category_id,
        ))
        .await?;
    Ok((StatusCode::CREATED, Json(map_cash(cash))))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<CashUpdate>,
) -> Result<Json<CashView>, ServerError> {
    let cash = state
        .engine
        .update_cash(UpdateCash::new(
            user.owner_id(),
            id,
            payload.name,
            payload.value,
        ))
        .await?;
    Ok(Json(map_cash(cash)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<CashView>, ServerError> {
    let cash = state
        .engine
        .delete_cash(DeleteCash::new(user.owner_id(), id))
        .await?;
    Ok(Json(map_cash(cash)))
}
