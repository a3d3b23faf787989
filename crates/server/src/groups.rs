//! Groups API endpoints.

use api_types::{
    Flow,
    group::{GroupListResponse, GroupNew, GroupUpdate, GroupView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{CreateGroup, DeleteGroup, UpdateGroup};

use crate::{ServerError, server::ServerState, user};

pub(crate) fn map_flow(flow: engine::Flow) -> Flow {
    match flow {
        engine::Flow::In => Flow::In,
        engine::Flow::Out => Flow::Out,
    }
}

pub(crate) fn map_group(group: engine::Group) -> GroupView {
    GroupView {
        id: group.id,
        name: group.name,
        abbr: group.abbr,
        flow: map_flow(group.flow),
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<GroupListResponse>, ServerError> {
    let groups = state
        .engine
        .groups(user.owner_id())
        .await?
        .into_iter()
        .map(map_group)
        .collect();

    Ok(Json(GroupListResponse { groups }))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<GroupView>, ServerError> {
    let group = state.engine.group(id, user.owner_id()).await?;
    Ok(Json(map_group(group)))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<GroupNew>,
) -> Result<(StatusCode, Json<GroupView>), ServerError> {
    let group = state
        .engine
        .create_group(CreateGroup::new(
            user.owner_id(),
            payload.name,
            payload.abbr,
            payload.flow.as_str(),
        ))
        .await?;
    Ok((StatusCode::CREATED, Json(map_group(group))))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<GroupUpdate>,
) -> Result<Json<GroupView>, ServerError> {
    let group = state
        .engine
        .update_group(UpdateGroup::new(
            user.owner_id(),
            id,
            payload.name,
            payload.abbr,
        ))
        .await?;
    Ok(Json(map_group(group)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<GroupView>, ServerError> {
    let group = state
        .engine
        .delete_group(DeleteGroup::new(user.owner_id(), id))
        .await?;
    Ok(Json(map_group(group)))
}
