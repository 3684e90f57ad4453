use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use models::user::{NewUser, UpdateUser, UserResponse};
use service::user_service::UserService;

use crate::errors::JsonApiError;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub email: String,
}

pub async fn list(
    State(svc): State<UserService>,
) -> Result<Json<Vec<UserResponse>>, JsonApiError> {
    let users = svc.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn search(
    State(svc): State<UserService>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<UserResponse>>, JsonApiError> {
    let users = svc.search_by_email(&q.email).await?;
    info!(pattern = %q.email, count = users.len(), "user search");
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn create(
    State(svc): State<UserService>,
    Json(input): Json<NewUser>,
) -> Result<(StatusCode, Json<UserResponse>), JsonApiError> {
    let user = svc.create(input).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn update(
    State(svc): State<UserService>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<UserResponse>, JsonApiError> {
    let user = svc.update(&id, input).await?;
    Ok(Json(user.into()))
}

pub async fn delete(
    State(svc): State<UserService>,
    Path(id): Path<String>,
) -> Result<Json<Value>, JsonApiError> {
    svc.delete(&id).await?;
    Ok(Json(json!({ "mensaje": "Usuario eliminado correctamente" })))
}
