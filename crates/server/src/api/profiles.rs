//! Profile CRUD endpoints (dashboard users: admins and employees).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use orderdesk_core::model::{Profile, Role};

use crate::state::AppState;

use super::{bad_request, internal_error, not_found, ApiResult, ErrorResponse};

const PROFILE_COLUMNS: &str = "id, display_name, role, created_at";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProfileRequest {
    pub display_name: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub role: Option<Role>,
}

#[utoipa::path(
    get,
    path = "/profiles",
    tag = "Profiles",
    responses((status = 200, description = "All profiles", body = [Profile]))
)]
pub async fn profiles_list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Profile>>> {
    let rows = sqlx::query_as::<_, Profile>(&format!(
        "SELECT {} FROM profiles ORDER BY display_name",
        PROFILE_COLUMNS
    ))
    .fetch_all(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/profiles",
    tag = "Profiles",
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = Profile),
        (status = 400, description = "Missing required field", body = ErrorResponse)
    )
)]
pub async fn profiles_create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProfileRequest>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    if req.display_name.trim().is_empty() {
        return Err(bad_request("display_name is required"));
    }

    let row = sqlx::query_as::<_, Profile>(&format!(
        "INSERT INTO profiles (display_name, role) VALUES ($1, $2)
         RETURNING {}",
        PROFILE_COLUMNS
    ))
    .bind(&req.display_name)
    .bind(req.role)
    .fetch_one(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    get,
    path = "/profiles/{id}",
    tag = "Profiles",
    responses(
        (status = 200, description = "Profile", body = Profile),
        (status = 404, description = "No such profile", body = ErrorResponse)
    )
)]
pub async fn profiles_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Profile>> {
    let row = sqlx::query_as::<_, Profile>(&format!(
        "SELECT {} FROM profiles WHERE id = $1",
        PROFILE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("Profile", id))?;

    Ok(Json(row))
}

#[utoipa::path(
    put,
    path = "/profiles/{id}",
    tag = "Profiles",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = Profile),
        (status = 404, description = "No such profile", body = ErrorResponse)
    )
)]
pub async fn profiles_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<Profile>> {
    let row = sqlx::query_as::<_, Profile>(&format!(
        "UPDATE profiles SET
            display_name = COALESCE($2, display_name),
            role = COALESCE($3, role)
         WHERE id = $1
         RETURNING {}",
        PROFILE_COLUMNS
    ))
    .bind(id)
    .bind(&req.display_name)
    .bind(req.role)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("Profile", id))?;

    Ok(Json(row))
}

#[utoipa::path(
    delete,
    path = "/profiles/{id}",
    tag = "Profiles",
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 404, description = "No such profile", body = ErrorResponse)
    )
)]
pub async fn profiles_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(internal_error)?;

    if result.rows_affected() == 0 {
        return Err(not_found("Profile", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
