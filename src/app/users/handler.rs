//! 用户处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use super::model::{parse_user_id, CreateUserRequest, UpdateUserRequest, User};
use crate::core::{error::AppError, extract::Payload, response::ApiResponse, state::AppState};

pub async fn list_users(State(state): State<AppState>) -> Json<ApiResponse<Vec<User>>> {
    Json(ApiResponse::listing(state.users.list_users()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state.users.get_user(parse_user_id(&id))?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn create_user(
    State(state): State<AppState>,
    Payload(payload): Payload<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let user = state.users.create_user(payload)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(user, "User created successfully")),
    ))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(payload): Payload<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state.users.update_user(parse_user_id(&id), payload)?;
    Ok(Json(ApiResponse::with_message(user, "User updated successfully")))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state.users.delete_user(parse_user_id(&id))?;
    Ok(Json(ApiResponse::with_message(user, "User deleted successfully")))
}
