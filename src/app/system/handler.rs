//! 健康检查与信息类处理器

use axum::{
    extract::State,
    response::{Html, Json},
};
use serde_json::{json, Map, Value};

use super::dashboard::{render_dashboard, DashboardView};
use crate::core::{response::timestamp, state::AppState};
use crate::infrastructure::system::{to_megabytes, SystemInfo, RUNTIME_VERSION};

/// 首页列出的端点
const SITE_ENDPOINTS: &[(&str, &str)] = &[
    ("GET /health", "Health check"),
    ("GET /dashboard", "Runtime dashboard"),
    ("GET /api", "API information"),
    ("GET /api/info", "Get server information"),
    ("GET /api/users", "Get all users"),
];

/// `/api` 列出的端点
const API_ENDPOINTS: &[(&str, &str)] = &[
    ("GET /api/info", "Get server information"),
    ("GET /api/users", "Get all users"),
    ("GET /api/users/:id", "Get user by ID"),
    ("POST /api/users", "Create new user"),
    ("PUT /api/users/:id", "Update user"),
    ("DELETE /api/users/:id", "Delete user"),
];

fn endpoint_map(endpoints: &[(&str, &str)]) -> Value {
    let map: Map<String, Value> = endpoints
        .iter()
        .map(|(route, description)| (route.to_string(), Value::from(*description)))
        .collect();
    Value::Object(map)
}

/// 健康检查，供编排系统探活
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": timestamp(),
        "uptime": state.uptime_secs(),
        "version": state.config.version,
        "environment": state.config.environment,
    }))
}

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "message": "Welcome to the ECS demo service",
        "version": config.version,
        "environment": config.environment,
        "port": config.port,
        "deployedAt": config.deploy_time_or_na(),
        "endpoints": endpoint_map(SITE_ENDPOINTS),
        "timestamp": timestamp(),
    }))
}

pub async fn api_info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": "ECS Demo API",
        "version": state.config.version,
        "description": "REST API deployed on Amazon ECS via CodePipeline",
        "endpoints": endpoint_map(API_ENDPOINTS),
    }))
}

/// 主机与运行时信息
pub async fn server_info(State(state): State<AppState>) -> Json<Value> {
    let metrics = state.system.lock().sample();
    let hostname = state
        .config
        .hostname
        .clone()
        .or_else(SystemInfo::host_name)
        .unwrap_or_else(|| "unknown".to_string());

    Json(json!({
        "hostname": hostname,
        "platform": SystemInfo::platform(),
        "runtimeVersion": RUNTIME_VERSION,
        "memory": {
            "used": format!("{} MB", to_megabytes(metrics.resident_bytes)),
            "total": format!("{} MB", to_megabytes(metrics.total_bytes)),
        },
        "uptime": format!("{} seconds", state.uptime_secs().round() as u64),
        "timestamp": timestamp(),
    }))
}

pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let metrics = state.system.lock().sample();

    Html(render_dashboard(&DashboardView {
        uptime_secs: state.uptime_secs().floor() as u64,
        memory_mb: to_megabytes(metrics.resident_bytes),
        runtime_version: RUNTIME_VERSION,
        platform: SystemInfo::platform(),
        environment: state.config.environment.as_str(),
        version: &state.config.version,
        pid: metrics.pid,
    }))
}
