//! 路由装配

use axum::{
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::app::{system::handler as system, users::handler as users};
use crate::core::{
    middleware::{
        error_context_middleware, not_found, panic_response, request_logging_middleware,
        security_headers_middleware,
    },
    state::AppState,
};

/// 同时注册带尾斜杠的路径，`/api/users/` 与 `/api/users` 等价
fn route_lenient(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{}/", path), method_router)
}

/// 全部业务路由，不含中间件
pub fn routes() -> Router<AppState> {
    let router = Router::new().route("/", get(system::root));
    let router = route_lenient(router, "/health", get(system::health_check));
    let router = route_lenient(router, "/dashboard", get(system::dashboard));
    let router = route_lenient(router, "/api", get(system::api_info));
    let router = route_lenient(router, "/api/info", get(system::server_info));
    let router = route_lenient(
        router,
        "/api/users",
        get(users::list_users).post(users::create_user),
    );
    route_lenient(
        router,
        "/api/users/:id",
        get(users::get_user)
            .put(users::update_user)
            .delete(users::delete_user),
    )
}

/// 给路由挂上兜底处理器与中间件链
///
/// 由外到内：CORS、追踪、访问日志、安全头、错误上下文、panic 捕获。
pub fn with_layers(router: Router<AppState>, state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error_context_middleware,
        ))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// 完整的应用路由
pub fn build_router(state: AppState) -> Router {
    with_layers(routes(), state)
}
