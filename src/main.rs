//! ECS 演示服务入口

use std::net::SocketAddr;

use ecs_demo_service::{
    build_router,
    infrastructure::{config::AppConfig, logger::Logger},
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // guard 需要活到进程结束，否则文件日志丢失
    let _log_guard = Logger::init(config.log_dir.as_deref())?;

    let addr = config.socket_addr();
    let port = config.port;
    let environment = config.environment.clone();
    let version = config.version.clone();

    let state = AppState::new(config);
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;

    info!("========================================");
    info!("  🚀 服务启动成功");
    info!("  📍 端口: {}", port);
    info!("  🌍 环境: {}", environment);
    info!("  📦 版本: {}", version);
    info!("  🔗 健康检查: http://localhost:{}/health", port);
    info!("  🏠 首页: http://localhost:{}/", port);
    info!("  📊 仪表盘: http://localhost:{}/dashboard", port);
    info!("========================================");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("服务已停止");
    Ok(())
}

/// 等待 Ctrl+C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("无法注册 SIGTERM 处理器: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("收到 Ctrl+C，开始优雅关闭"),
        _ = terminate => info!("收到 SIGTERM，开始优雅关闭"),
    }
}
