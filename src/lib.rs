//! # ECS 演示服务
//!
//! 面向容器编排健康检查的冒烟测试目标：
//! - 健康检查与服务信息端点
//! - 内存用户集合上的增删改查
//! - 统一的错误响应与 404 兜底

pub mod app;
pub mod core;
pub mod infrastructure;
pub mod routes;

pub use crate::core::state::AppState;
pub use infrastructure::config::{AppConfig, ConfigError, Environment};
pub use routes::build_router;
