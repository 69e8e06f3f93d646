//! 健康检查、首页、仪表盘与服务信息

pub mod dashboard;
pub mod handler;
