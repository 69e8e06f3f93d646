//! 基础设施层：配置、日志与系统信息

pub mod config;
pub mod logger;
pub mod system;
