//! 核心层：错误、响应、提取器、中间件与共享状态

pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod state;
