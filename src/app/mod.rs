//! 应用层

pub mod system;
pub mod users;
