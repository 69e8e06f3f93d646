//! 用户资源：内存集合上的增删改查

pub mod error;
pub mod handler;
pub mod model;
pub mod service;
pub mod store;
