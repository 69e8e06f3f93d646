//! 用户领域错误

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Name and email are required")]
    MissingFields,
    #[error("Email already exists")]
    EmailTaken,
    #[error("User not found")]
    NotFound,
}
