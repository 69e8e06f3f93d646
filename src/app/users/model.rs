//! 用户数据模型

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// 创建用户请求，两个字段都必须存在且非空
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
}

/// 更新用户请求
///
/// 缺失、`null` 与空字符串都视为"不修改"，保留原值。
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// 通过校验、待写入存储的新用户
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub created_at: String,
}

/// 对已有用户的修改，`None` 字段保持原值
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub updated_at: String,
}

impl UpdateUserRequest {
    pub fn into_changes(self, updated_at: String) -> UserChanges {
        UserChanges {
            name: self.name.filter(|s| !s.is_empty()),
            email: self.email.filter(|s| !s.is_empty()),
            updated_at,
        }
    }
}

/// 解析路径中的用户 ID
///
/// 读取前导整数：跳过前导空白，允许一个符号，取最长的连续数字
/// (`"12abc"` 得到 12)。没有数字、负数或溢出都返回 `None`，调用方按"未找到"处理。
pub fn parse_user_id(segment: &str) -> Option<u64> {
    let rest = segment.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }

    let value: u64 = digits.parse().ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("1"), Some(1));
        assert_eq!(parse_user_id("  42"), Some(42));
        assert_eq!(parse_user_id("+7"), Some(7));
        assert_eq!(parse_user_id("12abc"), Some(12));
        assert_eq!(parse_user_id("abc"), None);
        assert_eq!(parse_user_id(""), None);
        assert_eq!(parse_user_id("-3"), None);
        assert_eq!(parse_user_id("99999999999999999999999"), None);
    }

    #[test]
    fn test_create_request_validation() {
        let ok = CreateUserRequest {
            name: Some("A".to_string()),
            email: Some("a@x.com".to_string()),
        };
        assert!(ok.validate().is_ok());

        let missing = CreateUserRequest {
            name: Some("A".to_string()),
            email: None,
        };
        assert!(missing.validate().is_err());

        let empty = CreateUserRequest {
            name: Some(String::new()),
            email: Some("a@x.com".to_string()),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_update_request_ignores_empty_values() {
        let changes = UpdateUserRequest {
            name: Some(String::new()),
            email: Some("new@x.com".to_string()),
        }
        .into_changes("2025-01-01T00:00:00.000Z".to_string());

        assert_eq!(changes.name, None);
        assert_eq!(changes.email.as_deref(), Some("new@x.com"));
    }

    #[test]
    fn test_user_json_shape() {
        let user = User {
            id: 1,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            created_at: "2025-01-01T00:00:00.000Z".to_string(),
            updated_at: None,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["createdAt"], "2025-01-01T00:00:00.000Z");
        assert!(value.get("updatedAt").is_none());
    }
}
