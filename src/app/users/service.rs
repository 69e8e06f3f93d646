//! 用户业务服务

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use super::error::UserError;
use super::model::{CreateUserRequest, NewUser, UpdateUserRequest, User};
use super::store::UserStore;
use crate::core::response::timestamp;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn list_users(&self) -> Vec<User> {
        self.store.list()
    }

    /// `id` 为 `None` 表示路径段无法解析为整数，与不存在的 ID 同样处理
    pub fn get_user(&self, id: Option<u64>) -> Result<User, UserError> {
        id.and_then(|id| self.store.find(id))
            .ok_or(UserError::NotFound)
    }

    pub fn create_user(&self, request: CreateUserRequest) -> Result<User, UserError> {
        request.validate().map_err(|_| UserError::MissingFields)?;

        let (Some(name), Some(email)) = (request.name, request.email) else {
            return Err(UserError::MissingFields);
        };

        let user = self.store.insert(NewUser {
            name,
            email,
            created_at: timestamp(),
        })?;

        info!(id = user.id, email = %user.email, "用户已创建");
        Ok(user)
    }

    pub fn update_user(
        &self,
        id: Option<u64>,
        request: UpdateUserRequest,
    ) -> Result<User, UserError> {
        let id = id.ok_or(UserError::NotFound)?;
        let user = self.store.update(id, request.into_changes(timestamp()))?;

        debug!(id = user.id, "用户已更新");
        Ok(user)
    }

    pub fn delete_user(&self, id: Option<u64>) -> Result<User, UserError> {
        let id = id.ok_or(UserError::NotFound)?;
        let user = self.store.remove(id)?;

        info!(id = user.id, "用户已删除");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::users::store::InMemoryUserStore;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserStore::seeded(
            "2025-01-01T00:00:00.000Z",
        )))
    }

    fn create(name: Option<&str>, email: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_create_requires_both_fields() {
        let service = service();

        assert_eq!(
            service.create_user(create(Some("Test"), None)),
            Err(UserError::MissingFields)
        );
        assert_eq!(
            service.create_user(create(None, Some("t@x.com"))),
            Err(UserError::MissingFields)
        );
        assert_eq!(
            service.create_user(create(Some(""), Some("t@x.com"))),
            Err(UserError::MissingFields)
        );
        assert_eq!(service.list_users().len(), 3);
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let service = service();
        let a = service.create_user(create(Some("A"), Some("a@x.com"))).unwrap();
        let b = service.create_user(create(Some("B"), Some("b@x.com"))).unwrap();

        assert_eq!(a.id, 4);
        assert_eq!(b.id, 5);
        assert!(a.updated_at.is_none());
    }

    #[test]
    fn test_create_duplicate_email_conflicts() {
        let service = service();
        assert_eq!(
            service.create_user(create(Some("Other John"), Some("john@example.com"))),
            Err(UserError::EmailTaken)
        );
    }

    #[test]
    fn test_unparsable_id_is_not_found() {
        let service = service();
        assert_eq!(service.get_user(None), Err(UserError::NotFound));
        assert_eq!(
            service.update_user(None, UpdateUserRequest::default()),
            Err(UserError::NotFound)
        );
        assert_eq!(service.delete_user(None), Err(UserError::NotFound));
    }

    #[test]
    fn test_empty_update_only_stamps_updated_at() {
        let service = service();
        let before = service.get_user(Some(2)).unwrap();
        let after = service
            .update_user(
                Some(2),
                UpdateUserRequest {
                    name: Some(String::new()),
                    email: None,
                },
            )
            .unwrap();

        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
        assert!(after.updated_at.is_some());
    }

    #[test]
    fn test_delete_then_get() {
        let service = service();
        let deleted = service.delete_user(Some(3)).unwrap();

        assert_eq!(deleted.name, "Bob Wilson");
        assert_eq!(service.get_user(Some(3)), Err(UserError::NotFound));
    }
}
