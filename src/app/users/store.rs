//! 用户存储
//!
//! `UserStore` 是处理器依赖的存储接口，`InMemoryUserStore` 是进程内实现：
//! 用户集合与 ID 计数器放在同一把互斥锁后面，所有读写都经过它。

use parking_lot::Mutex;

use super::error::UserError;
use super::model::{NewUser, User, UserChanges};

/// 用户存储接口
pub trait UserStore: Send + Sync {
    /// 按插入顺序返回全部用户
    fn list(&self) -> Vec<User>;

    fn find(&self, id: u64) -> Option<User>;

    /// 分配下一个 ID 并追加；邮箱已存在时返回 `EmailTaken`
    fn insert(&self, new_user: NewUser) -> Result<User, UserError>;

    fn update(&self, id: u64, changes: UserChanges) -> Result<User, UserError>;

    /// 移除并返回被删除的用户，ID 不回收
    fn remove(&self, id: u64) -> Result<User, UserError>;
}

struct Inner {
    users: Vec<User>,
    next_id: u64,
}

pub struct InMemoryUserStore {
    inner: Mutex<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// 带三条示例数据的存储，下一个 ID 为 4
    pub fn seeded(created_at: &str) -> Self {
        let store = Self::new();
        let samples = [
            ("John Doe", "john@example.com"),
            ("Jane Smith", "jane@example.com"),
            ("Bob Wilson", "bob@example.com"),
        ];

        {
            let mut inner = store.inner.lock();
            for (name, email) in samples {
                let id = inner.next_id;
                inner.next_id += 1;
                inner.users.push(User {
                    id,
                    name: name.to_string(),
                    email: email.to_string(),
                    created_at: created_at.to_string(),
                    updated_at: None,
                });
            }
        }

        store
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().users.len()
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    fn list(&self) -> Vec<User> {
        self.inner.lock().users.clone()
    }

    fn find(&self, id: u64) -> Option<User> {
        self.inner.lock().users.iter().find(|u| u.id == id).cloned()
    }

    fn insert(&self, new_user: NewUser) -> Result<User, UserError> {
        let mut inner = self.inner.lock();

        if inner.users.iter().any(|u| u.email == new_user.email) {
            return Err(UserError::EmailTaken);
        }

        let user = User {
            id: inner.next_id,
            name: new_user.name,
            email: new_user.email,
            created_at: new_user.created_at,
            updated_at: None,
        };
        inner.next_id += 1;
        inner.users.push(user.clone());

        Ok(user)
    }

    fn update(&self, id: u64, changes: UserChanges) -> Result<User, UserError> {
        let mut inner = self.inner.lock();

        let index = inner
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(UserError::NotFound)?;

        // 邮箱不能改成其他用户已占用的值
        if let Some(ref email) = changes.email {
            if inner.users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(UserError::EmailTaken);
            }
        }

        let user = &mut inner.users[index];
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        user.updated_at = Some(changes.updated_at);

        Ok(user.clone())
    }

    fn remove(&self, id: u64) -> Result<User, UserError> {
        let mut inner = self.inner.lock();

        let index = inner
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(UserError::NotFound)?;

        Ok(inner.users.remove(index))
    }
}
