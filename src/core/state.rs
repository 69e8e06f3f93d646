//! 应用共享状态

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::app::users::{service::UserService, store::InMemoryUserStore};
use crate::infrastructure::{config::AppConfig, system::SystemInfo};

use super::response::timestamp;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: UserService,
    pub system: Arc<Mutex<SystemInfo>>,
    pub started_at: Instant,
}

impl AppState {
    /// 使用带示例数据的内存存储
    pub fn new(config: AppConfig) -> Self {
        let store = InMemoryUserStore::seeded(&timestamp());
        Self::with_users(config, UserService::new(Arc::new(store)))
    }

    pub fn with_users(config: AppConfig, users: UserService) -> Self {
        Self {
            config: Arc::new(config),
            users,
            system: Arc::new(Mutex::new(SystemInfo::new())),
            started_at: Instant::now(),
        }
    }

    /// 进程启动以来的秒数
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
