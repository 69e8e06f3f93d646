//! 日志基础设施

use std::io;
use std::path::Path;

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` 未设置时使用的过滤规则
pub const DEFAULT_FILTER: &str = "info,tower_http=debug";

/// 日志文件前缀
const FILE_PREFIX: &str = "ecs-demo-service";

pub struct Logger;

impl Logger {
    /// 初始化日志系统
    ///
    /// 始终输出到控制台；给出 `log_dir` 时额外按日期分割写入文件。
    /// 返回的 guard 必须在进程生命周期内持有，否则文件日志会丢失。
    pub fn init(log_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let (file_layer, guard) = match log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let (writer, guard) = non_blocking(rolling::daily(dir, FILE_PREFIX));
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(false)
                    .with_thread_names(true);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stdout))
            .with(file_layer)
            .try_init()?;

        Ok(guard)
    }
}
