//! 进程与主机信息

use sysinfo::{Pid, System};

/// 编译本程序所用的 rustc 版本
pub const RUNTIME_VERSION: &str = env!("BUILD_RUSTC_VERSION");

/// 一次采样得到的进程指标
#[derive(Debug, Clone, Copy)]
pub struct ProcessMetrics {
    pub pid: u32,
    /// 常驻内存 (字节)
    pub resident_bytes: u64,
    /// 系统总内存 (字节)
    pub total_bytes: u64,
}

pub struct SystemInfo {
    system: System,
    pid: Option<Pid>,
}

impl SystemInfo {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            pid: sysinfo::get_current_pid().ok(),
        }
    }

    pub fn sample(&mut self) -> ProcessMetrics {
        self.system.refresh_memory();

        let resident_bytes = match self.pid {
            Some(pid) if self.system.refresh_process(pid) => self
                .system
                .process(pid)
                .map(|p| p.memory())
                .unwrap_or_default(),
            _ => 0,
        };

        ProcessMetrics {
            pid: std::process::id(),
            resident_bytes,
            total_bytes: self.system.total_memory(),
        }
    }

    /// 操作系统报告的主机名
    pub fn host_name() -> Option<String> {
        System::host_name()
    }

    /// 运行平台，例如 `linux`
    pub fn platform() -> &'static str {
        std::env::consts::OS
    }
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// 字节数换算为整数 MB
pub fn to_megabytes(bytes: u64) -> u64 {
    (bytes as f64 / 1024.0 / 1024.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_megabytes() {
        assert_eq!(to_megabytes(0), 0);
        assert_eq!(to_megabytes(1024 * 1024), 1);
        assert_eq!(to_megabytes(1024 * 1024 * 3 / 2), 2);
    }

    #[test]
    fn test_sample_reports_current_process() {
        let metrics = SystemInfo::new().sample();
        assert_eq!(metrics.pid, std::process::id());
        assert!(metrics.total_bytes > 0);
    }
}
