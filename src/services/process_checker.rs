use regex::Regex;
use std::sync::{Mutex, PoisonError};
use sysinfo::{Process, ProcessesToUpdate, System};

/// 根据进程名查询 PID
pub trait PidResolver {
    /// 返回当前名称匹配的所有 PID（可能为空，也可能有多个）
    fn resolve(&self, name: &str) -> Vec<i32>;
}

/// 进程名匹配规则
///
/// 与 pgrep/pkill 相同：正则表达式对进程名做非锚定匹配。
/// 无效的正则和 pkill 一样视为错误。
#[derive(Debug, Clone)]
pub struct NameMatcher(Regex);

impl NameMatcher {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(NameMatcher)
    }

    pub fn is_match(&self, process_name: &str) -> bool {
        self.0.is_match(process_name)
    }
}

/// 进程表快照
///
/// 第一次查询时读取系统进程表，之后的查询复用同一快照，
/// 因此一次暂停/恢复只扫描一遍进程表。结果不包含本进程和用户态线程。
#[derive(Default)]
pub struct ProcessTable {
    system: Mutex<Option<System>>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取所有名称匹配的进程 PIDs（升序）
    pub fn matching_pids(&self, matcher: &NameMatcher) -> Vec<i32> {
        let mut guard = self.system.lock().unwrap_or_else(PoisonError::into_inner);
        let sys = guard.get_or_insert_with(|| {
            let mut sys = System::new();
            let count = sys.refresh_processes(ProcessesToUpdate::All, true);
            log::debug!("Scanned process table ({} entries)", count);
            sys
        });

        // 和 pkill 一样，永远不匹配自己
        let own_pid = std::process::id();
        let mut pids: Vec<i32> = sys
            .processes()
            .iter()
            .filter(|(pid, _)| pid.as_u32() != own_pid)
            .filter(|(_, process)| is_main_task(process))
            .filter(|(_, process)| matcher.is_match(&process.name().to_string_lossy()))
            .map(|(pid, _)| pid.as_u32() as i32)
            .collect();

        pids.sort();
        pids
    }

    /// 丢弃快照，下次查询重新扫描
    pub fn refresh(&self) {
        *self.system.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

// Linux 下 sysinfo 会把线程也列为进程
fn is_main_task(process: &Process) -> bool {
    process.thread_kind().is_none()
}

/// 基于 sysinfo 进程表的 PidResolver
pub struct SysinfoPidResolver<'a> {
    table: &'a ProcessTable,
}

impl<'a> SysinfoPidResolver<'a> {
    pub fn new(table: &'a ProcessTable) -> Self {
        Self { table }
    }
}

impl PidResolver for SysinfoPidResolver<'_> {
    fn resolve(&self, name: &str) -> Vec<i32> {
        let matcher = match NameMatcher::new(name) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("Cannot resolve '{}': {}", name, e);
                return Vec::new();
            }
        };
        let pids = self.table.matching_pids(&matcher);
        log::debug!("Resolved '{}' to PIDs {:?}", name, pids);
        pids
    }
}
