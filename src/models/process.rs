use crate::models::ControlSignal;
use crate::services::{Delivery, PidResolver, ProcessControl, SignalError};

/// 一个可被暂停/恢复的进程
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    /// 进程名（同时作为广播匹配的模式）
    name: String,
    /// 缓存的 PID，一旦确定不再清除
    cached_pid: Option<i32>,
}

impl ProcessRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cached_pid: None,
        }
    }

    pub fn with_pid(name: impl Into<String>, pid: i32) -> Self {
        Self {
            name: name.into(),
            cached_pid: Some(pid),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cached_pid(&self) -> Option<i32> {
        self.cached_pid
    }

    /// 获取进程的 PID
    ///
    /// 已缓存则直接返回；否则查询 resolver，仅当恰好有一个候选时才缓存。
    /// 没有或有多个候选时返回 None，下次调用会重新查询。
    pub fn resolve_id(&mut self, resolver: &dyn PidResolver) -> Option<i32> {
        if let Some(pid) = self.cached_pid {
            return Some(pid);
        }

        match resolver.resolve(&self.name).as_slice() {
            [pid] => {
                log::debug!("Cached PID {} for '{}'", pid, self.name);
                self.cached_pid = Some(*pid);
                self.cached_pid
            }
            [] => None,
            candidates => {
                log::debug!(
                    "'{}' is ambiguous ({} candidates: {:?}), using name match only",
                    self.name,
                    candidates.len(),
                    candidates
                );
                None
            }
        }
    }

    pub fn pause(&mut self, ctl: ProcessControl<'_>) -> Result<&mut Self, SignalError> {
        self.send_control(ctl, ControlSignal::Stop)
    }

    pub fn resume(&mut self, ctl: ProcessControl<'_>) -> Result<&mut Self, SignalError> {
        self.send_control(ctl, ControlSignal::Continue)
    }

    /// 定向发送（已知 PID 时）+ 按名称广播发送，两者都会尝试
    fn send_control(
        &mut self,
        ctl: ProcessControl<'_>,
        signal: ControlSignal,
    ) -> Result<&mut Self, SignalError> {
        let mut first_error = None;

        if let Some(pid) = self.resolve_id(ctl.resolver) {
            let targeted = ctl.sender.send_to_pid(pid, signal);
            self.absorb(targeted, &mut first_error);
        }

        let broad = ctl.sender.send_to_matching(&self.name, signal);
        self.absorb(broad, &mut first_error);

        match first_error {
            Some(e) => Err(e),
            None => Ok(self),
        }
    }

    fn absorb(
        &self,
        result: Result<Delivery, SignalError>,
        first_error: &mut Option<SignalError>,
    ) {
        match result {
            Ok(Delivery::Delivered(count)) => {
                log::info!("{}: signal delivered to {} process(es)", self.name, count);
            }
            Ok(tolerated) => {
                log::debug!("{}: {:?}, ignored", self.name, tolerated);
            }
            Err(e) => {
                log::warn!("{}: {}", self.name, e);
                first_error.get_or_insert(e);
            }
        }
    }
}
