use crate::error::{ProcessFailure, WorkError};
use crate::models::ProcessRecord;
use crate::services::{ProcessControl, SignalError};

/// 一个项目：一组按顺序暂停/恢复的进程
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    name: String,
    processes: Vec<ProcessRecord>,
}

impl ProjectRecord {
    pub fn new(name: impl Into<String>, processes: Vec<ProcessRecord>) -> Self {
        Self {
            name: name.into(),
            processes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    pub fn pause(&mut self, ctl: ProcessControl<'_>) -> Result<&mut Self, WorkError> {
        self.for_each_process(|process| process.pause(ctl).map(|_| ()))
    }

    pub fn resume(&mut self, ctl: ProcessControl<'_>) -> Result<&mut Self, WorkError> {
        self.for_each_process(|process| process.resume(ctl).map(|_| ()))
    }

    /// 依次处理每个进程，单个失败不影响其余进程，最后统一汇报
    fn for_each_process<F>(&mut self, mut op: F) -> Result<&mut Self, WorkError>
    where
        F: FnMut(&mut ProcessRecord) -> Result<(), SignalError>,
    {
        let mut failures = Vec::new();

        for process in self.processes.iter_mut() {
            if let Err(error) = op(process) {
                failures.push(ProcessFailure {
                    process: process.name().to_string(),
                    error,
                });
            }
        }

        if failures.is_empty() {
            Ok(self)
        } else {
            Err(WorkError::SignalDelivery {
                project: self.name.clone(),
                failures,
            })
        }
    }
}
