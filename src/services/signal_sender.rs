use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::unistd::Pid;
use thiserror::Error;

use crate::models::ControlSignal;
use crate::services::process_checker::{NameMatcher, ProcessTable};

/// 信号投递结果（可容忍的情况不算错误）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// 成功投递到 N 个进程
    Delivered(usize),
    /// 没有匹配的进程（ESRCH / pkill 退出码 1）
    NoSuchProcess,
    /// 无权限（EPERM）
    NotPermitted,
}

/// 不可容忍的信号投递错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("failed to send {signal} to {target}: {errno}")]
    Os {
        target: String,
        signal: ControlSignal,
        errno: Errno,
    },

    #[error("invalid process pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// 向进程发送控制信号
pub trait SignalSender {
    /// 定向发送：发给指定 PID
    fn send_to_pid(&self, pid: i32, signal: ControlSignal) -> Result<Delivery, SignalError>;

    /// 广播发送：发给所有名称匹配的进程
    fn send_to_matching(&self, pattern: &str, signal: ControlSignal) -> Result<Delivery, SignalError>;
}

/// 基于 kill(2) 的 SignalSender，广播发送使用共享的进程表快照
pub struct NixSignalSender<'a> {
    table: &'a ProcessTable,
}

impl<'a> NixSignalSender<'a> {
    pub fn new(table: &'a ProcessTable) -> Self {
        Self { table }
    }
}

impl SignalSender for NixSignalSender<'_> {
    fn send_to_pid(&self, pid: i32, signal: ControlSignal) -> Result<Delivery, SignalError> {
        send_pid(pid, signal)
    }

    fn send_to_matching(&self, pattern: &str, signal: ControlSignal) -> Result<Delivery, SignalError> {
        let matcher = NameMatcher::new(pattern).map_err(|e| SignalError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let pids = self.table.matching_pids(&matcher);
        if pids.is_empty() {
            log::debug!("No process matches '{}', skipping {}", pattern, signal);
            return Ok(Delivery::NoSuchProcess);
        }

        signal_each(pattern, &pids, signal, |pid| send_pid(pid, signal))
    }
}

fn send_pid(pid: i32, signal: ControlSignal) -> Result<Delivery, SignalError> {
    match kill(Pid::from_raw(pid), signal.as_signal()) {
        Ok(()) => {
            log::debug!("Sent {} to PID {}", signal, pid);
            Ok(Delivery::Delivered(1))
        }
        Err(Errno::ESRCH) => {
            log::debug!("PID {} does not exist, skipping {}", pid, signal);
            Ok(Delivery::NoSuchProcess)
        }
        Err(Errno::EPERM) => {
            log::debug!("Not permitted to send {} to PID {}", signal, pid);
            Ok(Delivery::NotPermitted)
        }
        Err(errno) => {
            log::error!("Failed to send {} to PID {}: {}", signal, pid, errno);
            Err(SignalError::Os {
                target: format!("PID {}", pid),
                signal,
                errno,
            })
        }
    }
}

/// 逐个发送并汇总：有一个成功即为 Delivered，全部无权限为 NotPermitted
fn signal_each<F>(
    pattern: &str,
    pids: &[i32],
    signal: ControlSignal,
    mut send: F,
) -> Result<Delivery, SignalError>
where
    F: FnMut(i32) -> Result<Delivery, SignalError>,
{
    let mut delivered = 0;
    let mut denied = 0;

    for &pid in pids {
        let outcome = send(pid).map_err(|e| match e {
            SignalError::Os { errno, .. } => SignalError::Os {
                target: format!("'{}' (PID {})", pattern, pid),
                signal,
                errno,
            },
            other => other,
        })?;

        match outcome {
            Delivery::Delivered(n) => delivered += n,
            Delivery::NotPermitted => denied += 1,
            // 枚举之后进程已退出
            Delivery::NoSuchProcess => {}
        }
    }

    log::debug!("Sent {} to {} process(es) matching '{}'", signal, delivered, pattern);

    Ok(if delivered > 0 {
        Delivery::Delivered(delivered)
    } else if denied > 0 {
        Delivery::NotPermitted
    } else {
        Delivery::NoSuchProcess
    })
}
