use nix::sys::signal::Signal;
use std::fmt;

/// 作业控制信号：暂停 / 继续
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    Stop,
    Continue,
}

impl ControlSignal {
    /// 对应的系统信号（SIGTSTP / SIGCONT）
    pub fn as_signal(self) -> Signal {
        match self {
            ControlSignal::Stop => Signal::SIGTSTP,
            ControlSignal::Continue => Signal::SIGCONT,
        }
    }
}

impl fmt::Display for ControlSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_signal().as_str())
    }
}
