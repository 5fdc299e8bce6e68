pub mod process_checker;
pub mod signal_sender;

pub use process_checker::{PidResolver, ProcessTable, SysinfoPidResolver};
pub use signal_sender::{Delivery, NixSignalSender, SignalError, SignalSender};

/// 暂停/恢复时使用的外部依赖
#[derive(Clone, Copy)]
pub struct ProcessControl<'a> {
    pub resolver: &'a dyn PidResolver,
    pub sender: &'a dyn SignalSender,
}

impl<'a> ProcessControl<'a> {
    pub fn new(resolver: &'a dyn PidResolver, sender: &'a dyn SignalSender) -> Self {
        Self { resolver, sender }
    }
}
