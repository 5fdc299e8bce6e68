//! 错误类型

use thiserror::Error;

use crate::services::SignalError;

/// 单个进程的投递失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessFailure {
    pub process: String,
    pub error: SignalError,
}

#[derive(Error, Debug)]
pub enum WorkError {
    #[error("Invalid value for 'project': project '{name}' isn't defined")]
    ProjectNotFound { name: String },

    #[error("No projects are configured")]
    NoProjects,

    #[error("{} process(es) of project '{project}' could not be signaled: {}", .failures.len(), summarize(.failures))]
    SignalDelivery {
        project: String,
        failures: Vec<ProcessFailure>,
    },
}

impl WorkError {
    /// 出错的命令行参数名
    pub const PARAM_HINT: &'static str = "project";

    pub fn param_hint(&self) -> Option<&'static str> {
        match self {
            WorkError::ProjectNotFound { .. } | WorkError::NoProjects => Some(Self::PARAM_HINT),
            WorkError::SignalDelivery { .. } => None,
        }
    }

    /// 进程退出码：参数错误为 2，其余为 1
    pub fn exit_code(&self) -> i32 {
        match self {
            WorkError::ProjectNotFound { .. } | WorkError::NoProjects => 2,
            WorkError::SignalDelivery { .. } => 1,
        }
    }
}

fn summarize(failures: &[ProcessFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.process, f.error))
        .collect::<Vec<_>>()
        .join(", ")
}
