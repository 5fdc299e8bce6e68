use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Work - 暂停/恢复一个项目的所有进程
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// 项目配置文件（JSON），未指定时使用内置配置
    #[arg(short, long, env = "WORK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// 日志详细程度（-v info，-vv debug）
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 暂停项目的所有进程
    Pause {
        /// 项目名，省略时使用第一个项目
        project: Option<String>,
    },
    /// 恢复项目的所有进程
    Resume {
        /// 项目名，省略时使用第一个项目
        project: Option<String>,
    },
}

impl CommandArgs {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
