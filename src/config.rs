//! 项目配置的加载与规范化
//!
//! 配置是一个 JSON 数组，每个项目包含名称和进程列表。进程既可以写成
//! 字符串（只有名称），也可以写成 `{"name": ..., "pid": ...}` 对象，
//! 加载时统一转换为 [`ProcessConfig`]。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::services::process_checker::NameMatcher;

/// 未指定配置文件时使用的内置项目
pub const DEFAULT_PROJECTS: &str = r#"[
    {"name": "ec", "processes": ["dotnet", "docker", "npm", "node"]}
]"#;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// 进程配置（规范形式）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<i32>,
}

/// 配置文件里的进程条目，字符串是 `{"name": ...}` 的简写
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ProcessEntry {
    Name(String),
    Full(ProcessConfig),
}

impl From<ProcessEntry> for ProcessConfig {
    fn from(entry: ProcessEntry) -> Self {
        match entry {
            ProcessEntry::Name(name) => ProcessConfig { name, pid: None },
            ProcessEntry::Full(config) => config,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawProject {
    name: String,
    #[serde(default)]
    processes: Vec<ProcessEntry>,
}

/// 项目配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawProject")]
pub struct ProjectConfig {
    pub name: String,
    pub processes: Vec<ProcessConfig>,
}

impl From<RawProject> for ProjectConfig {
    fn from(raw: RawProject) -> Self {
        ProjectConfig {
            name: raw.name,
            processes: raw.processes.into_iter().map(ProcessConfig::from).collect(),
        }
    }
}

impl ProjectConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("project name must not be empty".to_string()));
        }

        for process in &self.processes {
            if process.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "project '{}' has a process with an empty name",
                    self.name
                )));
            }
            // 与 pkill 一致，无效模式是配置错误
            if let Err(e) = NameMatcher::new(&process.name) {
                return Err(ConfigError::Invalid(format!(
                    "process '{}' in project '{}' is not a valid pattern: {}",
                    process.name, self.name, e
                )));
            }
            // 0 和负数会被 kill(2) 解释为进程组
            if let Some(pid) = process.pid {
                if pid <= 0 {
                    return Err(ConfigError::Invalid(format!(
                        "process '{}' in project '{}' has invalid pid {}",
                        process.name, self.name, pid
                    )));
                }
            }
        }

        Ok(())
    }
}

/// 解析并校验 JSON 配置
pub fn parse_projects(json: &str) -> Result<Vec<ProjectConfig>, ConfigError> {
    let projects: Vec<ProjectConfig> = serde_json::from_str(json)?;
    for project in &projects {
        project.validate()?;
    }
    Ok(projects)
}

/// 从文件加载配置，未指定路径时使用内置配置
pub fn load_projects(path: Option<&Path>) -> Result<Vec<ProjectConfig>, ConfigError> {
    match path {
        Some(path) => {
            log::info!("Loading projects from {}", path.display());
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_projects(&content)
        }
        None => {
            log::debug!("No config file given, using built-in projects");
            parse_projects(DEFAULT_PROJECTS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_projects() {
        let projects = load_projects(None).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "ec");
        let names: Vec<_> = projects[0].processes.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["dotnet", "docker", "npm", "node"]);
        assert!(projects[0].processes.iter().all(|p| p.pid.is_none()));
    }

    #[test]
    fn test_shorthand_and_explicit_entries() {
        let projects = parse_projects(
            r#"[{"name": "web", "processes": ["node", {"name": "postgres", "pid": 812}, {"name": "redis"}]}]"#,
        )
        .unwrap();

        assert_eq!(
            projects[0].processes,
            vec![
                ProcessConfig { name: "node".to_string(), pid: None },
                ProcessConfig { name: "postgres".to_string(), pid: Some(812) },
                ProcessConfig { name: "redis".to_string(), pid: None },
            ]
        );
    }

    #[test]
    fn test_serializes_canonical_form() {
        let projects = parse_projects(r#"[{"name": "a", "processes": ["x"]}]"#).unwrap();
        let json = serde_json::to_value(&projects).unwrap();
        assert_eq!(json, serde_json::json!([{"name": "a", "processes": [{"name": "x"}]}]));
    }

    #[test]
    fn test_rejects_invalid_entries() {
        assert!(matches!(
            parse_projects(r#"[{"name": "", "processes": []}]"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse_projects(r#"[{"name": "a", "processes": [""]}]"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse_projects(r#"[{"name": "a", "processes": [{"name": "x", "pid": 0}]}]"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse_projects(r#"[{"name": "a", "processes": ["dotnet("]}]"#),
            Err(ConfigError::Invalid(ref msg)) if msg.contains("not a valid pattern")
        ));
        assert!(matches!(
            parse_projects(r#"[{"name": "a", "processes": [42]}]"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "api", "processes": ["cargo"]}}]"#).unwrap();

        let projects = load_projects(Some(file.path())).unwrap();
        assert_eq!(projects[0].name, "api");
    }

    #[test]
    fn test_missing_file() {
        let err = load_projects(Some(Path::new("/nonexistent/work.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
