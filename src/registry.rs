use crate::config::ProjectConfig;
use crate::error::WorkError;
use crate::models::{ProcessRecord, ProjectRecord};

/// 已知项目集合，每次调用启动时构建一次
#[derive(Debug, Clone, Default)]
pub struct ProjectRegistry {
    projects: Vec<ProjectRecord>,
}

impl ProjectRegistry {
    pub fn new(projects: Vec<ProjectRecord>) -> Self {
        for (i, project) in projects.iter().enumerate() {
            if projects[..i].iter().any(|p| p.name() == project.name()) {
                log::warn!("Project '{}' is defined more than once, using the first", project.name());
            }
        }
        Self { projects }
    }

    pub fn from_configs(configs: Vec<ProjectConfig>) -> Self {
        let projects = configs
            .into_iter()
            .map(|config| {
                let processes = config
                    .processes
                    .into_iter()
                    .map(|p| match p.pid {
                        Some(pid) => ProcessRecord::with_pid(p.name, pid),
                        None => ProcessRecord::new(p.name),
                    })
                    .collect();
                ProjectRecord::new(config.name, processes)
            })
            .collect();

        Self::new(projects)
    }

    /// 项目名（按注册顺序）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.projects.iter().map(|p| p.name())
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// 查找项目
    ///
    /// 给定名称时返回第一个同名项目；未给定时返回第一个注册的项目。
    pub fn lookup(&mut self, name: Option<&str>) -> Result<&mut ProjectRecord, WorkError> {
        match name {
            Some(name) => self
                .projects
                .iter_mut()
                .find(|p| p.name() == name)
                .ok_or_else(|| WorkError::ProjectNotFound {
                    name: name.to_string(),
                }),
            None => self.projects.first_mut().ok_or(WorkError::NoProjects),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_projects;
    use crate::models::ControlSignal;
    use crate::services::fakes::{FakeResolver, FakeSender, Sent};
    use crate::services::ProcessControl;

    fn example() -> ProjectRegistry {
        ProjectRegistry::from_configs(load_projects(None).unwrap())
    }

    fn make_registry(names: &[&str]) -> ProjectRegistry {
        ProjectRegistry::new(
            names
                .iter()
                .map(|name| ProjectRecord::new(*name, vec![ProcessRecord::new(format!("{name}-proc"))]))
                .collect(),
        )
    }

    #[test]
    fn test_lookup_by_name() {
        let mut registry = make_registry(&["alpha", "beta", "gamma"]);
        for name in ["alpha", "beta", "gamma"] {
            assert_eq!(registry.lookup(Some(name)).unwrap().name(), name);
            assert_eq!(registry.lookup(Some(name)).unwrap().name(), name);
        }
    }

    #[test]
    fn test_lookup_missing() {
        let mut registry = example();
        let err = registry.lookup(Some("missing")).unwrap_err();
        assert!(matches!(&err, WorkError::ProjectNotFound { name } if name == "missing"));
        assert_eq!(err.param_hint(), Some("project"));
    }

    #[test]
    fn test_lookup_is_exact() {
        let mut registry = make_registry(&["ec"]);
        assert!(registry.lookup(Some("e")).is_err());
        assert!(registry.lookup(Some("EC")).is_err());
        assert!(registry.lookup(Some("ec ")).is_err());
    }

    #[test]
    fn test_default_is_first_registered() {
        let mut registry = example();
        assert_eq!(registry.lookup(None).unwrap().name(), "ec");
        assert_eq!(registry.lookup(None).unwrap().name(), "ec");

        let mut registry = make_registry(&["first", "second"]);
        for _ in 0..3 {
            assert_eq!(registry.lookup(None).unwrap().name(), "first");
        }
    }

    #[test]
    fn test_default_on_empty_registry() {
        let mut registry = ProjectRegistry::default();
        assert!(matches!(registry.lookup(None), Err(WorkError::NoProjects)));
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let mut registry = ProjectRegistry::new(vec![
            ProjectRecord::new("dup", vec![ProcessRecord::new("one")]),
            ProjectRecord::new("dup", vec![ProcessRecord::new("two")]),
        ]);
        let project = registry.lookup(Some("dup")).unwrap();
        assert_eq!(project.processes()[0].name(), "one");
    }

    #[test]
    fn test_names_in_registration_order() {
        let registry = make_registry(&["b", "a", "c"]);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_explicit_pid_from_config() {
        let configs = crate::config::parse_projects(
            r#"[{"name": "db", "processes": [{"name": "postgres", "pid": 812}]}]"#,
        )
        .unwrap();
        let mut registry = ProjectRegistry::from_configs(configs);
        let project = registry.lookup(Some("db")).unwrap();
        assert_eq!(project.processes()[0].cached_pid(), Some(812));
    }

    #[test]
    fn test_example_pause_is_broad_only() {
        let resolver = FakeResolver::default();
        let sender = FakeSender::default();
        let mut registry = example();

        registry
            .lookup(Some("ec"))
            .unwrap()
            .pause(ProcessControl::new(&resolver, &sender))
            .unwrap();

        let sent = sender.sent();
        assert_eq!(sent.len(), 4);
        assert!(sent
            .iter()
            .all(|s| matches!(s, Sent::Matching(_, ControlSignal::Stop))));
    }
}
