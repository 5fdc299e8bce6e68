use anyhow::Context;
use clap::Parser;

mod cli;
mod config;
mod error;
mod models;
mod registry;
mod services;

use cli::{Command, CommandArgs};
use config::load_projects;
use error::WorkError;
use registry::ProjectRegistry;
use services::{NixSignalSender, ProcessControl, ProcessTable, SysinfoPidResolver};

fn main() {
    let args = CommandArgs::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter())).init();

    let code = match run(args) {
        Ok(()) => 0,
        Err(e) => report(&e),
    };
    std::process::exit(code);
}

fn run(args: CommandArgs) -> anyhow::Result<()> {
    let configs = load_projects(args.config.as_deref()).context("Failed to load projects")?;
    let mut registry = ProjectRegistry::from_configs(configs);

    // 整个调用共用一个进程表快照
    let table = ProcessTable::new();
    let resolver = SysinfoPidResolver::new(&table);
    let sender = NixSignalSender::new(&table);
    let ctl = ProcessControl::new(&resolver, &sender);

    match args.command {
        None => print_projects(&registry),
        Some(Command::Pause { project }) => {
            println!("Pausing work on {}", describe(project.as_deref()));
            let project = registry.lookup(project.as_deref())?;
            project.pause(ctl)?;
            log::info!("✅ Paused {} process(es) of '{}'", project.processes().len(), project.name());
        }
        Some(Command::Resume { project }) => {
            println!("Resuming work on {}", describe(project.as_deref()));
            let project = registry.lookup(project.as_deref())?;
            project.resume(ctl)?;
            log::info!("✅ Resumed {} process(es) of '{}'", project.processes().len(), project.name());
        }
    }

    Ok(())
}

fn describe(project: Option<&str>) -> &str {
    project.unwrap_or("default project")
}

fn print_projects(registry: &ProjectRegistry) {
    if registry.is_empty() {
        println!("No projects configured");
        return;
    }
    println!("Active projects:");
    for name in registry.names() {
        println!("{}", name);
    }
}

fn report(err: &anyhow::Error) -> i32 {
    eprintln!("Error: {:#}", err);

    match err.downcast_ref::<WorkError>() {
        Some(work_error) => {
            if let Some(hint) = work_error.param_hint() {
                eprintln!("Check the '{}' argument; run 'work' without arguments to list projects", hint);
            }
            work_error.exit_code()
        }
        None => 1,
    }
}
