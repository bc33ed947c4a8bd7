use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::orchestrator::InstallOrchestrator;
use crate::runner::ShellRunner;
use crate::state::StateFile;
use crate::util::xdg;
use crate::worker::{Completions, Dispatcher};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::runtime::Runtime;

mod available;
mod install;
mod installed;
mod modules;

/// Everything a command needs: the orchestrator that owns install state and
/// the background machinery that runs hub commands for it.
pub(crate) struct Session {
    runtime: Runtime,
    orchestrator: InstallOrchestrator<StateFile>,
    dispatcher: Dispatcher,
    completions: Completions,
}

impl Session {
    fn open() -> Result<Self> {
        let config_path = xdg::config_file()?;
        let config = Config::load(&config_path)?;
        let store = StateFile::new(xdg::state_file()?);
        tracing::debug!("Install state at {:?}", store.path());

        let orchestrator = InstallOrchestrator::new(&config, store)?;
        let runtime = Runtime::new().context("Failed to start background runtime")?;
        let (dispatcher, completions) =
            Dispatcher::new(runtime.handle().clone(), Arc::new(ShellRunner::new()));

        Ok(Self {
            runtime,
            orchestrator,
            dispatcher,
            completions,
        })
    }
}

pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Modules => modules::execute(),

        Commands::Available { branch } => available::execute(&mut Session::open()?, branch),

        Commands::Installed { json } => installed::execute(&Session::open()?, json),

        Commands::Install { version, modules } => {
            install::execute(&mut Session::open()?, version, modules)
        }
    }
}
