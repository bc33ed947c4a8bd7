use super::Session;
use crate::catalog::{available_modules, Module};
use crate::error::HubError;
use crate::orchestrator::InstallResolution;
use crate::ui;
use crate::version::EditorVersion;
use anyhow::{bail, Context, Result};

pub fn execute(session: &mut Session, version: String, modules: Vec<String>) -> Result<()> {
    if !EditorVersion::is_valid(&version) {
        return Err(HubError::InvalidVersion(version).into());
    }
    let version = EditorVersion::parse(&version);

    let orchestrator = &mut session.orchestrator;
    if orchestrator
        .entries()
        .iter()
        .any(|entry| entry.version == version && !entry.installing)
    {
        bail!("{version} is already tracked. See 'edhub installed'.");
    }
    if orchestrator.forget_stale(&version) > 0 {
        ui::info(format!("Retrying unfinished install of {version}"));
    }

    orchestrator.select_version(version.clone());
    for token in &modules {
        let module = Module::from_token(token).ok_or_else(|| HubError::UnknownModule {
            token: token.clone(),
            available: available_modules()
                .iter()
                .map(|m| m.token())
                .collect::<Vec<_>>()
                .join(", "),
        })?;
        orchestrator.toggle_module(module, true);
    }

    let label = if modules.is_empty() {
        version.to_string()
    } else {
        format!("{version} with {}", modules.join(", "))
    };
    let progress = ui::Progress::new("Installing", label);

    orchestrator.submit_selection(&session.dispatcher)?;
    for event in orchestrator.take_events() {
        tracing::debug!("{event:?}");
    }

    let outcome = session
        .runtime
        .block_on(session.completions.next())
        .context("Install worker stopped before reporting a result")?;

    match session.orchestrator.complete_install(outcome)? {
        InstallResolution::Installed => {
            progress.success("Installed");
            Ok(())
        }
        InstallResolution::Removed => {
            progress.fail("Failed", "the hub did not report a successful download");
            bail!("Install of {version} failed");
        }
    }
}

