use super::Session;
use crate::ui;
use anyhow::{Context, Result};

pub fn execute(session: &mut Session, branch: Option<String>) -> Result<()> {
    let command = session.orchestrator.list_command();
    let output = session
        .runtime
        .block_on(session.dispatcher.fetch(command))
        .context("Version listing worker failed")?;

    let mut versions = session.orchestrator.available_from_output(&output);
    if let Some(branch) = &branch {
        versions.retain(|version| version.branch() == *branch);
    }
    versions.sort_by(|a, b| b.compare(a));

    if versions.is_empty() {
        ui::info("No editor versions available to install.");
        return Ok(());
    }

    for version in &versions {
        if version.is_prerelease() {
            println!("{} (prerelease)", version);
        } else {
            println!("{}", version);
        }
    }
    Ok(())
}
