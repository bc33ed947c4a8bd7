use super::Session;
use crate::ui;
use anyhow::{Context, Result};

pub fn execute(session: &Session, json: bool) -> Result<()> {
    let entries = session.orchestrator.entries();

    if json {
        let rendered =
            serde_json::to_string_pretty(entries).context("Failed to serialize install list")?;
        println!("{rendered}");
        return Ok(());
    }

    if entries.is_empty() {
        ui::info("No editor versions installed. Use 'edhub install <VERSION>' to add one.");
        return Ok(());
    }

    for entry in entries {
        let line = format!("{} {}", entry.version, entry.path.display());
        if entry.installing {
            ui::status("Installing", line);
        } else {
            ui::success("Installed", line);
        }
    }
    Ok(())
}
