use anyhow::Result;
use std::path::PathBuf;

use crate::catalog::{Module, ModuleSelection};
use crate::config::Config;
use crate::error::HubError;
use crate::hub;
use crate::listing;
use crate::state::{InstalledEntry, SettingsStore};
use crate::version::EditorVersion;
use crate::worker::{Dispatcher, InstallOutcome, InstallRequest};

/// Notifications for whatever is presenting the install list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEvent {
    Started { version: String },
    /// The version/module picker should close.
    SelectionDismissed,
    Installed { version: String },
    Removed { version: String },
}

/// How a finished install changed the tracked list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallResolution {
    Installed,
    Removed,
}

/// Owns the tracked install list, the current version/module selection and
/// the store the list is persisted to.
///
/// Every mutation happens through `&mut self`, so all state changes run on
/// whichever thread owns the orchestrator. Hub commands run elsewhere via
/// [`Dispatcher`], and their outcomes come back through
/// [`InstallOrchestrator::complete_install`].
pub struct InstallOrchestrator<S: SettingsStore> {
    config: Config,
    install_root: PathBuf,
    store: S,
    entries: Vec<InstalledEntry>,
    selected: EditorVersion,
    modules: ModuleSelection,
    events: Vec<InstallEvent>,
}

impl<S: SettingsStore> InstallOrchestrator<S> {
    pub fn new(config: &Config, store: S) -> Result<Self> {
        let install_root = config.install_root()?;
        let entries = store.load()?;
        tracing::debug!("Loaded {} tracked install(s)", entries.len());

        Ok(Self {
            config: config.clone(),
            install_root,
            store,
            entries,
            selected: EditorVersion::null(),
            modules: ModuleSelection::new(),
            events: Vec::new(),
        })
    }

    /// Snapshot of tracked installs, in submission order.
    pub fn entries(&self) -> &[InstalledEntry] {
        &self.entries
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn selected_version(&self) -> &EditorVersion {
        &self.selected
    }

    pub fn module_selection(&self) -> &ModuleSelection {
        &self.modules
    }

    pub fn select_version(&mut self, version: EditorVersion) {
        self.selected = version;
    }

    pub fn toggle_module(&mut self, module: Module, on: bool) {
        self.modules.toggle(module, on);
    }

    /// Installing is possible once something other than the sentinel is picked.
    pub fn can_install(&self) -> bool {
        self.selected != EditorVersion::null()
    }

    /// Drain the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<InstallEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn list_command(&self) -> String {
        hub::list_command(&self.config)
    }

    /// Versions in a listing that are not tracked yet.
    pub fn available_from_output(&self, output: &str) -> Vec<EditorVersion> {
        listing::parse_available(output, &self.entries)
    }

    /// Record the intent to install `version` and build the hub command.
    ///
    /// The entry is tracked as installing before anything runs. Nothing
    /// stops the same version from being submitted twice; the second entry
    /// is a duplicate that completion never resolves.
    pub fn begin_install(
        &mut self,
        version: &EditorVersion,
        modules: &ModuleSelection,
    ) -> Result<InstallRequest, HubError> {
        if *version == EditorVersion::null() {
            return Err(HubError::NoVersionSelected);
        }

        let command = hub::install_command(&self.config, version, modules);

        self.entries.push(InstalledEntry {
            version: version.clone(),
            path: self.install_root.join(version.raw()),
            installing: true,
        });
        self.persist();

        self.selected = EditorVersion::null();
        self.modules = ModuleSelection::new();
        self.events.push(InstallEvent::Started {
            version: version.raw().to_string(),
        });
        self.events.push(InstallEvent::SelectionDismissed);

        Ok(InstallRequest {
            version: version.raw().to_string(),
            command,
        })
    }

    /// Apply a finished install to the tracked list.
    ///
    /// Resolves the first entry whose raw version matches. A miss means the
    /// entry vanished while the command ran; it is reported, not applied.
    pub fn complete_install(
        &mut self,
        outcome: InstallOutcome,
    ) -> Result<InstallResolution, HubError> {
        let Some(index) = self
            .entries
            .iter()
            .position(|entry| entry.version.raw() == outcome.version)
        else {
            tracing::error!("Install finished for untracked version {}", outcome.version);
            return Err(HubError::UntrackedVersion(outcome.version));
        };

        let resolution = if outcome.succeeded() {
            self.entries[index].installing = false;
            tracing::info!("Installed {}", outcome.version);
            self.events.push(InstallEvent::Installed {
                version: outcome.version,
            });
            InstallResolution::Installed
        } else {
            self.entries.remove(index);
            tracing::warn!("Install of {} failed: {}", outcome.version, outcome.output.trim());
            self.events.push(InstallEvent::Removed {
                version: outcome.version,
            });
            InstallResolution::Removed
        };

        self.persist();
        Ok(resolution)
    }

    /// Drop entries for `version` that are still marked installing.
    ///
    /// An install that never reported back (the process was killed) leaves
    /// such an entry behind in the state file. Returns how many were dropped.
    pub fn forget_stale(&mut self, version: &EditorVersion) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !(entry.installing && entry.version == *version));
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::info!("Dropped {dropped} stale install record(s) for {version}");
            self.persist();
        }
        dropped
    }

    /// Track `version` and start its install in the background.
    pub fn submit_install(
        &mut self,
        version: &EditorVersion,
        modules: &ModuleSelection,
        dispatcher: &Dispatcher,
    ) -> Result<(), HubError> {
        let request = self.begin_install(version, modules)?;
        dispatcher.dispatch_install(request);
        Ok(())
    }

    /// [`submit_install`](Self::submit_install) with the current selection.
    pub fn submit_selection(&mut self, dispatcher: &Dispatcher) -> Result<(), HubError> {
        let version = self.selected.clone();
        let modules = self.modules.clone();
        self.submit_install(&version, &modules, dispatcher)
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.persist(&self.entries) {
            tracing::warn!("Failed to persist install state: {err:#}");
        }
    }
}
