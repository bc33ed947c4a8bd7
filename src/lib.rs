// Public API
pub mod cli;
pub mod commands;

// Core domain types
mod catalog;
mod config;
mod error;
mod hub;
mod listing;
mod orchestrator;
mod runner;
mod state;
mod ui;
mod util;
mod version;
mod worker;

// Re-export main types
pub use catalog::{available_modules, Module, ModuleSelection};
pub use config::{Config, InstallTemplate};
pub use error::HubError;
pub use hub::{install_command, list_command, SUCCESS_MARKER};
pub use listing::parse_available;
pub use orchestrator::{InstallEvent, InstallOrchestrator, InstallResolution};
pub use runner::{CommandRunner, ShellRunner};
pub use state::{InstallState, InstalledEntry, SettingsStore, StateFile};
pub use version::{Channel, EditorVersion};
pub use worker::{Completions, Dispatcher, InstallOutcome, InstallRequest};
