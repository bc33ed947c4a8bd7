//! Command lines understood by the hub CLI.

use crate::catalog::ModuleSelection;
use crate::config::Config;
use crate::version::EditorVersion;

/// Printed by the hub once an editor and its modules are on disk.
pub const SUCCESS_MARKER: &str = "successfully downloaded";

/// `<hub> e -r`: lists editor releases available for install.
pub fn list_command(config: &Config) -> String {
    format!("{} e -r", config.hub_command)
}

/// `<hub> <subcommand> --version <raw> [-m <token>]* [<confirm>]`
pub fn install_command(
    config: &Config,
    version: &EditorVersion,
    modules: &ModuleSelection,
) -> String {
    let template = &config.install;
    let mut command = format!(
        "{} {} --version {}",
        config.hub_command,
        template.subcommand,
        version.raw()
    );

    for module in modules.enabled() {
        command.push_str(" -m ");
        command.push_str(module.token());
    }

    if let Some(flag) = &template.confirm_flag {
        command.push(' ');
        command.push_str(flag);
    }

    command
}

pub fn install_succeeded(output: &str) -> bool {
    output.contains(SUCCESS_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Module;
    use crate::config::InstallTemplate;

    fn config() -> Config {
        Config {
            hub_command: "hub".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn list_command_uses_hub() {
        assert_eq!(list_command(&config()), "hub e -r");
    }

    #[test]
    fn install_command_without_modules() {
        let version = EditorVersion::parse("2021.3.5f1");
        let command = install_command(&config(), &version, &ModuleSelection::new());
        assert_eq!(command, "hub im --version 2021.3.5f1 --cm");
    }

    #[test]
    fn install_command_lists_modules_in_catalog_order() {
        let version = EditorVersion::parse("2021.3.5f1");
        let mut modules = ModuleSelection::new();
        modules.toggle(Module::WebGl, true);
        modules.toggle(Module::Android, true);

        let command = install_command(&config(), &version, &modules);
        assert_eq!(
            command,
            "hub im --version 2021.3.5f1 -m android -m webgl --cm"
        );
    }

    #[test]
    fn legacy_install_command() {
        let config = Config {
            install: InstallTemplate::legacy(),
            ..config()
        };
        let version = EditorVersion::parse("2020.1.0f1");
        let modules: ModuleSelection = [Module::Ios].into_iter().collect();

        let command = install_command(&config, &version, &modules);
        assert_eq!(command, "hub i --version 2020.1.0f1 -m ios");
    }

    #[test]
    fn success_marker_is_case_sensitive() {
        assert!(install_succeeded(
            "Editor 2021.3.5f1 successfully downloaded and installed"
        ));
        assert!(!install_succeeded("Successfully Downloaded"));
        assert!(!install_succeeded("license declined"));
        assert!(!install_succeeded(""));
    }
}
