use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_HUB_COMMAND: &str =
    "/Applications/Unity\\ Hub.app/Contents/MacOS/Unity\\ Hub -- --headless";
const DEFAULT_INSTALL_ROOT: &str = "/Applications/Unity/Hub/Editor";
const DEFAULT_INSTALL_SUBCOMMAND: &str = "im";
const DEFAULT_CONFIRM_FLAG: &str = "--cm";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Shell-quoted command line that invokes the hub in headless mode.
    #[serde(default = "default_hub_command")]
    pub hub_command: String,
    /// Directory editors are installed into, one sub-directory per version.
    #[serde(default = "default_install_root")]
    pub install_root: String,
    #[serde(default)]
    pub install: InstallTemplate,
}

/// Shape of the install command, which differs between hub releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallTemplate {
    #[serde(default = "default_install_subcommand")]
    pub subcommand: String,
    /// Flag accepting license prompts unattended; older hubs have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_flag: Option<String>,
}

impl Default for InstallTemplate {
    fn default() -> Self {
        Self {
            subcommand: default_install_subcommand(),
            confirm_flag: Some(DEFAULT_CONFIRM_FLAG.to_string()),
        }
    }
}

impl InstallTemplate {
    /// `install` without the module/confirmation extensions.
    pub fn legacy() -> Self {
        Self {
            subcommand: "i".to_string(),
            confirm_flag: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hub_command: default_hub_command(),
            install_root: default_install_root(),
            install: InstallTemplate::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file {:?}", path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            toml::to_string_pretty(self).context("Failed to serialize edhub config file")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {:?}", path))?;
        Ok(())
    }

    /// Install root with `~` and environment variables expanded.
    pub fn install_root(&self) -> Result<PathBuf> {
        let expanded = shellexpand::full(&self.install_root)
            .with_context(|| format!("Failed to expand install_root {:?}", self.install_root))?;
        Ok(PathBuf::from(expanded.as_ref()))
    }
}

fn default_hub_command() -> String {
    DEFAULT_HUB_COMMAND.to_string()
}

fn default_install_root() -> String {
    DEFAULT_INSTALL_ROOT.to_string()
}

fn default_install_subcommand() -> String {
    DEFAULT_INSTALL_SUBCOMMAND.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.install.subcommand, "im");
        assert_eq!(config.install.confirm_flag.as_deref(), Some("--cm"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "hub_command = \"hub\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.hub_command, "hub");
        assert_eq!(config.install_root, DEFAULT_INSTALL_ROOT);
        assert_eq!(config.install, InstallTemplate::default());
    }

    #[test]
    fn legacy_install_template_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
hub_command = "hub"

[install]
subcommand = "i"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.install, InstallTemplate::legacy());
    }

    #[test]
    fn save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");
        let config = Config {
            hub_command: "hub --headless".to_string(),
            install_root: "/opt/editors".to_string(),
            install: InstallTemplate::legacy(),
        };

        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn invalid_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "hub_command = [").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    #[serial]
    fn install_root_expands_env() {
        std::env::set_var("EDHUB_TEST_ROOT", "/srv/editors");
        let config = Config {
            install_root: "$EDHUB_TEST_ROOT/hub".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.install_root().unwrap(),
            PathBuf::from("/srv/editors/hub")
        );
        std::env::remove_var("EDHUB_TEST_ROOT");
    }
}
