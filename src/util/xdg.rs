use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "edhub";

fn xdg_base(var: &str, fallback: &str) -> Result<PathBuf> {
    if let Some(value) = env::var_os(var).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(value));
    }

    let base_dirs = directories::BaseDirs::new().context("Failed to get home directory")?;
    Ok(base_dirs.home_dir().join(fallback))
}

/// `$XDG_CONFIG_HOME/edhub`, or `~/.config/edhub`
pub fn config_dir() -> Result<PathBuf> {
    Ok(xdg_base("XDG_CONFIG_HOME", ".config")?.join(APP_DIR))
}

/// `$XDG_STATE_HOME/edhub`, or `~/.local/state/edhub`
pub fn state_dir() -> Result<PathBuf> {
    Ok(xdg_base("XDG_STATE_HOME", ".local/state")?.join(APP_DIR))
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn state_file() -> Result<PathBuf> {
    Ok(state_dir()?.join("installs.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn honours_xdg_overrides() {
        let temp = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp.path().join("config"));
        env::set_var("XDG_STATE_HOME", temp.path().join("state"));

        assert_eq!(
            config_file().unwrap(),
            temp.path().join("config/edhub/config.toml")
        );
        assert_eq!(
            state_file().unwrap(),
            temp.path().join("state/edhub/installs.toml")
        );

        env::remove_var("XDG_CONFIG_HOME");
        env::remove_var("XDG_STATE_HOME");
    }

    #[test]
    #[serial]
    fn falls_back_to_home() {
        env::remove_var("XDG_STATE_HOME");
        let dir = state_dir().unwrap();
        assert!(dir.ends_with(".local/state/edhub"));
    }
}
