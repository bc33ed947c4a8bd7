use clap::{Parser, Subcommand};

/// Editor Hub - Track and install editor versions
///
/// edhub drives the hub command-line tool to list editor releases and
/// install them with optional platform modules. Installed versions are
/// tracked in `$XDG_STATE_HOME/edhub/installs.toml`; the hub command and
/// install location are read from `$XDG_CONFIG_HOME/edhub/config.toml`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List editor versions available for install, newest first
    Available {
        /// Only show versions from this release line (e.g. 2021.3)
        #[arg(short, long, value_name = "BRANCH")]
        branch: Option<String>,
    },

    /// List installable modules
    Modules,

    /// List installed and installing editor versions
    Installed {
        /// Print the install list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Install an editor version
    ///
    /// Waits for the hub to finish. The version is tracked as installing
    /// until then and dropped again if the hub does not report success.
    Install {
        /// Editor version to install (e.g. 2021.3.5f1)
        #[arg(value_name = "VERSION")]
        version: String,

        /// Module to install alongside the editor (repeatable, e.g. -m android -m webgl)
        #[arg(short = 'm', long = "module", value_name = "MODULE")]
        modules: Vec<String>,
    },
}
