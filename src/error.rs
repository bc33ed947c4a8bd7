use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HubError {
    #[error("No editor version selected")]
    NoVersionSelected,

    #[error("'{0}' is not a valid editor version (expected e.g. 2021.3.5f1)")]
    InvalidVersion(String),

    #[error("Unknown module '{token}' (available: {available})")]
    UnknownModule { token: String, available: String },

    #[error("No tracked install for version '{0}'")]
    UntrackedVersion(String),
}
