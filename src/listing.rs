use crate::state::InstalledEntry;
use crate::version::EditorVersion;

/// Candidate versions from `e -r` output, skipping anything already tracked.
///
/// Each non-blank line contributes its first whitespace-delimited token, so
/// indentation and CRLF line endings never leak into the raw version.
pub fn parse_available(output: &str, tracked: &[InstalledEntry]) -> Vec<EditorVersion> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|token| !tracked.iter().any(|entry| entry.version.raw() == *token))
        .map(EditorVersion::parse)
        .collect()
}
