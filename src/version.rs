use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Release track encoded by the single letter between patch and iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Alpha,
    Beta,
    Final,
    Patch,
    China,
}

impl Channel {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'a' => Some(Channel::Alpha),
            'b' => Some(Channel::Beta),
            'f' => Some(Channel::Final),
            'p' => Some(Channel::Patch),
            'c' => Some(Channel::China),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Channel::Alpha => 'a',
            Channel::Beta => 'b',
            Channel::Final => 'f',
            Channel::Patch => 'p',
            Channel::China => 'c',
        }
    }
}

// Channels order by their letter, not by release maturity: `c` sorts before `f`.
impl Ord for Channel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code().cmp(&other.code())
    }
}

impl PartialOrd for Channel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Alpha => write!(f, "alpha"),
            Channel::Beta => write!(f, "beta"),
            Channel::Final => write!(f, "final"),
            Channel::Patch => write!(f, "patch"),
            Channel::China => write!(f, "china"),
        }
    }
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+)\.(\d+)\.(\d+)([abfpc])(\d+)").expect("version pattern is valid")
    })
}

/// An editor version such as `2021.3.5f1`.
///
/// Values that do not match the version grammar are kept as a sentinel: the
/// raw token is preserved but every structured field stays at its default.
/// Equality and hashing only consider the raw token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EditorVersion {
    raw: String,
    major: u64,
    minor: u64,
    patch: u64,
    channel: Option<Channel>,
    iteration: u64,
}

impl EditorVersion {
    /// Parse a raw token. Trailing text after the iteration (a build hash,
    /// a changeset label) is ignored.
    pub fn parse(raw: &str) -> Self {
        let Some(captures) = version_pattern().captures(raw) else {
            tracing::debug!("'{raw}' is not a valid editor version");
            return Self {
                raw: raw.to_string(),
                ..Self::default()
            };
        };

        let number = |idx: usize| {
            captures
                .get(idx)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .unwrap_or(0)
        };
        let channel = captures
            .get(4)
            .and_then(|m| m.as_str().chars().next())
            .and_then(Channel::from_code);

        Self {
            raw: raw.to_string(),
            major: number(1),
            minor: number(2),
            patch: number(3),
            channel,
            iteration: number(5),
        }
    }

    /// The "nothing selected" value.
    pub fn null() -> Self {
        Self::default()
    }

    /// Whether `raw` matches the version grammar.
    pub fn is_valid(raw: &str) -> bool {
        version_pattern().is_match(raw)
    }

    /// Whether the raw token matched the version grammar.
    ///
    /// An unparsed value is not necessarily `null()`: a non-conforming token
    /// keeps its raw text, and equality only looks at raw text.
    pub fn is_parsed(&self) -> bool {
        self.channel.is_some()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn is_official(&self) -> bool {
        self.channel == Some(Channel::Final)
    }

    pub fn is_alpha(&self) -> bool {
        self.channel == Some(Channel::Alpha)
    }

    pub fn is_beta(&self) -> bool {
        self.channel == Some(Channel::Beta)
    }

    pub fn is_prerelease(&self) -> bool {
        self.is_alpha() || self.is_beta()
    }

    /// `major.minor`, used to group versions of the same release line.
    pub fn branch(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// Total order over `(major, minor, patch, channel, iteration)`.
    ///
    /// This is deliberately not an `Ord` impl: two versions can compare equal
    /// here while carrying different raw tokens (trailing build labels).
    pub fn compare(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then(self.channel.cmp(&other.channel))
            .then(self.iteration.cmp(&other.iteration))
    }
}

impl PartialEq for EditorVersion {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for EditorVersion {}

impl Hash for EditorVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for EditorVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<String> for EditorVersion {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<EditorVersion> for String {
    fn from(version: EditorVersion) -> Self {
        version.raw
    }
}
