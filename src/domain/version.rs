use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{BumprError, Result};

/// Optional single non-digit prefix, then three dot-separated integers.
/// Leading zeros are rejected so that formatting a parsed value gives back
/// the exact input.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^0-9.\s])?(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)$")
        .expect("version pattern is valid")
});

/// Version declared by a project, e.g. `1.4.2` or `v2.0.0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub prefix: Option<char>,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version without prefix
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            prefix: None,
            major,
            minor,
            patch,
        }
    }

    pub fn with_prefix(mut self, prefix: char) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Parse `prefix?major.minor.patch`
    ///
    /// Anything else (two or four components, non-numeric parts, whitespace,
    /// pre-release or build suffixes) fails with [BumprError::InvalidFormat].
    pub fn parse(text: &str) -> Result<Self> {
        let caps = VERSION_RE
            .captures(text)
            .ok_or_else(|| BumprError::InvalidFormat(text.to_string()))?;

        let component = |idx: usize| -> Result<u64> {
            caps[idx]
                .parse::<u64>()
                .map_err(|_| BumprError::InvalidFormat(text.to_string()))
        };

        Ok(Version {
            prefix: caps.get(1).and_then(|m| m.as_str().chars().next()),
            major: component(2)?,
            minor: component(3)?,
            patch: component(4)?,
        })
    }

    /// Return the bumped version; the prefix is carried through unchanged.
    ///
    /// [BumpKind::Republish] re-emits the version as is. Bumping a component
    /// that is already `u64::MAX` fails with [BumprError::InvalidFormat].
    pub fn bump(&self, kind: BumpKind) -> Result<Self> {
        let next = |component: u64| {
            component
                .checked_add(1)
                .ok_or_else(|| BumprError::InvalidFormat(self.to_string()))
        };

        Ok(match kind {
            BumpKind::Major => Version {
                major: next(self.major)?,
                minor: 0,
                patch: 0,
                ..*self
            },
            BumpKind::Minor => Version {
                minor: next(self.minor)?,
                patch: 0,
                ..*self
            },
            BumpKind::Patch => Version {
                patch: next(self.patch)?,
                ..*self
            },
            BumpKind::Republish => *self,
        })
    }

    /// Compare by (major, minor, patch). The prefix is ignored.
    pub fn compare(&self, other: &Version) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.prefix {
            write!(f, "{}", prefix)?;
        }
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = BumprError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// What a release run does to the current version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
    /// Publish the current version again after removing its tag and release
    Republish,
}

impl BumpKind {
    pub fn name(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
            BumpKind::Republish => "republish",
        }
    }

    pub fn is_republish(&self) -> bool {
        matches!(self, BumpKind::Republish)
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BumpKind {
    type Err = BumprError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            "republish" => Ok(BumpKind::Republish),
            other => Err(BumprError::config(format!("invalid bump type: {}", other))),
        }
    }
}
