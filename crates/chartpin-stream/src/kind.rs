//! Kinds of pinned components in a version stream

use std::fmt;
use std::str::FromStr;

use crate::error::StreamError;

/// What a pinned version belongs to
///
/// Each kind lives in its own top-level directory of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionKind {
    Chart,
    Package,
    Docker,
    Git,
}

impl VersionKind {
    pub const ALL: [VersionKind; 4] = [Self::Chart, Self::Package, Self::Docker, Self::Git];

    /// Name used in templates and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chart => "chart",
            Self::Package => "package",
            Self::Docker => "docker",
            Self::Git => "git",
        }
    }

    /// Directory holding the pins of this kind
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Chart => "charts",
            Self::Package => "packages",
            Self::Docker => "docker",
            Self::Git => "git",
        }
    }
}

impl fmt::Display for VersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionKind {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s || k.dir_name() == s)
            .ok_or_else(|| StreamError::UnknownKind {
                kind: s.to_string(),
            })
    }
}
