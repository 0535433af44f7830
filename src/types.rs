//! Core types shared by the codec, the providers and the node tree.

use crate::error::NodeError;

/// Maximum filename length on common filesystems.
pub const MAX_NAME_LEN: usize = 255;

/// How many parent-to-child levels a load reads eagerly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Read at most this many levels; `Limited(0)` leaves the node unloaded.
    Limited(usize),
    /// Read the entire subtree.
    Unbounded,
}

impl Depth {
    /// True when no further level may be read.
    pub fn is_exhausted(self) -> bool {
        matches!(self, Depth::Limited(0))
    }

    /// Budget left for the next level down.
    pub fn descend(self) -> Depth {
        match self {
            Depth::Limited(n) => Depth::Limited(n.saturating_sub(1)),
            Depth::Unbounded => Depth::Unbounded,
        }
    }
}

impl From<Option<usize>> for Depth {
    fn from(depth: Option<usize>) -> Self {
        match depth {
            Some(n) => Depth::Limited(n),
            None => Depth::Unbounded,
        }
    }
}

/// Check that `key` maps to exactly one path segment.
pub fn validate_key(key: &str) -> Result<(), NodeError> {
    let reason = if key.is_empty() {
        Some("key is empty")
    } else if key == "." || key == ".." {
        Some("key is a relative path component")
    } else if key.contains(['/', '\\', '\0']) {
        Some("key contains a path separator")
    } else if key.len() > MAX_NAME_LEN {
        Some("key exceeds the filename length limit")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(NodeError::InvalidKey {
            key: key.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
