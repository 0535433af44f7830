//! Chunk names: one `<payload>.<index>` filename per value fragment.

use crate::error::NodeError;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use std::fmt;

/// Separator between the encoded payload and the chunk index.
pub const SEPARATOR: char = '.';

/// A decoded value fragment and its position in the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkName {
    pub index: usize,
    pub payload: Vec<u8>,
}

impl ChunkName {
    pub fn new(index: usize, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            index,
            payload: payload.into(),
        }
    }

    /// Parse a filename of the form `<base64url-payload>.<decimal-index>`.
    pub fn parse(name: &str) -> Result<Self, NodeError> {
        if name.matches(SEPARATOR).count() != 1 {
            return Err(NodeError::InvalidValue(format!(
                "filename {:?} must contain exactly one '{}'",
                name, SEPARATOR
            )));
        }
        let (encoded, suffix) = name.split_once(SEPARATOR).ok_or_else(|| {
            NodeError::InvalidValue(format!("filename {:?} has no index", name))
        })?;

        let index = parse_index(suffix).ok_or_else(|| {
            NodeError::InvalidValue(format!(
                "filename {:?} has invalid index {:?}",
                name, suffix
            ))
        })?;

        let payload = URL_SAFE.decode(encoded).map_err(|e| {
            NodeError::InvalidValue(format!("filename {:?} has malformed payload: {}", name, e))
        })?;

        Ok(Self { index, payload })
    }

    /// Render this chunk as a filename.
    pub fn to_filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChunkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", URL_SAFE.encode(&self.payload), SEPARATOR, self.index)
    }
}

/// Decimal index with no sign and no leading zeros other than `0` itself.
fn parse_index(suffix: &str) -> Option<usize> {
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if suffix.len() > 1 && suffix.starts_with('0') {
        return None;
    }
    suffix.parse().ok()
}

/// Number of decimal digits needed to print `n`.
pub(crate) fn decimal_width(n: usize) -> usize {
    let mut width = 1;
    let mut rest = n / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}
