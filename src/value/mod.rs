//! Value Codec
//!
//! Converts a node value into a set of filenames and back. Each filename
//! carries one base64url-encoded fragment of the value plus the fragment's
//! index, so the value survives as the names of zero-length files.

pub mod chunk;

pub use chunk::ChunkName;

use crate::error::NodeError;
use crate::types::MAX_NAME_LEN;
use chunk::decimal_width;

/// Smallest budget that fits one payload byte and a single-digit index.
pub const MIN_NAME_LEN: usize = 6;

/// Splits values into filename-sized chunks under a fixed length budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    max_name_len: Option<usize>,
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            max_name_len: Some(MAX_NAME_LEN),
        }
    }
}

impl Codec {
    /// Codec producing filenames of at most `max_name_len` characters.
    pub fn new(max_name_len: usize) -> Result<Self, NodeError> {
        if max_name_len < MIN_NAME_LEN {
            return Err(NodeError::InvalidValue(format!(
                "filename budget {} is below the minimum of {}",
                max_name_len, MIN_NAME_LEN
            )));
        }
        Ok(Self {
            max_name_len: Some(max_name_len),
        })
    }

    /// Codec with no length budget: every value becomes a single chunk.
    pub fn unbounded() -> Self {
        Self { max_name_len: None }
    }

    pub fn max_name_len(&self) -> Option<usize> {
        self.max_name_len
    }

    /// Raw bytes that fit in the chunk at `index`.
    ///
    /// The payload budget is what remains after the separator and the
    /// index digits; base64 spends 4 characters per 3 bytes. At the default
    /// budget of 255 this is 189 bytes for indexes 0-9, two more than the
    /// `floor(L/4)*3 - digits - 1` rule, which also overshoots `L` when `L`
    /// is a multiple of 4. Chunk boundaries therefore differ from that rule's
    /// output; [`Codec::decode`] accepts either, since it only needs a
    /// contiguous index run.
    fn chunk_capacity(&self, index: usize) -> Option<usize> {
        let max = self.max_name_len?;
        let budget = max.saturating_sub(1 + decimal_width(index));
        Some((budget / 4) * 3)
    }

    /// Encode `value` into filenames ordered by chunk index.
    ///
    /// An empty value produces no filenames.
    pub fn encode(&self, value: &[u8]) -> Result<Vec<String>, NodeError> {
        let mut names = Vec::new();
        let mut rest = value;
        let mut index = 0;

        while !rest.is_empty() {
            let take = match self.chunk_capacity(index) {
                None => rest.len(),
                Some(0) => {
                    return Err(NodeError::InvalidValue(format!(
                        "value of {} bytes does not fit in {}-character filenames",
                        value.len(),
                        self.max_name_len.unwrap_or_default()
                    )));
                }
                Some(capacity) => capacity.min(rest.len()),
            };

            let (head, tail) = rest.split_at(take);
            let name = ChunkName::new(index, head).to_filename();
            debug_assert!(self.max_name_len.map_or(true, |max| name.len() <= max));
            names.push(name);

            rest = tail;
            index += 1;
        }

        Ok(names)
    }

    /// Decode a node's filenames back into its value.
    ///
    /// The names may arrive in any order. Their indices must form the run
    /// `0, 1, 2, ...` with no gap and no repeat.
    pub fn decode<I, S>(&self, names: I) -> Result<Vec<u8>, NodeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut chunks = names
            .into_iter()
            .map(|name| ChunkName::parse(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        chunks.sort_by_key(|chunk| chunk.index);

        for (expected, chunk) in chunks.iter().enumerate() {
            if chunk.index != expected {
                let problem = if chunk.index < expected {
                    "duplicate"
                } else if expected == 0 {
                    "does not start at 0"
                } else {
                    "gap before"
                };
                return Err(NodeError::InvalidValue(format!(
                    "chunk index {} {} (expected {})",
                    chunk.index, problem, expected
                )));
            }
        }

        let total = chunks.iter().map(|chunk| chunk.payload.len()).sum();
        let mut value = Vec::with_capacity(total);
        for chunk in chunks {
            value.extend_from_slice(&chunk.payload);
        }
        Ok(value)
    }
}

/// Encode with the default 255-character budget.
pub fn encode(value: &[u8]) -> Result<Vec<String>, NodeError> {
    Codec::default().encode(value)
}

/// Decode filenames produced by any [`Codec`].
pub fn decode<I, S>(names: I) -> Result<Vec<u8>, NodeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Codec::default().decode(names)
}
