//! Load engine: builds a node tree from a directory tree.

use crate::conn::Connection;
use crate::error::NodeError;
use crate::tree::cancel::CancelToken;
use crate::tree::node::Node;
use crate::types::Depth;
use crate::value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Read `conn`'s directory and, depth permitting, its subdirectories.
///
/// A node is returned loaded only once its value and every child have
/// been read; any failure discards the partial tree.
pub(crate) fn load_node(
    conn: Connection,
    depth: Depth,
    cancel: &CancelToken,
) -> Result<Node, NodeError> {
    if depth.is_exhausted() {
        return Ok(Node::unloaded(conn));
    }

    let listing = conn.list()?;
    let value = value::decode(&listing.files).map_err(|e| {
        warn!(path = %conn.path().display(), error = %e, "Failed to decode node value");
        e
    })?;

    let mut children = BTreeMap::new();
    for key in listing.dirs {
        cancel.check()?;
        let child = load_node(conn.join(&key), depth.descend(), cancel)?;
        children.insert(key, child);
    }

    debug!(
        path = %conn.path().display(),
        value_len = value.len(),
        children = children.len(),
        "Loaded node"
    );
    Ok(Node::from_parts(conn, value, children))
}
