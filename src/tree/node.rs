//! Database node type and its in-memory operations.

use crate::conn::Connection;
use crate::error::NodeError;
use crate::tree::cancel::CancelToken;
use crate::tree::{load, save};
use crate::types::{validate_key, Depth};
use crate::value::Codec;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Value and children of a loaded node. Present together or not at all.
#[derive(Debug)]
pub(crate) struct Contents {
    pub(crate) value: Vec<u8>,
    pub(crate) children: BTreeMap<String, Node>,
}

/// One node of the database, backed by one directory.
///
/// The node's value is derived from the names of the files inside the
/// directory; each subdirectory is a child node keyed by its name.
///
/// A node may be unloaded, meaning its directory has not been read. This
/// happens below the depth limit of a load, and keeps large subtrees off
/// the heap until they are asked for with [`Node::reload`].
#[derive(Debug)]
pub struct Node {
    conn: Connection,
    contents: Option<Contents>,
}

impl Node {
    pub(crate) fn unloaded(conn: Connection) -> Self {
        Self {
            conn,
            contents: None,
        }
    }

    pub(crate) fn from_parts(
        conn: Connection,
        value: Vec<u8>,
        children: BTreeMap<String, Node>,
    ) -> Self {
        Self {
            conn,
            contents: Some(Contents { value, children }),
        }
    }

    /// A loaded, empty node that has not been read from storage.
    ///
    /// Saving it replaces whatever exists at the connection's path.
    pub fn new_root(conn: Connection) -> Self {
        Self::from_parts(conn, Vec::new(), BTreeMap::new())
    }

    /// Load the whole subtree at the connection's path.
    pub fn load(conn: Connection) -> Result<Node, NodeError> {
        Self::load_depth(conn, Depth::Unbounded)
    }

    /// Load at most `depth` levels below and including this node.
    pub fn load_depth(conn: Connection, depth: Depth) -> Result<Node, NodeError> {
        Self::load_with_cancel(conn, depth, &CancelToken::new())
    }

    /// Like [`Node::load_depth`], aborting with `Cancelled` once `cancel` fires.
    pub fn load_with_cancel(
        conn: Connection,
        depth: Depth,
        cancel: &CancelToken,
    ) -> Result<Node, NodeError> {
        load::load_node(conn, depth, cancel)
    }

    /// Load the whole subtree at `path` on the host filesystem.
    pub fn load_os(path: impl Into<PathBuf>) -> Result<Node, NodeError> {
        Self::load(Connection::os(path))
    }

    /// Load `path` on the host filesystem up to `depth`.
    pub fn load_os_depth(path: impl Into<PathBuf>, depth: Depth) -> Result<Node, NodeError> {
        Self::load_depth(Connection::os(path), depth)
    }

    /// Re-read this node from storage in place.
    ///
    /// On failure the node keeps its previous state.
    pub fn reload(&mut self, depth: Depth) -> Result<(), NodeError> {
        *self = Self::load_depth(self.conn.clone(), depth)?;
        Ok(())
    }

    /// Write this subtree to storage, replacing what is there.
    pub fn save(&self) -> Result<(), NodeError> {
        self.save_with(&Codec::default(), &CancelToken::new())
    }

    /// Save with an explicit codec and cancellation token.
    pub fn save_with(&self, codec: &Codec, cancel: &CancelToken) -> Result<(), NodeError> {
        save::save_node(self, codec, cancel)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn path(&self) -> &Path {
        self.conn.path()
    }

    pub fn is_loaded(&self) -> bool {
        self.contents.is_some()
    }

    pub(crate) fn contents(&self) -> Result<&Contents, NodeError> {
        self.contents
            .as_ref()
            .ok_or_else(|| NodeError::not_loaded(self.conn.path()))
    }

    fn contents_mut(&mut self) -> Result<&mut Contents, NodeError> {
        match self.contents.as_mut() {
            Some(contents) => Ok(contents),
            None => Err(NodeError::not_loaded(self.conn.path())),
        }
    }

    pub fn value(&self) -> Result<&[u8], NodeError> {
        Ok(&self.contents()?.value)
    }

    /// Replace the value in memory. Nothing is written until the next save.
    pub fn set_value(&mut self, value: impl Into<Vec<u8>>) -> Result<(), NodeError> {
        self.contents_mut()?.value = value.into();
        Ok(())
    }

    pub fn child(&self, key: &str) -> Result<&Node, NodeError> {
        self.contents()?
            .children
            .get(key)
            .ok_or_else(|| NodeError::NotFound {
                key: key.to_string(),
            })
    }

    pub fn child_mut(&mut self, key: &str) -> Result<&mut Node, NodeError> {
        self.contents_mut()?
            .children
            .get_mut(key)
            .ok_or_else(|| NodeError::NotFound {
                key: key.to_string(),
            })
    }

    /// Children in key order.
    pub fn children(&self) -> Result<impl Iterator<Item = (&str, &Node)>, NodeError> {
        Ok(self
            .contents()?
            .children
            .iter()
            .map(|(key, child)| (key.as_str(), child)))
    }

    /// Child keys in sorted order.
    pub fn keys(&self) -> Result<Vec<&str>, NodeError> {
        Ok(self.children()?.map(|(key, _)| key).collect())
    }

    /// Create an empty, loaded child in memory.
    ///
    /// The child reaches storage on the next save of any ancestor.
    pub fn new_child(&mut self, key: &str) -> Result<&mut Node, NodeError> {
        let conn = &self.conn;
        let contents = match self.contents.as_mut() {
            Some(contents) => contents,
            None => return Err(NodeError::not_loaded(conn.path())),
        };
        validate_key(key)?;
        if contents.children.contains_key(key) {
            return Err(NodeError::AlreadyExists {
                key: key.to_string(),
            });
        }
        let child = Node::new_root(conn.join(key));
        Ok(contents.children.entry(key.to_string()).or_insert(child))
    }
}
