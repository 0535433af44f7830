//! Infinite: a hierarchical key/value database stored in filenames.
//!
//! Every node of the database is a directory. A node's value lives in the
//! names of zero-length files inside that directory, and each subdirectory
//! is a child node. Since the files are empty, the data takes up no file
//! content at all.

pub mod config;
pub mod conn;
pub mod error;
pub mod fs;
pub mod logging;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod value;

pub use conn::Connection;
pub use error::{ApiError, ErrorKind, NodeError};
pub use tree::{CancelToken, Node};
pub use types::Depth;
pub use value::Codec;
