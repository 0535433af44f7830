//! Node tree: the in-memory view of a database directory and the engines
//! that load it from and save it to a filesystem provider.

pub mod cancel;
pub mod load;
pub mod node;
pub mod save;

pub use cancel::CancelToken;
pub use node::Node;
