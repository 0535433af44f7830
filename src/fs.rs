pub mod contract;
pub mod memory;
pub mod os;

pub use contract::{DirEntry, EntryKind, FsProvider};
pub use memory::MemoryFs;
pub use os::OsFs;
