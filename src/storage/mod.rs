use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;

mod disk;
mod heap_file;
mod memory;
mod page;

pub use disk::{DiskBlockStore, DiskEnv};
pub use heap_file::HeapFile;
pub use memory::{MemoryBlockStore, MemoryEnv};
pub use page::{PageError, SlottedPage};

pub const BLOCK_SZ: usize = 4096;

/// `BlockID` addresses one block inside a heap file, starting from 1.
pub type BlockID = u32;
/// `RecordID` addresses one record inside a page, starting from 1 and
/// never reused within that page.
pub type RecordID = u16;

pub type Block = [u8; BLOCK_SZ];

/// How a block store should treat its backing resource on open.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenFlags {
    /// create the resource, fail if it already exists
    Create,
    /// open an existing resource, fail if it is absent
    Open,
    /// create the resource or empty an existing one
    Truncate,
}

/// A key-value store of fixed-size blocks belonging to one named heap file.
pub trait BlockStore {
    fn open(&mut self, flags: OpenFlags) -> Result<(), StorageError>;
    fn close(&mut self);
    fn get(&mut self, block_id: BlockID) -> Result<Box<Block>, StorageError>;
    fn put(&mut self, block_id: BlockID, block: &Block) -> Result<(), StorageError>;
    /// permanently remove the backing resource, the store must be closed
    fn remove(&mut self) -> Result<(), StorageError>;
    /// number of blocks currently held
    fn stat(&self) -> Result<usize, StorageError>;
}

/// Hands out block stores by heap file name.
pub trait StorageEnv {
    fn block_store(&self, name: &str) -> Box<dyn BlockStore>;
}

pub type StorageEnvRef = Rc<dyn StorageEnv>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IOError: {0}")]
    IOError(#[from] std::io::Error),
    #[error("{0} already exists")]
    AlreadyExists(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0} is not open")]
    Closed(String),
    #[error("{0} is still open")]
    StillOpen(String),
    #[error("block {0} out of range")]
    BlockOutOfRange(BlockID),
    #[error("path {0:?} is not usable as a data directory")]
    BadDataDir(PathBuf),
    #[error("Page: {0}")]
    Page(#[from] PageError),
}
