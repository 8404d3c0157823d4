use crate::storage::{HeapFile, StorageEnvRef, StorageError};
use log::info;
use thiserror::Error;

/// The physical side of an index, identified by `(table_name, index_name)`.
///
/// Only creation and removal are supported: the index reserves a heap file
/// of its own named `<table>-<index>`, so a second `create` of the same
/// index fails and `drop` frees it. Lookups are not implemented.
pub struct DbIndex {
    table_name: String,
    index_name: String,
    file: HeapFile,
}

impl DbIndex {
    pub fn new(table_name: &str, index_name: &str, env: &StorageEnvRef) -> Self {
        let file_name = format!("{}-{}", table_name, index_name);
        Self {
            table_name: table_name.to_owned(),
            index_name: index_name.to_owned(),
            file: HeapFile::new(&file_name, env),
        }
    }
    pub fn create(&mut self) -> Result<(), IndexError> {
        info!("index: create {} on {}", self.index_name, self.table_name);
        self.file.create()?;
        self.file.close();
        Ok(())
    }
    pub fn drop(&mut self) -> Result<(), IndexError> {
        info!("index: drop {} on {}", self.index_name, self.table_name);
        self.file.drop()?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}
