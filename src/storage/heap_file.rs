use super::*;
use log::{debug, info};

/// An ordered run of slotted pages, block ids `1..=last`.
pub struct HeapFile {
    name: String,
    last: BlockID,
    closed: bool,
    store: Box<dyn BlockStore>,
}

impl HeapFile {
    pub fn new(name: &str, env: &StorageEnvRef) -> Self {
        Self {
            name: name.to_owned(),
            last: 0,
            closed: true,
            store: env.block_store(name),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn last_block_id(&self) -> BlockID {
        self.last
    }
    pub fn is_open(&self) -> bool {
        !self.closed
    }
    /// physically create the file with one empty page, fails if it exists
    pub fn create(&mut self) -> Result<(), StorageError> {
        info!("heap file: create {}", self.name);
        self.db_open(OpenFlags::Create)?;
        let page = self.get_new();
        self.put(&page)
    }
    pub fn open(&mut self) -> Result<(), StorageError> {
        self.db_open(OpenFlags::Open)
    }
    pub fn close(&mut self) {
        if !self.closed {
            debug!("heap file: close {}", self.name);
            self.store.close();
            self.closed = true;
        }
    }
    /// close and remove the backing resource for good
    pub fn drop(&mut self) -> Result<(), StorageError> {
        info!("heap file: drop {}", self.name);
        self.close();
        self.last = 0;
        self.store.remove()
    }
    pub fn get(&mut self, block_id: BlockID) -> Result<SlottedPage, StorageError> {
        self.check_open()?;
        if block_id == 0 || block_id > self.last {
            return Err(StorageError::BlockOutOfRange(block_id));
        }
        let bytes = self.store.get(block_id)?;
        Ok(SlottedPage::open(block_id, bytes))
    }
    pub fn put(&mut self, page: &SlottedPage) -> Result<(), StorageError> {
        self.check_open()?;
        self.store.put(page.block_id(), page.as_bytes())
    }
    /// a fresh empty page past the current end, not persisted until `put`
    pub fn get_new(&mut self) -> SlottedPage {
        self.last += 1;
        debug!("heap file: {} grows to block {}", self.name, self.last);
        SlottedPage::new(self.last)
    }
    pub fn block_ids(&self) -> Vec<BlockID> {
        (1..=self.last).collect()
    }
    fn db_open(&mut self, flags: OpenFlags) -> Result<(), StorageError> {
        if self.closed {
            self.store.open(flags)?;
            self.last = match flags {
                OpenFlags::Open => self.store.stat()? as BlockID,
                _ => 0,
            };
            self.closed = false;
            debug!("heap file: open {}, last = {}", self.name, self.last);
        }
        Ok(())
    }
    fn check_open(&self) -> Result<(), StorageError> {
        if self.closed {
            Err(StorageError::Closed(self.name.clone()))
        } else {
            Ok(())
        }
    }
}
