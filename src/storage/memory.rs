use super::*;
use std::cell::RefCell;
use std::collections::HashMap;

type Files = Rc<RefCell<HashMap<String, Vec<Box<Block>>>>>;

/// Keeps every heap file in process memory, nothing survives the process.
/// Stores handed out by one env share its files, so a table dropped through
/// one store is gone for every other.
#[derive(Clone, Default)]
pub struct MemoryEnv {
    files: Files,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn exists(&self, name: &str) -> bool {
        self.files.borrow().contains_key(name)
    }
}

impl StorageEnv for MemoryEnv {
    fn block_store(&self, name: &str) -> Box<dyn BlockStore> {
        Box::new(MemoryBlockStore {
            name: name.to_owned(),
            files: self.files.clone(),
            is_open: false,
        })
    }
}

pub struct MemoryBlockStore {
    name: String,
    files: Files,
    is_open: bool,
}

impl MemoryBlockStore {
    fn check_open(&self) -> Result<(), StorageError> {
        if self.is_open {
            Ok(())
        } else {
            Err(StorageError::Closed(self.name.clone()))
        }
    }
}

impl BlockStore for MemoryBlockStore {
    fn open(&mut self, flags: OpenFlags) -> Result<(), StorageError> {
        let mut files = self.files.borrow_mut();
        match flags {
            OpenFlags::Create => {
                if files.contains_key(&self.name) {
                    return Err(StorageError::AlreadyExists(self.name.clone()));
                }
                files.insert(self.name.clone(), vec![]);
            }
            OpenFlags::Open => {
                if !files.contains_key(&self.name) {
                    return Err(StorageError::NotFound(self.name.clone()));
                }
            }
            OpenFlags::Truncate => {
                files.insert(self.name.clone(), vec![]);
            }
        }
        self.is_open = true;
        Ok(())
    }
    fn close(&mut self) {
        self.is_open = false;
    }
    fn get(&mut self, block_id: BlockID) -> Result<Box<Block>, StorageError> {
        self.check_open()?;
        let files = self.files.borrow();
        let blocks = files
            .get(&self.name)
            .ok_or_else(|| StorageError::NotFound(self.name.clone()))?;
        if block_id == 0 {
            return Err(StorageError::BlockOutOfRange(block_id));
        }
        blocks
            .get(block_id as usize - 1)
            .cloned()
            .ok_or(StorageError::BlockOutOfRange(block_id))
    }
    fn put(&mut self, block_id: BlockID, block: &Block) -> Result<(), StorageError> {
        self.check_open()?;
        if block_id == 0 {
            return Err(StorageError::BlockOutOfRange(block_id));
        }
        let mut files = self.files.borrow_mut();
        let blocks = files
            .get_mut(&self.name)
            .ok_or_else(|| StorageError::NotFound(self.name.clone()))?;
        let idx = block_id as usize - 1;
        while blocks.len() <= idx {
            blocks.push(Box::new([0u8; BLOCK_SZ]));
        }
        blocks[idx].copy_from_slice(block);
        Ok(())
    }
    fn remove(&mut self) -> Result<(), StorageError> {
        if self.is_open {
            return Err(StorageError::StillOpen(self.name.clone()));
        }
        self.files
            .borrow_mut()
            .remove(&self.name)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(self.name.clone()))
    }
    fn stat(&self) -> Result<usize, StorageError> {
        self.check_open()?;
        self.files
            .borrow()
            .get(&self.name)
            .map(|blocks| blocks.len())
            .ok_or_else(|| StorageError::NotFound(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_between_stores() {
        let env = MemoryEnv::new();
        let mut writer = env.block_store("t");
        writer.open(OpenFlags::Create).unwrap();
        let mut block = [0u8; BLOCK_SZ];
        block[0] = 9;
        writer.put(2, &block).unwrap();
        // gaps are zero filled
        assert_eq!(writer.stat().unwrap(), 2);

        let mut reader = env.block_store("t");
        assert!(reader.get(2).is_err());
        reader.open(OpenFlags::Open).unwrap();
        assert_eq!(reader.get(2).unwrap()[0], 9);
        assert_eq!(reader.get(1).unwrap()[0], 0);

        writer.close();
        reader.close();
        reader.remove().unwrap();
        assert!(!env.exists("t"));
        assert!(matches!(
            writer.open(OpenFlags::Open),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn truncate_empties_or_creates() {
        let env = MemoryEnv::new();
        let mut store = env.block_store("t");
        store.open(OpenFlags::Truncate).unwrap();
        assert!(env.exists("t"));
        assert_eq!(store.stat().unwrap(), 0);
        store.put(1, &[5u8; BLOCK_SZ]).unwrap();
        store.close();

        let mut again = env.block_store("t");
        again.open(OpenFlags::Truncate).unwrap();
        assert_eq!(again.stat().unwrap(), 0);
        assert!(matches!(
            again.get(1),
            Err(StorageError::BlockOutOfRange(1))
        ));
    }
}
