use super::*;
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Keeps every heap file as `<dir>/<name>.db`.
pub struct DiskEnv {
    dir: PathBuf,
}

impl DiskEnv {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        if !dir.is_dir() {
            return Err(StorageError::BadDataDir(dir));
        }
        Ok(Self { dir })
    }
    /// a fresh directory under the system temp dir
    pub fn new_random() -> Result<Self, StorageError> {
        let dir = std::env::temp_dir().join(format!("heapdb-{}", Uuid::new_v4()));
        Self::new(dir)
    }
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StorageEnv for DiskEnv {
    fn block_store(&self, name: &str) -> Box<dyn BlockStore> {
        Box::new(DiskBlockStore::new(self.dir.join(format!("{}.db", name))))
    }
}

pub struct DiskBlockStore {
    path: PathBuf,
    file: Option<File>,
}

impl DiskBlockStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path, file: None }
    }
    fn name(&self) -> String {
        self.path.display().to_string()
    }
    fn file(&mut self) -> Result<&mut File, StorageError> {
        let name = self.name();
        self.file.as_mut().ok_or(StorageError::Closed(name))
    }
    /// block ids start from 1, the file starts at offset 0
    fn offset_of(block_id: BlockID) -> u64 {
        (block_id as u64 - 1) * BLOCK_SZ as u64
    }
}

impl BlockStore for DiskBlockStore {
    fn open(&mut self, flags: OpenFlags) -> Result<(), StorageError> {
        let mut options = OpenOptions::new();
        options.read(true).write(true);
        match flags {
            OpenFlags::Create => options.create_new(true),
            OpenFlags::Open => &mut options,
            OpenFlags::Truncate => options.create(true).truncate(true),
        };
        let file = options.open(&self.path).map_err(|err| match err.kind() {
            ErrorKind::AlreadyExists => StorageError::AlreadyExists(self.name()),
            ErrorKind::NotFound => StorageError::NotFound(self.name()),
            _ => StorageError::IOError(err),
        })?;
        debug!("disk: open {} with {:?}", self.name(), flags);
        self.file = Some(file);
        Ok(())
    }
    fn close(&mut self) {
        self.file = None;
    }
    fn get(&mut self, block_id: BlockID) -> Result<Box<Block>, StorageError> {
        if block_id == 0 || block_id as usize > self.stat()? {
            return Err(StorageError::BlockOutOfRange(block_id));
        }
        let file = self.file()?;
        file.seek(SeekFrom::Start(Self::offset_of(block_id)))?;
        let mut block = Box::new([0u8; BLOCK_SZ]);
        file.read_exact(&mut block[..])?;
        Ok(block)
    }
    fn put(&mut self, block_id: BlockID, block: &Block) -> Result<(), StorageError> {
        if block_id == 0 {
            return Err(StorageError::BlockOutOfRange(block_id));
        }
        let file = self.file()?;
        file.seek(SeekFrom::Start(Self::offset_of(block_id)))?;
        file.write_all(block)?;
        Ok(())
    }
    fn remove(&mut self) -> Result<(), StorageError> {
        if self.file.is_some() {
            return Err(StorageError::StillOpen(self.name()));
        }
        fs::remove_file(&self.path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => StorageError::NotFound(self.name()),
            _ => StorageError::IOError(err),
        })
    }
    fn stat(&self) -> Result<usize, StorageError> {
        let file = self
            .file
            .as_ref()
            .ok_or_else(|| StorageError::Closed(self.name()))?;
        let len = file.metadata()?.len();
        Ok((len / BLOCK_SZ as u64) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_put_get_remove() {
        let env = DiskEnv::new_random().unwrap();
        let dir = env.dir().to_path_buf();
        {
            let mut store = env.block_store("sample");
            assert!(matches!(
                store.open(OpenFlags::Open),
                Err(StorageError::NotFound(_))
            ));
            store.open(OpenFlags::Create).unwrap();
            let mut block = [0u8; BLOCK_SZ];
            block[7] = 42;
            store.put(1, &block).unwrap();
            block[7] = 43;
            store.put(2, &block).unwrap();
            assert_eq!(store.stat().unwrap(), 2);
            store.close();

            let mut again = env.block_store("sample");
            assert!(matches!(
                again.open(OpenFlags::Create),
                Err(StorageError::AlreadyExists(_))
            ));
            again.open(OpenFlags::Open).unwrap();
            assert_eq!(again.get(1).unwrap()[7], 42);
            assert_eq!(again.get(2).unwrap()[7], 43);
            assert!(matches!(
                again.get(3),
                Err(StorageError::BlockOutOfRange(3))
            ));
            assert!(again.remove().is_err());
            again.close();
            again.remove().unwrap();
            assert!(again.open(OpenFlags::Open).is_err());
        }
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn truncate_empties_or_creates() {
        let env = DiskEnv::new_random().unwrap();
        let dir = env.dir().to_path_buf();
        {
            let mut store = env.block_store("sample");
            store.open(OpenFlags::Truncate).unwrap();
            assert_eq!(store.stat().unwrap(), 0);
            store.put(1, &[5u8; BLOCK_SZ]).unwrap();
            store.put(2, &[6u8; BLOCK_SZ]).unwrap();
            assert_eq!(store.stat().unwrap(), 2);
            store.close();

            let mut again = env.block_store("sample");
            again.open(OpenFlags::Truncate).unwrap();
            assert_eq!(again.stat().unwrap(), 0);
            assert!(matches!(
                again.get(1),
                Err(StorageError::BlockOutOfRange(1))
            ));
            again.close();
        }
        fs::remove_dir_all(dir).unwrap();
    }
}
