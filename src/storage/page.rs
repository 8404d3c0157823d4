use crate::storage::{Block, BlockID, RecordID, BLOCK_SZ};
use log::debug;
use thiserror::Error;

///
/// SlottedPage Format:
///
/// ```text
///     | num_records | end_free | Slot[1] | Slot[2] | ...
///
///                           ... | Data[2] | Data[1] |
/// ```
///
/// Slot Format
///
/// ```text
///     | size: u16 | loc: u16 |
/// ```
///
/// Slot `i` lives at offset `4 * i`, so the block header takes the place of
/// slot 0. `end_free` is the offset of the last free byte, records grow
/// downward from the high end of the block. A slot with `loc == 0` is
/// deleted, its record id is never handed out again.
///
pub struct SlottedPage {
    block_id: BlockID,
    num_records: u16,
    end_free: u16,
    bytes: Box<Block>,
}

impl SlottedPage {
    /// wrap a zeroed block as an empty page
    pub fn new(block_id: BlockID) -> Self {
        let mut page = Self {
            block_id,
            num_records: 0,
            end_free: (BLOCK_SZ - 1) as u16,
            bytes: Box::new([0u8; BLOCK_SZ]),
        };
        page.put_header();
        page
    }

    /// wrap an existing block, the header is read from the bytes
    pub fn open(block_id: BlockID, bytes: Box<Block>) -> Self {
        let mut page = Self {
            block_id,
            num_records: 0,
            end_free: 0,
            bytes,
        };
        let (num_records, end_free) = page.get_slot(0);
        page.num_records = num_records;
        page.end_free = end_free;
        page
    }

    pub fn block_id(&self) -> BlockID {
        self.block_id
    }

    pub fn as_bytes(&self) -> &Block {
        &self.bytes
    }

    pub fn add(&mut self, data: &[u8]) -> Result<RecordID, PageError> {
        if !self.has_room(data.len()) {
            return Err(PageError::NoRoom);
        }
        self.num_records += 1;
        let record_id = self.num_records;
        let size = data.len() as u16;
        self.end_free -= size;
        let loc = self.end_free + 1;
        self.put_header();
        self.put_slot(record_id, size, loc);
        let start = loc as usize;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        debug!(
            "page {}: add record {} ({} bytes at {})",
            self.block_id, record_id, size, loc
        );
        Ok(record_id)
    }

    pub fn get(&self, record_id: RecordID) -> Option<&[u8]> {
        if !self.is_valid(record_id) {
            return None;
        }
        let (size, loc) = self.get_slot(record_id);
        if loc == 0 {
            return None;
        }
        let start = loc as usize;
        Some(&self.bytes[start..start + size as usize])
    }

    pub fn put(&mut self, record_id: RecordID, data: &[u8]) -> Result<(), PageError> {
        let (size, loc) = self.live_slot(record_id)?;
        let new_size = data.len();
        let size_usize = size as usize;
        let loc_usize = loc as usize;
        if new_size > size_usize {
            let extra = new_size - size_usize;
            if !self.has_room(extra) {
                return Err(PageError::NoRoom);
            }
            self.slide(loc_usize, loc_usize - extra);
            let start = loc_usize - extra;
            self.bytes[start..start + new_size].copy_from_slice(data);
        } else {
            self.bytes[loc_usize..loc_usize + new_size].copy_from_slice(data);
            self.slide(loc_usize + new_size, loc_usize + size_usize);
        }
        // sliding moved the record itself
        let (_, loc) = self.get_slot(record_id);
        self.put_slot(record_id, new_size as u16, loc);
        debug!(
            "page {}: put record {} ({} -> {} bytes)",
            self.block_id, record_id, size, new_size
        );
        Ok(())
    }

    pub fn del(&mut self, record_id: RecordID) -> Result<(), PageError> {
        let (size, loc) = self.live_slot(record_id)?;
        self.put_slot(record_id, 0, 0);
        self.slide(loc as usize, loc as usize + size as usize);
        debug!("page {}: del record {}", self.block_id, record_id);
        Ok(())
    }

    /// ids of live records in ascending order
    pub fn ids(&self) -> Vec<RecordID> {
        (1..=self.num_records)
            .filter(|&record_id| self.get_slot(record_id).1 != 0)
            .collect()
    }

    /// largest record an empty page can hold
    pub fn max_record_size() -> usize {
        BLOCK_SZ - 8
    }

    /// bytes available to one more record, its slot already accounted for
    pub fn free_space(&self) -> usize {
        (self.end_free as usize + 1).saturating_sub(self.directory_end())
    }

    pub fn has_room(&self, size: usize) -> bool {
        self.directory_end() + size <= self.end_free as usize + 1
    }

    /// end of the slot directory once one more slot is added
    fn directory_end(&self) -> usize {
        4 * (self.num_records as usize + 2)
    }

    /// Move the bytes in `(end_free, start)` by `end - start` and fix up the
    /// location of every live record that sat at or below `start`.
    fn slide(&mut self, start: usize, end: usize) {
        let shift = end as isize - start as isize;
        if shift == 0 {
            return;
        }
        let from = self.end_free as usize + 1;
        let to = (from as isize + shift) as usize;
        self.bytes.copy_within(from..start, to);
        for record_id in self.ids() {
            let (size, loc) = self.get_slot(record_id);
            if loc as usize <= start {
                let loc = (loc as isize + shift) as u16;
                self.put_slot(record_id, size, loc);
            }
        }
        self.end_free = (self.end_free as isize + shift) as u16;
        self.put_header();
    }

    fn is_valid(&self, record_id: RecordID) -> bool {
        record_id != 0 && record_id <= self.num_records
    }

    fn live_slot(&self, record_id: RecordID) -> Result<(u16, u16), PageError> {
        if !self.is_valid(record_id) {
            return Err(PageError::InvalidRecordID(record_id));
        }
        match self.get_slot(record_id) {
            (_, 0) => Err(PageError::RecordNotFound(record_id)),
            slot => Ok(slot),
        }
    }

    fn put_header(&mut self) {
        let (num_records, end_free) = (self.num_records, self.end_free);
        self.put_slot(0, num_records, end_free);
    }

    fn get_slot(&self, record_id: RecordID) -> (u16, u16) {
        let offset = 4 * record_id as usize;
        (self.get_n(offset), self.get_n(offset + 2))
    }

    fn put_slot(&mut self, record_id: RecordID, size: u16, loc: u16) {
        let offset = 4 * record_id as usize;
        self.put_n(offset, size);
        self.put_n(offset + 2, loc);
    }

    fn get_n(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }

    fn put_n(&mut self, offset: usize, n: u16) {
        self.bytes[offset..offset + 2].copy_from_slice(&n.to_le_bytes());
    }
}

#[derive(Error, Debug)]
pub enum PageError {
    #[error("not enough room for new record")]
    NoRoom,
    #[error("record {0} not found")]
    RecordNotFound(RecordID),
    #[error("record id {0} out of range")]
    InvalidRecordID(RecordID),
}
