use crate::storage::{BlockID, RecordID};
use std::fmt;

/// Durable identity of one row: the block it lives in and its slot there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle {
    pub block_id: BlockID,
    pub record_id: RecordID,
}

impl Handle {
    pub fn new(block_id: BlockID, record_id: RecordID) -> Self {
        Self {
            block_id,
            record_id,
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.block_id, self.record_id)
    }
}
