//! Typed reads through the offset table

use std::rc::Rc;

use crate::application::ports::outbound::{MemoryError, MemoryReaderPort};
use crate::infrastructure::memory::OffsetTable;

pub struct MemoryAccessor {
    reader: Rc<dyn MemoryReaderPort>,
    offsets: OffsetTable,
}

impl MemoryAccessor {
    pub fn new(reader: Rc<dyn MemoryReaderPort>, offsets: OffsetTable) -> Self {
        Self { reader, offsets }
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Little-endian `i32` at `base + offset(structure, field)`
    pub fn read_i32(&self, base: u64, structure: &str, field: &str) -> Result<i32, MemoryError> {
        if base == 0 {
            return Err(MemoryError::NullBase(structure.to_string()));
        }
        let offset = self.offsets.offset(structure, field)?;
        let bytes = self.reader.read(base, offset, 4)?;
        let raw: [u8; 4] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| MemoryError::Unreadable {
                address: base.wrapping_add(offset),
                width: 4,
            })?;
        Ok(i32::from_le_bytes(raw))
    }

    /// Engine booleans are stored widened; any non-zero value is true
    pub fn read_flag(&self, base: u64, structure: &str, field: &str) -> Result<bool, MemoryError> {
        Ok(self.read_i32(base, structure, field)? != 0)
    }
}
