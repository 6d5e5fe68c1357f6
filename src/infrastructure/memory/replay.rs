//! In-process memory image fed by replay traces

use std::cell::RefCell;
use std::collections::HashMap;

use crate::application::ports::outbound::{MemoryError, MemoryReaderPort};

/// Sparse byte image. Reading a byte nobody wrote is an error, like touching
/// unmapped memory in the host.
#[derive(Default)]
pub struct ReplayMemory {
    bytes: RefCell<HashMap<u64, u8>>,
}

impl ReplayMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, address: u64, data: &[u8]) {
        let mut bytes = self.bytes.borrow_mut();
        for (i, byte) in data.iter().enumerate() {
            bytes.insert(address.wrapping_add(i as u64), *byte);
        }
    }

    pub fn clear(&self) {
        self.bytes.borrow_mut().clear();
    }
}

impl MemoryReaderPort for ReplayMemory {
    fn read(&self, base: u64, offset: u64, width: usize) -> Result<Vec<u8>, MemoryError> {
        let address = base.wrapping_add(offset);
        let bytes = self.bytes.borrow();
        (0..width as u64)
            .map(|i| bytes.get(&address.wrapping_add(i)).copied())
            .collect::<Option<Vec<u8>>>()
            .ok_or(MemoryError::Unreadable { address, width })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_write_is_unreadable() {
        let memory = ReplayMemory::new();
        memory.write(0x20, &[1, 2]);

        assert_eq!(memory.read(0x20, 0, 2), Ok(vec![1, 2]));
        assert_eq!(
            memory.read(0x20, 0, 4),
            Err(MemoryError::Unreadable {
                address: 0x20,
                width: 4
            })
        );
    }
}
