//! Memory reader port - Raw reads from host object memory
//!
//! Only a minority of hooks read memory directly. Layout knowledge lives in the
//! offset table (`infrastructure::memory::OffsetTable`); this port is just bytes.

/// Errors that can occur while reading host memory
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryError {
    #[error("Null base address for {0}")]
    NullBase(String),

    #[error("Unreadable memory at {address:#x} ({width} bytes)")]
    Unreadable { address: u64, width: usize },

    #[error("No offset known for {structure}.{field}")]
    UnknownField { structure: String, field: String },
}

/// Port for reading bytes out of a foreign object's backing memory
pub trait MemoryReaderPort {
    /// Read `width` bytes at `base + offset`
    fn read(&self, base: u64, offset: u64, width: usize) -> Result<Vec<u8>, MemoryError>;
}
