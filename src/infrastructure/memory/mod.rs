//! Memory access - Offset table, typed accessor, probe and replay image

mod accessor;
pub mod offsets;
mod probe;
mod replay;

pub use accessor::MemoryAccessor;
pub use offsets::OffsetTable;
pub use probe::MemoryGameProbe;
pub use replay::ReplayMemory;
