//! Persistence Adapters
//!
//! Implementations of the transaction source port.

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryTransactionRepository;
pub use json_file::JsonFileTransactionSource;
