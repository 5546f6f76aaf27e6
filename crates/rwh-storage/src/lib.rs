#![doc = include_str!("../README.md")]

mod area;
mod memory;

pub use area::{StorageArea, StorageError, StorageItems};
pub use memory::MemoryStorageArea;
