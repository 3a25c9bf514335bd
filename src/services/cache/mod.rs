pub mod client;
pub mod manager;
pub mod memory;
pub mod valkey;

pub use client::{CacheClient, CacheError, CacheResult};
pub use manager::CacheManager;
pub use memory::MemoryClient;
pub use valkey::ValkeyClient;
