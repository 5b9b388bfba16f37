pub mod file;
pub mod memory;

pub use file::{FileRuleStore, FileWalletStore};
pub use memory::{MemoryRuleStore, MemoryWalletStore};
