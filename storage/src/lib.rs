pub mod errors;
mod keys;
pub mod memory;
pub mod sled_store;
pub mod store;

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

pub use errors::{StorageError, StorageResult};
pub use memory::MemoryStorage;
pub use sled_store::SledStorage;
pub use store::HospitalStore;

/// Enum for the supported storage engine types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageEngineType {
    Memory,
    Sled,
}

impl FromStr for StorageEngineType {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageEngineType::Memory),
            "sled" => Ok(StorageEngineType::Sled),
            _ => Err(StorageError::Config(format!(
                "Unknown storage engine type: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for StorageEngineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageEngineType::Memory => write!(f, "memory"),
            StorageEngineType::Sled => write!(f, "sled"),
        }
    }
}

/// Opens the configured storage engine and hands it back behind the store
/// trait object the service layer consumes.
pub fn open_store(
    engine: StorageEngineType,
    data_directory: &Path,
) -> StorageResult<Arc<dyn HospitalStore>> {
    match engine {
        StorageEngineType::Memory => Ok(Arc::new(MemoryStorage::new())),
        StorageEngineType::Sled => Ok(Arc::new(SledStorage::open(data_directory)?)),
    }
}
