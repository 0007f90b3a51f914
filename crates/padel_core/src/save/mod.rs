// Match persistence
// MessagePack + LZ4 compression with versioning and integrity checks

pub mod error;
pub mod format;
pub mod migration;
pub mod store;

pub use error::SaveError;
pub use format::{decompress_and_deserialize, serialize_and_compress, MatchSave};
pub use migration::migrate_save;
pub use store::{validate_match_id, FileMatchStore, MatchStore, MemoryMatchStore};

pub const SAVE_VERSION: u32 = 1;
