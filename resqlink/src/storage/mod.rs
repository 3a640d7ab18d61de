mod config;
mod errors;
mod file;
mod memory;
mod record;
mod types;

pub use config::{in_memory_store, local_store_from_env};
pub use errors::StorageError;
pub use record::{AUTH_SESSION_KEY, MOCK_USER_KEY, delete_record, load_record, save_record};
pub use types::{FileLocalStore, InMemoryLocalStore, LocalStore, SharedLocalStore, shared};
