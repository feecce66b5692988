mod file_store;

pub use file_store::{FileStore, FileStoreError};
