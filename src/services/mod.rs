mod store_service;

pub use store_service::{RemoteFile, RemoteStore, StoreError, StoreResult};
