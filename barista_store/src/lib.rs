#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! On-device persistence for the barista assistant.
//!
//! `FileStore` and `MemoryStore` implement the `KeyValueStore` port;
//! `Repository` layers typed record operations on top of either.

pub mod error;
pub mod file;
pub mod memory;
pub mod repository;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::Repository;
