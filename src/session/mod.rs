//! Session metrics and their persistence
//!
//! One record per assistant session, accumulated across independent hook
//! invocations and persisted between them.

pub mod record;
pub mod store;

pub use record::{EditEvent, SessionRecord, SCHEMA_VERSION};
pub use store::{session_key, FileSessionStore, SessionStore, StoreError};

#[cfg(test)]
pub use store::MockSessionStore;
