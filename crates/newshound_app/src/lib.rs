//! Newshound application shell: ties the pure core to the search engine
//! and to preference storage. The binary in `main.rs` drives one
//! [`SearchSession`] from the console.

pub mod persistence;
pub mod session;

pub use persistence::{MemoryStore, PersistedCell, PrefStore, RonFileStore, StoreError};
pub use session::SearchSession;
