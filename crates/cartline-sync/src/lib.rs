//! Remote persistence boundary for Cartline.
//!
//! The cart core is purely local; anything that outlives the process is an
//! external collaborator behind [`RemoteCartStore`]. This crate provides:
//! - `CartSnapshot` — the value object handed to collaborators
//! - `RemoteCartStore` — the async trait remote implementations fill in
//! - `CartSession` — a ledger owner that pushes a snapshot after each
//!   successful local mutation
//! - `InMemoryRemote` — remote implementation for tests and embedding

pub mod error;
pub mod memory;
pub mod session;
pub mod transport;
pub mod types;

pub use error::{SyncError, SyncResult};
pub use memory::InMemoryRemote;
pub use session::CartSession;
pub use transport::RemoteCartStore;
pub use types::CartSnapshot;
