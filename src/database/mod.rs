pub mod connection;
pub mod session_store;

pub use connection::{DbPool, create_pool, run_migrations};
pub use session_store::DbSessionStore;
