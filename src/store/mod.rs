//! Persistence layer (flat CSV files).

pub mod flat_file;

pub use flat_file::{FlatFileStore, StoreError};

/// File names under the data directory.
pub mod files {
    /// Credential table: one row per user
    pub const USERS: &str = "users.csv";
    /// Per-user record partition, inside `{data_dir}/{username}/`
    pub const SESSIONS: &str = "sessions.csv";
}
