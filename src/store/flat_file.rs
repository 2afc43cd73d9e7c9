// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flat-file store: a CSV credential table plus one CSV record
//! partition per user.
//!
//! Every mutation loads the whole file, modifies it in memory, and
//! rewrites it. That is fine at this scale; a single active session per
//! user is assumed, so there is no locking and the last writer wins.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::user::{hash_password, is_valid_username, verify_password};
use crate::models::{SessionRecord, User};
use crate::store::files;

/// Flat-file backed credential and session record store.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    base_dir: PathBuf,
}

impl FlatFileStore {
    /// Open the store, creating the base directory and an empty
    /// credential table on first use.
    pub fn open<P: AsRef<Path>>(base_dir: P) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(|e| StoreError::Io(e.to_string()))?;

        let store = Self { base_dir };
        if !store.users_path().exists() {
            store.write_users(&[])?;
            tracing::info!(path = %store.users_path().display(), "Created credential table");
        }

        Ok(store)
    }

    fn users_path(&self) -> PathBuf {
        self.base_dir.join(files::USERS)
    }

    fn partition_dir(&self, username: &str) -> PathBuf {
        self.base_dir.join(username)
    }

    fn records_path(&self, username: &str) -> PathBuf {
        self.partition_dir(username).join(files::SESSIONS)
    }

    // ─── Credential Store ────────────────────────────────────────

    /// Register a new user and provision their record partition.
    ///
    /// Fails with `DuplicateUser` if the username is already taken;
    /// nothing is written in that case.
    pub fn register(&self, username: &str, password: &str) -> Result<(), StoreError> {
        if !is_valid_username(username) {
            return Err(StoreError::InvalidUsername(username.to_string()));
        }

        let mut users = self.load_users()?;
        if users.iter().any(|u| u.username == username) {
            return Err(StoreError::DuplicateUser(username.to_string()));
        }

        users.push(User {
            username: username.to_string(),
            password_hash: hash_password(password),
        });
        self.write_users(&users)?;

        fs::create_dir_all(self.partition_dir(username))
            .map_err(|e| StoreError::Io(e.to_string()))?;

        tracing::info!(username, "Registered user");
        Ok(())
    }

    /// Verify a password against the stored digest.
    ///
    /// A wrong password is `Ok(false)`, not an error; only an unknown
    /// username is.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, StoreError> {
        let users = self.load_users()?;
        let user = users
            .iter()
            .find(|u| u.username == username)
            .ok_or_else(|| StoreError::UserNotFound(username.to_string()))?;

        Ok(verify_password(password, &user.password_hash))
    }

    /// Whether a username exists in the credential table.
    pub fn user_exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.load_users()?.iter().any(|u| u.username == username))
    }

    fn load_users(&self) -> Result<Vec<User>, StoreError> {
        let mut reader = csv::Reader::from_path(self.users_path())
            .map_err(|e| StoreError::Csv(e.to_string()))?;

        reader
            .deserialize()
            .collect::<Result<Vec<User>, _>>()
            .map_err(|e| StoreError::Csv(e.to_string()))
    }

    fn write_users(&self, users: &[User]) -> Result<(), StoreError> {
        let mut writer = csv::Writer::from_path(self.users_path())
            .map_err(|e| StoreError::Csv(e.to_string()))?;

        if users.is_empty() {
            // Serde-driven headers are only emitted with the first row,
            // so write them explicitly for an empty table.
            writer
                .write_record(["Username", "PasswordHash"])
                .map_err(|e| StoreError::Csv(e.to_string()))?;
        }
        for user in users {
            writer
                .serialize(user)
                .map_err(|e| StoreError::Csv(e.to_string()))?;
        }
        writer.flush().map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }

    // ─── Session Record Store ────────────────────────────────────

    /// Load the full record sequence for a user, in insertion order.
    ///
    /// A missing partition file means no records yet, not an error.
    pub fn load_records(&self, username: &str) -> Result<Vec<SessionRecord>, StoreError> {
        let path = self.records_path(username);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader =
            csv::Reader::from_path(&path).map_err(|e| StoreError::Csv(e.to_string()))?;

        reader
            .deserialize()
            .collect::<Result<Vec<SessionRecord>, _>>()
            .map_err(|e| StoreError::Csv(e.to_string()))
    }

    /// Append a record to a user's partition and persist the full
    /// updated sequence.
    pub fn append_record(&self, username: &str, record: SessionRecord) -> Result<(), StoreError> {
        if let Some(field) = record.first_negative_field() {
            return Err(StoreError::NegativeValue(field));
        }

        let mut records = self.load_records(username)?;
        records.push(record);
        self.write_records(username, &records)?;

        tracing::info!(username, count = records.len(), "Appended session record");
        Ok(())
    }

    fn write_records(&self, username: &str, records: &[SessionRecord]) -> Result<(), StoreError> {
        fs::create_dir_all(self.partition_dir(username))
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let mut writer = csv::Writer::from_path(self.records_path(username))
            .map_err(|e| StoreError::Csv(e.to_string()))?;

        for record in records {
            writer
                .serialize(record)
                .map_err(|e| StoreError::Csv(e.to_string()))?;
        }
        writer.flush().map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Username already taken: {0}")]
    DuplicateUser(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Negative value for field: {0}")]
    NegativeValue(&'static str),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<StoreError> for crate::error::AppError {
    fn from(err: StoreError) -> Self {
        use crate::error::AppError;

        match err {
            StoreError::DuplicateUser(name) => AppError::DuplicateUser(name),
            StoreError::UserNotFound(name) => AppError::UserNotFound(name),
            StoreError::InvalidUsername(name) => AppError::BadRequest(format!(
                "Invalid username '{}': use letters, digits, '-' or '_'",
                name
            )),
            StoreError::NegativeValue(field) => {
                AppError::BadRequest(format!("Field '{}' must not be negative", field))
            }
            StoreError::Io(msg) | StoreError::Csv(msg) => AppError::Storage(msg),
        }
    }
}
