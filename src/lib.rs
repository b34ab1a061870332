//! # Quizdeck - Local quiz authoring and persistence
//!
//! Quizdeck keeps a collection of quizzes (single-choice, multiple-choice or
//! true/false, optionally timed) in a single JSON document stored under one
//! key of a key-value storage backend.
//!
//! Quizdeck provides:
//! - A quiz model with explicit base type + time challenge flag
//! - A persistence store (create, read, update, delete) over a pluggable storage port
//! - A portable Base64 export/import codec for copy-paste transfer
//! - Authoring drafts with save-time validation
//! - SQLite and in-memory storage backends

pub mod id;
pub mod quiz;
pub mod draft;
pub mod codec;
pub mod storage;
pub mod store;
pub mod output;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use id::QuizId;
pub use quiz::{Question, Quiz, QuizType, TimeChallenge};
pub use draft::QuizDraft;
pub use storage::{MemoryStorage, SqliteStorage, StoragePort};
pub use store::{ImportSummary, QuizStore, DEFAULT_STORAGE_KEY};

/// Result type alias for Quizdeck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Quizdeck operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid quiz type: {0}")]
    InvalidQuizType(String),

    #[error("Invalid quiz: {0}")]
    Validation(String),

    #[error("Import format error: {0}")]
    ImportFormat(String),

    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
