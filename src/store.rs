//! Quiz store - CRUD over the whole collection document
//!
//! The collection is one JSON array stored under one key. Every operation
//! re-reads the whole document, changes it in memory and writes the whole
//! document back with a single `set`.
//!
//! Reads are permissive: a missing, unreadable or corrupt document is an
//! empty collection. The error is logged and never reaches the caller.
//! Writes are strict: a failed write is returned as an error and the stored
//! document stays as it was.

use std::collections::HashSet;
use chrono::Utc;
use serde::Serialize;
use crate::codec;
use crate::draft::QuizDraft;
use crate::id::QuizId;
use crate::quiz::Quiz;
use crate::storage::StoragePort;
use crate::Result;

/// Key the collection is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "quizApp_quizzes";

/// Outcome of an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Number of quizzes appended to the collection
    pub added: usize,
}

/// Persistence store for quizzes on top of a storage port
pub struct QuizStore<S: StoragePort> {
    storage: S,
    key: String,
}

impl<S: StoragePort> QuizStore<S> {
    /// Store using the default storage key
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ========== Reads ==========

    /// Load the full collection in insertion order
    pub fn load_all(&self) -> Vec<Quiz> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "failed to read quiz collection");
                return Vec::new();
            }
        };

        // One record outside the schema fails the whole document, and the
        // next successful write replaces everything that was stored
        match serde_json::from_str::<Vec<Quiz>>(&raw) {
            Ok(quizzes) => {
                tracing::debug!(count = quizzes.len(), "loaded quizzes");
                quizzes
            }
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "stored quiz collection is corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Find one quiz by id
    pub fn load_by_id(&self, id: &str) -> Option<Quiz> {
        self.load_all().into_iter().find(|quiz| quiz.id == id)
    }

    // ========== Writes ==========

    /// Serialize and write the whole collection in one `set`
    fn save_all(&self, quizzes: &[Quiz]) -> Result<()> {
        let json = serde_json::to_string(quizzes)?;
        self.storage.set(&self.key, &json).inspect_err(|e| {
            tracing::error!(key = %self.key, error = %e, "failed to save quiz collection");
        })
    }

    /// Create a quiz from a validated draft and return its new id
    pub fn create(&self, draft: &QuizDraft) -> Result<QuizId> {
        draft.validate()?;

        let mut quizzes = self.load_all();
        let id = QuizId::generate_unique(quizzes.iter().map(|q| &q.id));
        let (quiz_type, time_challenge) = draft.to_record_parts();
        let now = Utc::now();

        quizzes.push(Quiz {
            id: id.clone(),
            title: draft.title.clone(),
            quiz_type,
            questions: draft.questions.clone(),
            time_challenge: Some(time_challenge),
            created_at: now,
            updated_at: now,
        });

        self.save_all(&quizzes)?;
        tracing::info!(%id, title = %draft.title, "created quiz");
        Ok(id)
    }

    /// Replace the content of an existing quiz.
    ///
    /// Returns `Ok(false)` when no quiz has this id; nothing is written then.
    pub fn update(&self, id: &str, draft: &QuizDraft) -> Result<bool> {
        draft.validate()?;

        let mut quizzes = self.load_all();
        let Some(quiz) = quizzes.iter_mut().find(|quiz| quiz.id == id) else {
            tracing::warn!(id, "quiz not found for update");
            return Ok(false);
        };

        let (quiz_type, time_challenge) = draft.to_record_parts();
        quiz.title = draft.title.clone();
        quiz.quiz_type = quiz_type;
        quiz.questions = draft.questions.clone();
        quiz.time_challenge = Some(time_challenge);
        quiz.updated_at = Utc::now();

        self.save_all(&quizzes)?;
        tracing::info!(id, "updated quiz");
        Ok(true)
    }

    /// Remove a quiz. Returns `Ok(false)` when no quiz has this id.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let quizzes = self.load_all();
        let before = quizzes.len();
        let remaining: Vec<Quiz> = quizzes.into_iter().filter(|quiz| quiz.id != id).collect();

        if remaining.len() == before {
            tracing::warn!(id, "quiz not found for delete");
            return Ok(false);
        }

        self.save_all(&remaining)?;
        tracing::info!(id, "deleted quiz");
        Ok(true)
    }

    // ========== Export / Import ==========

    /// Export one stored quiz, `None` if the id is unknown
    pub fn export_quiz(&self, id: &str) -> Result<Option<String>> {
        self.load_by_id(id)
            .map(|quiz| codec::export_quiz(&quiz))
            .transpose()
    }

    /// Export the whole collection with its version envelope
    pub fn export_all(&self) -> Result<String> {
        codec::export_collection(&self.load_all())
    }

    /// Append every quiz found in `text` as a new record.
    ///
    /// All entries are normalized before anything is written, so a payload
    /// with one bad entry adds nothing.
    pub fn import_quizzes(&self, text: &str) -> Result<ImportSummary> {
        let entries = codec::quiz_entries(codec::parse_import(text)?)?;

        let mut quizzes = self.load_all();
        let mut taken: HashSet<QuizId> = quizzes.iter().map(|q| q.id.clone()).collect();
        let now = Utc::now();

        let mut imported = Vec::with_capacity(entries.len());
        for (i, entry) in entries.into_iter().enumerate() {
            let id = QuizId::generate_unique(&taken);
            taken.insert(id.clone());
            imported.push(codec::normalize_entry(entry, i + 1, id, now)?);
        }

        let added = imported.len();
        quizzes.extend(imported);
        self.save_all(&quizzes)?;

        tracing::info!(added, "imported quizzes");
        Ok(ImportSummary { added })
    }
}
