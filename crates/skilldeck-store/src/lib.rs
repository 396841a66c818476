#![forbid(unsafe_code)]
//! Competency store: owns uniqueness and shape invariants.
//!
//! Writes are whole-document: `replace_sub_items` swaps the full list, never
//! patches. There is no version field, so two concurrent replacements of the
//! same competency are last-write-wins; callers that need stronger ordering
//! must serialize their own requests.

use async_trait::async_trait;
use skilldeck_model::{Competency, CompetencyDraft, SubItemDraft, ValidationError};
use std::fmt::{Display, Formatter};

mod memory;

pub use memory::MemoryStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    DuplicateCode(String),
    NotFound(String),
    Validation(ValidationError),
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateCode(code) => write!(f, "code {code} already exists"),
            Self::NotFound(id) => write!(f, "competency {id} not found"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Unavailable(detail) => write!(f, "store unavailable: {detail}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

#[async_trait]
pub trait CompetencyStore: Send + Sync + 'static {
    /// Parses and persists a new competency. Nothing is written when the
    /// draft fails validation or the code is already taken.
    async fn create(&self, draft: CompetencyDraft) -> Result<Competency, StoreError>;

    /// All competencies in insertion order, unfiltered.
    async fn get_all(&self) -> Result<Vec<Competency>, StoreError>;

    async fn get_by_id(&self, id: &str) -> Result<Competency, StoreError>;

    /// Wholesale replacement of the sub-item list; bumps `updated_at_ms`.
    async fn replace_sub_items(
        &self,
        id: &str,
        sub_items: Vec<SubItemDraft>,
    ) -> Result<Competency, StoreError>;

    /// Fails with `NotFound` when the id is absent; a second delete of the
    /// same id therefore fails.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
