use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

/// Codes are `C1` through `C8`, nothing else.
pub const CODE_PATTERN: &str = "^C[1-8]$";
pub const NAME_MAX_LEN: usize = 128;

pub fn parse_code(input: &str) -> Result<CompetencyCode, ValidationError> {
    CompetencyCode::parse(input)
}

pub fn parse_name(input: &str) -> Result<CompetencyName, ValidationError> {
    CompetencyName::parse(input)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CompetencyCode(String);

impl CompetencyCode {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        let mut chars = s.chars();
        let ok = chars.next() == Some('C')
            && chars.next().is_some_and(|c| ('1'..='8').contains(&c))
            && chars.next().is_none();
        if !ok {
            return Err(ValidationError(format!(
                "code must match {CODE_PATTERN} (C1 through C8), got {s:?}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for CompetencyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CompetencyName(String);

impl CompetencyName {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("name must not be empty".to_string()));
        }
        if s.len() > NAME_MAX_LEN {
            return Err(ValidationError(format!(
                "name exceeds max length {NAME_MAX_LEN}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for CompetencyName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque store-assigned identifier. The store decides the format; the model
/// only rejects the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CompetencyId(String);

impl CompetencyId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("id must not be empty".to_string()));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CompetencyId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named boolean checkpoint under a competency. The name is non-empty
/// after trimming; the validated flag toggles freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubItem {
    name: String,
    validated: bool,
}

impl SubItem {
    pub fn parse(name: &str, validated: bool) -> Result<Self, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError(
                "sub-item name must not be empty".to_string(),
            ));
        }
        if trimmed.len() > NAME_MAX_LEN {
            return Err(ValidationError(format!(
                "sub-item name exceeds max length {NAME_MAX_LEN}"
            )));
        }
        Ok(Self {
            name: trimmed.to_string(),
            validated,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn validated(&self) -> bool {
        self.validated
    }

    #[must_use]
    pub fn with_validated(&self, validated: bool) -> Self {
        Self {
            name: self.name.clone(),
            validated,
        }
    }

    #[must_use]
    pub fn toggled(&self) -> Self {
        self.with_validated(!self.validated)
    }
}

/// Unvalidated create input, parsed by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubItemDraft {
    pub name: String,
    pub validated: bool,
}

impl SubItemDraft {
    pub fn parse(&self) -> Result<SubItem, ValidationError> {
        SubItem::parse(&self.name, self.validated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetencyDraft {
    pub code: String,
    pub name: String,
    pub sub_items: Vec<SubItemDraft>,
}

/// A persisted competency. Timestamps are unix epoch milliseconds assigned
/// by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competency {
    pub id: CompetencyId,
    pub code: CompetencyCode,
    pub name: CompetencyName,
    pub sub_items: Vec<SubItem>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}
