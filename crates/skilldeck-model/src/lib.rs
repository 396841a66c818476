#![forbid(unsafe_code)]
//! Skilldeck model SSOT.
//!
//! Parse-only constructors: a `CompetencyCode`, `CompetencyName` or `SubItem`
//! that exists is valid. Evaluation output is derived on every read and is
//! never persisted.

mod competency;
mod eval;

pub use competency::{
    parse_code, parse_name, Competency, CompetencyCode, CompetencyDraft, CompetencyId,
    CompetencyName, SubItem, SubItemDraft, ValidationError, CODE_PATTERN, NAME_MAX_LEN,
};
pub use eval::{aggregate, evaluate, filter_by_status, Evaluation, EvaluationStatus, GlobalStats};

pub const CRATE_NAME: &str = "skilldeck-model";
