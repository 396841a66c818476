//! Evaluation calculator: pure functions over sub-item lists.
//!
//! The threshold rule is deliberate policy and preserved exactly: a
//! competency is validated when at least as many sub-items are validated as
//! not, so a tie validates. An empty list reads as `0 >= 0` and therefore
//! validates, with percentage pinned to 0 instead of dividing by zero.

use crate::competency::{Competency, SubItem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationStatus {
    #[serde(rename = "validated")]
    Validated,
    #[serde(rename = "non-validated")]
    NonValidated,
}

/// Derived pass/fail summary for one competency. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub validated_count: usize,
    pub non_validated_count: usize,
    pub total: usize,
    pub status: EvaluationStatus,
    pub percentage: u8,
}

/// Derived aggregate summary across all competencies. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_competencies: usize,
    pub validated_competencies: usize,
    pub total_sub_items: usize,
    pub validated_sub_items: usize,
}

impl GlobalStats {
    /// Field-wise sum. Folding partial aggregates through `merge` equals
    /// aggregating the whole input in one pass.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            total_competencies: self.total_competencies + other.total_competencies,
            validated_competencies: self.validated_competencies + other.validated_competencies,
            total_sub_items: self.total_sub_items + other.total_sub_items,
            validated_sub_items: self.validated_sub_items + other.validated_sub_items,
        }
    }
}

#[must_use]
pub fn evaluate(sub_items: &[SubItem]) -> Evaluation {
    let total = sub_items.len();
    let validated_count = sub_items.iter().filter(|item| item.validated()).count();
    let non_validated_count = total - validated_count;
    let status = if validated_count >= non_validated_count {
        EvaluationStatus::Validated
    } else {
        EvaluationStatus::NonValidated
    };
    let percentage = if total == 0 {
        0
    } else {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            (100.0 * validated_count as f64 / total as f64).round() as u8
        }
    };
    Evaluation {
        validated_count,
        non_validated_count,
        total,
        status,
        percentage,
    }
}

#[must_use]
pub fn aggregate<'a, I>(competencies: I) -> GlobalStats
where
    I: IntoIterator<Item = &'a Competency>,
{
    competencies
        .into_iter()
        .fold(GlobalStats::default(), |stats, competency| {
            let eval = evaluate(&competency.sub_items);
            stats.merge(GlobalStats {
                total_competencies: 1,
                validated_competencies: usize::from(eval.status == EvaluationStatus::Validated),
                total_sub_items: eval.total,
                validated_sub_items: eval.validated_count,
            })
        })
}

#[must_use]
pub fn filter_by_status(
    competencies: &[Competency],
    status: EvaluationStatus,
) -> Vec<&Competency> {
    competencies
        .iter()
        .filter(|competency| evaluate(&competency.sub_items).status == status)
        .collect()
}
