// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use skilldeck_model::EvaluationStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubItemDto {
    pub name: String,
    pub validated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EvaluationDto {
    pub validated_count: usize,
    pub non_validated_count: usize,
    pub total: usize,
    pub status: EvaluationStatus,
    pub percentage: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GlobalStatsDto {
    pub total_competencies: usize,
    pub validated_competencies: usize,
    pub total_sub_items: usize,
    pub validated_sub_items: usize,
}

/// A competency as served: the stored document plus its freshly computed
/// evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompetencyDto {
    pub id: String,
    pub code: String,
    pub name: String,
    pub sub_items: Vec<SubItemDto>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
    pub evaluation: EvaluationDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCompetencyRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub sub_items: Vec<SubItemDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReplaceSubItemsRequest {
    pub sub_items: Vec<SubItemDto>,
}
