// SPDX-License-Identifier: Apache-2.0

use crate::dto::{
    CompetencyDto, CreateCompetencyRequest, EvaluationDto, GlobalStatsDto, SubItemDto,
};
use skilldeck_model::{
    evaluate, Competency, CompetencyCode, CompetencyDraft, CompetencyId, CompetencyName,
    Evaluation, GlobalStats, SubItem, SubItemDraft, ValidationError,
};

fn evaluation_to_dto(eval: Evaluation) -> EvaluationDto {
    EvaluationDto {
        validated_count: eval.validated_count,
        non_validated_count: eval.non_validated_count,
        total: eval.total,
        status: eval.status,
        percentage: eval.percentage,
    }
}

fn sub_item_to_dto(item: &SubItem) -> SubItemDto {
    SubItemDto {
        name: item.name().to_string(),
        validated: item.validated(),
    }
}

/// Serves the stored document with its evaluation computed on the spot; the
/// evaluation is never read from storage.
#[must_use]
pub fn competency_to_dto(competency: &Competency) -> CompetencyDto {
    CompetencyDto {
        id: competency.id.as_str().to_string(),
        code: competency.code.as_str().to_string(),
        name: competency.name.as_str().to_string(),
        sub_items: competency.sub_items.iter().map(sub_item_to_dto).collect(),
        created_at_ms: competency.created_at_ms,
        updated_at_ms: competency.updated_at_ms,
        evaluation: evaluation_to_dto(evaluate(&competency.sub_items)),
    }
}

/// Re-parses a served competency into the model. Server output is always
/// valid, so a failure here means the payload was tampered with or truncated.
pub fn competency_from_dto(dto: &CompetencyDto) -> Result<Competency, ValidationError> {
    let sub_items = dto
        .sub_items
        .iter()
        .map(|item| SubItem::parse(&item.name, item.validated))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Competency {
        id: CompetencyId::parse(&dto.id)?,
        code: CompetencyCode::parse(&dto.code)?,
        name: CompetencyName::parse(&dto.name)?,
        sub_items,
        created_at_ms: dto.created_at_ms,
        updated_at_ms: dto.updated_at_ms,
    })
}

#[must_use]
pub fn stats_to_dto(stats: GlobalStats) -> GlobalStatsDto {
    GlobalStatsDto {
        total_competencies: stats.total_competencies,
        validated_competencies: stats.validated_competencies,
        total_sub_items: stats.total_sub_items,
        validated_sub_items: stats.validated_sub_items,
    }
}

#[must_use]
pub fn sub_item_drafts(items: &[SubItemDto]) -> Vec<SubItemDraft> {
    items
        .iter()
        .map(|item| SubItemDraft {
            name: item.name.clone(),
            validated: item.validated,
        })
        .collect()
}

#[must_use]
pub fn draft_from_create(request: &CreateCompetencyRequest) -> CompetencyDraft {
    CompetencyDraft {
        code: request.code.clone(),
        name: request.name.clone(),
        sub_items: sub_item_drafts(&request.sub_items),
    }
}
