// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Wire surface of the competency API: request/response DTOs, the
//! `{ success, data, statistics, message, error }` envelopes, and the error
//! taxonomy with its HTTP status mapping.

mod convert;
mod dto;
mod error_mapping;
mod errors;
mod responses;

pub use convert::{
    competency_from_dto, competency_to_dto, draft_from_create, stats_to_dto, sub_item_drafts,
};
pub use dto::{
    CompetencyDto, CreateCompetencyRequest, EvaluationDto, GlobalStatsDto,
    ReplaceSubItemsRequest, SubItemDto,
};
pub use error_mapping::{map_error, ApiErrorMapping};
pub use errors::{ApiError, ApiErrorCode};
pub use responses::{ErrorEnvelope, ItemEnvelope, ListEnvelope, MessageEnvelope};

pub const CRATE_NAME: &str = "skilldeck-api";
