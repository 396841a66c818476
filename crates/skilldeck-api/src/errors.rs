// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorCode {
    ValidationFailed,
    DuplicateCode,
    NotFound,
    StoreUnavailable,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub detail: Option<String>,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail,
        }
    }

    #[must_use]
    pub fn validation_failed(detail: impl Into<String>) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            "validation failed",
            Some(detail.into()),
        )
    }

    #[must_use]
    pub fn duplicate_code(code: &str) -> Self {
        Self::new(
            ApiErrorCode::DuplicateCode,
            "competency code already exists",
            Some(format!("code {code} is taken")),
        )
    }

    #[must_use]
    pub fn not_found(id: &str) -> Self {
        Self::new(
            ApiErrorCode::NotFound,
            "competency not found",
            Some(format!("no competency with id {id}")),
        )
    }

    #[must_use]
    pub fn store_unavailable(detail: impl Into<String>) -> Self {
        Self::new(
            ApiErrorCode::StoreUnavailable,
            "store temporarily unavailable",
            Some(detail.into()),
        )
    }

    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Internal, "internal error", Some(detail.into()))
    }
}

const _: fn() = || {
    fn assert_traits<T: Serialize + for<'de> Deserialize<'de>>() {}
    assert_traits::<ApiErrorCode>();
};
