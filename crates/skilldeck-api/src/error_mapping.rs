// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
}

#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    let status_code = match error.code {
        ApiErrorCode::ValidationFailed | ApiErrorCode::DuplicateCode => 400,
        ApiErrorCode::NotFound => 404,
        ApiErrorCode::StoreUnavailable | ApiErrorCode::Internal => 500,
    };
    ApiErrorMapping { status_code }
}
