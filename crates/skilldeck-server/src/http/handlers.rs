use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use skilldeck_api::{
    competency_to_dto, draft_from_create, map_error, stats_to_dto, sub_item_drafts, ApiError,
    CreateCompetencyRequest, ErrorEnvelope, ItemEnvelope, ListEnvelope, MessageEnvelope,
    ReplaceSubItemsRequest,
};
use skilldeck_model::aggregate;
use skilldeck_store::StoreError;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{error, info, warn};

pub(crate) fn make_request_id(state: &AppState) -> String {
    let id = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
    format!("req-{id:016x}")
}

pub(crate) fn propagated_request_id(headers: &HeaderMap, state: &AppState) -> String {
    if let Some(raw) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    make_request_id(state)
}

pub(crate) fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(v) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-request-id", v);
    }
    response
}

pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(map_error(&err).status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = Json(ErrorEnvelope {
        success: false,
        message: err.message,
        error: err.detail,
    });
    (status, body).into_response()
}

pub(crate) fn api_error_from_store(err: &StoreError) -> ApiError {
    match err {
        StoreError::DuplicateCode(code) => ApiError::duplicate_code(code),
        StoreError::NotFound(id) => ApiError::not_found(id),
        StoreError::Validation(detail) => ApiError::validation_failed(detail.to_string()),
        StoreError::Unavailable(detail) => ApiError::store_unavailable(detail.clone()),
    }
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::validation_failed(e.to_string()))
}

async fn finish(
    state: &AppState,
    route: &'static str,
    request_id: &str,
    started: Instant,
    response: Response,
) -> Response {
    let latency = started.elapsed();
    state
        .metrics
        .observe_request(route, response.status(), latency)
        .await;
    if latency > state.api.slow_request_threshold {
        warn!(request_id = %request_id, route, latency_ms = latency.as_millis() as u64, "slow request");
    }
    with_request_id(response, request_id)
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let request_id = make_request_id(&state);
    let resp = (StatusCode::OK, "ok").into_response();
    finish(&state, "/healthz", &request_id, started, resp).await
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let request_id = make_request_id(&state);
    let resp = if state.ready.load(Ordering::Relaxed) {
        (StatusCode::OK, "ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not-ready").into_response()
    };
    finish(&state, "/readyz", &request_id, started, resp).await
}

pub(crate) async fn version_handler(State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let request_id = make_request_id(&state);
    let payload = serde_json::json!({
        "name": crate::CRATE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "config_schema_version": crate::config::CONFIG_SCHEMA_VERSION,
    });
    let resp = Json(payload).into_response();
    finish(&state, "/version", &request_id, started, resp).await
}

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let text = state.metrics.render_text().await;
    (StatusCode::OK, text)
}

pub(crate) async fn list_competencies_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    if state.api.enable_request_log {
        info!(request_id = %request_id, route = "/competencies", "request start");
    }
    let resp = match state.store.get_all().await {
        Ok(competencies) => {
            let statistics = stats_to_dto(aggregate(&competencies));
            let data = competencies.iter().map(competency_to_dto).collect();
            Json(ListEnvelope {
                success: true,
                data,
                statistics,
            })
            .into_response()
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "list competencies failed");
            api_error_response(api_error_from_store(&e))
        }
    };
    finish(&state, "/competencies", &request_id, started, resp).await
}

pub(crate) async fn get_competency_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let resp = match state.store.get_by_id(&id).await {
        Ok(competency) => Json(ItemEnvelope {
            success: true,
            message: None,
            data: competency_to_dto(&competency),
        })
        .into_response(),
        Err(e) => api_error_response(api_error_from_store(&e)),
    };
    finish(&state, "/competencies/{id}", &request_id, started, resp).await
}

pub(crate) async fn create_competency_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    if state.api.enable_request_log {
        info!(request_id = %request_id, route = "/competencies", "create request");
    }
    let resp = match parse_body::<CreateCompetencyRequest>(&body) {
        Ok(request) => match state.store.create(draft_from_create(&request)).await {
            Ok(competency) => {
                info!(request_id = %request_id, code = %competency.code, "competency created");
                (
                    StatusCode::CREATED,
                    Json(ItemEnvelope {
                        success: true,
                        message: Some("competency created".to_string()),
                        data: competency_to_dto(&competency),
                    }),
                )
                    .into_response()
            }
            Err(e) => api_error_response(api_error_from_store(&e)),
        },
        Err(e) => api_error_response(e),
    };
    finish(&state, "/competencies", &request_id, started, resp).await
}

pub(crate) async fn replace_evaluation_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let resp = match parse_body::<ReplaceSubItemsRequest>(&body) {
        Ok(request) => match state
            .store
            .replace_sub_items(&id, sub_item_drafts(&request.sub_items))
            .await
        {
            Ok(competency) => Json(ItemEnvelope {
                success: true,
                message: Some("evaluation updated".to_string()),
                data: competency_to_dto(&competency),
            })
            .into_response(),
            Err(e) => api_error_response(api_error_from_store(&e)),
        },
        Err(e) => api_error_response(e),
    };
    finish(
        &state,
        "/competencies/{id}/evaluation",
        &request_id,
        started,
        resp,
    )
    .await
}

pub(crate) async fn delete_competency_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let resp = match state.store.delete(&id).await {
        Ok(()) => Json(MessageEnvelope {
            success: true,
            message: "competency deleted".to_string(),
        })
        .into_response(),
        Err(e) => api_error_response(api_error_from_store(&e)),
    };
    finish(&state, "/competencies/{id}", &request_id, started, resp).await
}
