use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, RawQuery, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::models::{CriteriaEvent, DirectoryError, LoadState};
use crate::services::{query::criteria_to_query, DirectoryService};
use crate::views::{DoctorCardView, FilterPanelView, SuggestionView};

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct CriteriaEventRequest {
    /// Current query string of the page, with or without the leading `?`.
    #[serde(default)]
    pub query: String,
    pub event: CriteriaEvent,
}

fn load_error(state: &LoadState) -> Option<&str> {
    match state {
        LoadState::Failed { reason, .. } => Some(reason.as_str()),
        _ => None,
    }
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(service): State<Arc<DirectoryService>>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Value>, AppError> {
    let raw_query = raw_query.unwrap_or_default();
    let catalogue = service.catalogue().await;
    let status = catalogue.status();

    // Until data arrives the URL is echoed back untouched so deep links survive.
    let Some(criteria) = catalogue.criteria_from_query(&raw_query) else {
        return Ok(Json(json!({
            "status": status,
            "error": load_error(catalogue.state()),
            "doctors": [],
            "total": 0,
            "criteria": Value::Null,
            "query": raw_query,
        })));
    };

    let doctors: Vec<DoctorCardView> = catalogue
        .search(&criteria)
        .into_iter()
        .map(DoctorCardView::from_doctor)
        .collect();

    Ok(Json(json!({
        "status": status,
        "error": Value::Null,
        "total": doctors.len(),
        "doctors": doctors,
        "query": criteria_to_query(&criteria),
        "criteria": criteria,
    })))
}

#[axum::debug_handler]
pub async fn list_specialties(
    State(service): State<Arc<DirectoryService>>,
) -> Result<Json<Value>, AppError> {
    let catalogue = service.catalogue().await;

    Ok(Json(json!({
        "status": catalogue.status(),
        "specialties": catalogue.specialties(),
    })))
}

#[axum::debug_handler]
pub async fn get_suggestions(
    State(service): State<Arc<DirectoryService>>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<Value>, AppError> {
    let catalogue = service.catalogue().await;

    let suggestions: Vec<SuggestionView> = catalogue
        .suggest(&query.q, service.config().suggestion_limit)
        .into_iter()
        .map(SuggestionView::from_doctor)
        .collect();

    Ok(Json(json!({
        "show": !suggestions.is_empty(),
        "suggestions": suggestions,
    })))
}

#[axum::debug_handler]
pub async fn get_filter_panel(
    State(service): State<Arc<DirectoryService>>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Value>, AppError> {
    let raw_query = raw_query.unwrap_or_default();
    let catalogue = service.catalogue().await;
    let criteria = catalogue.criteria_from_query(&raw_query).unwrap_or_default();

    Ok(Json(json!({
        "status": catalogue.status(),
        "panel": FilterPanelView::build(catalogue.specialties(), &criteria),
    })))
}

#[axum::debug_handler]
pub async fn apply_criteria_event(
    State(service): State<Arc<DirectoryService>>,
    payload: Result<Json<CriteriaEventRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    debug!("Applying criteria event {:?}", request.event);

    let catalogue = service.catalogue().await;
    let status = catalogue.status();

    let Some(criteria) = catalogue.criteria_from_query(&request.query) else {
        return Ok(Json(json!({
            "status": status,
            "criteria": Value::Null,
            "query": request.query.trim_start_matches('?'),
        })));
    };

    let next = catalogue
        .apply_event(&criteria, request.event)
        .map_err(|e| match e {
            DirectoryError::UnknownSpecialty(_) => AppError::ValidationError(e.to_string()),
            other => AppError::Internal(other.to_string()),
        })?;

    Ok(Json(json!({
        "status": status,
        "query": criteria_to_query(&next),
        "criteria": next,
    })))
}

#[axum::debug_handler]
pub async fn get_load_status(
    State(service): State<Arc<DirectoryService>>,
) -> Result<Json<Value>, AppError> {
    let catalogue = service.catalogue().await;

    let body = match catalogue.state() {
        LoadState::Loading => json!({
            "status": catalogue.status(),
            "pending": catalogue.is_pending(),
        }),
        LoadState::Loaded(loaded) => json!({
            "status": catalogue.status(),
            "pending": catalogue.is_pending(),
            "doctors": loaded.doctors.len(),
            "specialties": loaded.specialties.len(),
            "loaded_at": loaded.loaded_at,
        }),
        LoadState::Failed { reason, failed_at } => json!({
            "status": catalogue.status(),
            "pending": catalogue.is_pending(),
            "error": reason,
            "failed_at": failed_at,
        }),
    };

    Ok(Json(body))
}

#[axum::debug_handler]
pub async fn reload_doctors(
    State(service): State<Arc<DirectoryService>>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    service.spawn_load();

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "status": "loading",
        })),
    ))
}
