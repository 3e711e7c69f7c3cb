// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP handlers.
//!
//! Handlers only extract request parts, lock the persistence layer and
//! delegate to `procura_api`. Status codes come from [`HttpError`].

use axum::{
    Json,
    extract::{
        Path, Query, State as AxumState,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use procura_api::{
    ApiError, BidResponse, CreateBidRequest, CreateTenderRequest, EditBidRequest,
    EditTenderRequest, TenderResponse, parse_page, parse_service_types, required,
};
use procura_domain::{BidStatus, Page, ServiceType, TenderStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Why the request failed.
    pub reason: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error message.
    pub message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            reason: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid request body: {}", rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid query string: {}", rejection.body_text()),
        }
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid path: {}", rejection.body_text()),
        }
    }
}

/// Query carrying only the acting username.
#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    username: Option<String>,
}

/// Query for a status change.
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    username: Option<String>,
    status: Option<String>,
}

/// Query for a decision on a bid.
#[derive(Debug, Deserialize)]
pub struct DecisionQuery {
    username: Option<String>,
    decision: Option<String>,
}

/// Query for a personal listing.
#[derive(Debug, Deserialize)]
pub struct MyListQuery {
    username: Option<String>,
    limit: Option<String>,
    offset: Option<String>,
}

/// Handler for POST `/api/tenders/new`.
pub async fn handle_create_tender(
    AxumState(app_state): AxumState<AppState>,
    req: Result<Json<CreateTenderRequest>, JsonRejection>,
) -> Result<Json<TenderResponse>, HttpError> {
    let Json(req) = req?;
    info!(username = %req.creator_username, "Handling create_tender request");

    let mut persistence = app_state.persistence.lock().await;
    let tender: TenderResponse = procura_api::create_tender(&mut persistence, &req)?;

    Ok(Json(tender))
}

/// Handler for GET `/api/tenders/my`.
pub async fn handle_list_my_tenders(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<MyListQuery>, QueryRejection>,
) -> Result<Json<Vec<TenderResponse>>, HttpError> {
    let Query(query) = query?;
    let username: &str = required("username", query.username.as_deref())?;
    let page: Page = parse_page(query.limit.as_deref(), query.offset.as_deref())?;

    let mut persistence = app_state.persistence.lock().await;
    let tenders: Vec<TenderResponse> =
        procura_api::list_my_tenders(&mut persistence, username, page)?;

    Ok(Json(tenders))
}

/// Handler for GET `/api/tenders`.
///
/// `service_type` may repeat, so the query is taken as raw pairs.
pub async fn handle_list_published_tenders(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<TenderResponse>>, HttpError> {
    let Query(pairs) = query?;
    let mut service_types: Vec<&str> = Vec::new();
    let mut limit: Option<&str> = None;
    let mut offset: Option<&str> = None;
    for (key, value) in &pairs {
        match key.as_str() {
            "service_type" => service_types.push(value.as_str()),
            "limit" => limit = Some(value.as_str()),
            "offset" => offset = Some(value.as_str()),
            _ => {}
        }
    }
    let service_types: Vec<ServiceType> = parse_service_types(&service_types)?;
    let page: Page = parse_page(limit, offset)?;

    let mut persistence = app_state.persistence.lock().await;
    let tenders: Vec<TenderResponse> =
        procura_api::list_published_tenders(&mut persistence, &service_types, page)?;

    Ok(Json(tenders))
}

/// Handler for GET `/api/tenders/{id}/status`.
pub async fn handle_get_tender_status(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<UsernameQuery>, QueryRejection>,
) -> Result<Json<TenderStatus>, HttpError> {
    let Path(tender_id) = path?;
    let Query(query) = query?;
    let username: &str = required("username", query.username.as_deref())?;

    let mut persistence = app_state.persistence.lock().await;
    let status: TenderStatus =
        procura_api::get_tender_status(&mut persistence, &tender_id, username)?;

    Ok(Json(status))
}

/// Handler for PUT `/api/tenders/{id}/status`.
pub async fn handle_set_tender_status(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<TenderResponse>, HttpError> {
    let Path(tender_id) = path?;
    let Query(query) = query?;
    let username: &str = required("username", query.username.as_deref())?;
    let status: &str = required("status", query.status.as_deref())?;
    info!(%tender_id, username, status, "Handling set_tender_status request");

    let mut persistence = app_state.persistence.lock().await;
    let tender: TenderResponse =
        procura_api::set_tender_status(&mut persistence, &tender_id, username, status)?;

    Ok(Json(tender))
}

/// Handler for PATCH `/api/tenders/{id}/edit`.
pub async fn handle_edit_tender(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<UsernameQuery>, QueryRejection>,
    req: Result<Json<EditTenderRequest>, JsonRejection>,
) -> Result<Json<TenderResponse>, HttpError> {
    let Path(tender_id) = path?;
    let Query(query) = query?;
    let username: &str = required("username", query.username.as_deref())?;
    let Json(req) = req?;
    info!(%tender_id, username, "Handling edit_tender request");

    let mut persistence = app_state.persistence.lock().await;
    let tender: TenderResponse =
        procura_api::edit_tender(&mut persistence, &tender_id, username, &req)?;

    Ok(Json(tender))
}

/// Handler for PUT `/api/tenders/{id}/rollback/{version}`.
pub async fn handle_rollback_tender(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
    query: Result<Query<UsernameQuery>, QueryRejection>,
) -> Result<Json<TenderResponse>, HttpError> {
    let Path((tender_id, version)) = path?;
    let Query(query) = query?;
    let username: &str = required("username", query.username.as_deref())?;
    info!(%tender_id, %version, username, "Handling rollback_tender request");

    let mut persistence = app_state.persistence.lock().await;
    let tender: TenderResponse =
        procura_api::rollback_tender(&mut persistence, &tender_id, &version, username)?;

    Ok(Json(tender))
}

/// Handler for GET `/api/tenders/{id}/versions`.
pub async fn handle_tender_history(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<UsernameQuery>, QueryRejection>,
) -> Result<Json<Vec<TenderResponse>>, HttpError> {
    let Path(tender_id) = path?;
    let Query(query) = query?;
    let username: &str = required("username", query.username.as_deref())?;

    let mut persistence = app_state.persistence.lock().await;
    let versions: Vec<TenderResponse> =
        procura_api::tender_history(&mut persistence, &tender_id, username)?;

    Ok(Json(versions))
}

/// Handler for POST `/api/bids/new`.
pub async fn handle_create_bid(
    AxumState(app_state): AxumState<AppState>,
    req: Result<Json<CreateBidRequest>, JsonRejection>,
) -> Result<Json<BidResponse>, HttpError> {
    let Json(req) = req?;
    info!(
        tender_id = %req.tender_id,
        author_type = %req.author_type,
        author_id = %req.author_id,
        "Handling create_bid request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let bid: BidResponse = procura_api::create_bid(&mut persistence, &req)?;

    Ok(Json(bid))
}

/// Handler for GET `/api/bids/my`.
pub async fn handle_list_my_bids(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<MyListQuery>, QueryRejection>,
) -> Result<Json<Vec<BidResponse>>, HttpError> {
    let Query(query) = query?;
    let username: &str = required("username", query.username.as_deref())?;
    let page: Page = parse_page(query.limit.as_deref(), query.offset.as_deref())?;

    let mut persistence = app_state.persistence.lock().await;
    let bids: Vec<BidResponse> = procura_api::list_my_bids(&mut persistence, username, page)?;

    Ok(Json(bids))
}

/// Handler for GET `/api/bids/{id}/status`.
pub async fn handle_get_bid_status(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<UsernameQuery>, QueryRejection>,
) -> Result<Json<BidStatus>, HttpError> {
    let Path(bid_id) = path?;
    let Query(query) = query?;
    let username: &str = required("username", query.username.as_deref())?;

    let mut persistence = app_state.persistence.lock().await;
    let status: BidStatus = procura_api::get_bid_status(&mut persistence, &bid_id, username)?;

    Ok(Json(status))
}

/// Handler for PUT `/api/bids/{id}/status`.
pub async fn handle_set_bid_status(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<BidResponse>, HttpError> {
    let Path(bid_id) = path?;
    let Query(query) = query?;
    let username: &str = required("username", query.username.as_deref())?;
    let status: &str = required("status", query.status.as_deref())?;
    info!(%bid_id, username, status, "Handling set_bid_status request");

    let mut persistence = app_state.persistence.lock().await;
    let bid: BidResponse =
        procura_api::set_bid_status(&mut persistence, &bid_id, username, status)?;

    Ok(Json(bid))
}

/// Handler for PATCH and POST `/api/bids/{id}/edit`.
pub async fn handle_edit_bid(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<UsernameQuery>, QueryRejection>,
    req: Result<Json<EditBidRequest>, JsonRejection>,
) -> Result<Json<BidResponse>, HttpError> {
    let Path(bid_id) = path?;
    let Query(query) = query?;
    let username: &str = required("username", query.username.as_deref())?;
    let Json(req) = req?;
    info!(%bid_id, username, "Handling edit_bid request");

    let mut persistence = app_state.persistence.lock().await;
    let bid: BidResponse = procura_api::edit_bid(&mut persistence, &bid_id, username, &req)?;

    Ok(Json(bid))
}

/// Handler for PUT `/api/bids/{id}/rollback/{version}`.
pub async fn handle_rollback_bid(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
    query: Result<Query<UsernameQuery>, QueryRejection>,
) -> Result<Json<BidResponse>, HttpError> {
    let Path((bid_id, version)) = path?;
    let Query(query) = query?;
    let username: &str = required("username", query.username.as_deref())?;
    info!(%bid_id, %version, username, "Handling rollback_bid request");

    let mut persistence = app_state.persistence.lock().await;
    let bid: BidResponse =
        procura_api::rollback_bid(&mut persistence, &bid_id, &version, username)?;

    Ok(Json(bid))
}

/// Handler for PUT `/api/bids/{id}/submit_decision`.
pub async fn handle_submit_decision(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<DecisionQuery>, QueryRejection>,
) -> Result<Json<BidResponse>, HttpError> {
    let Path(bid_id) = path?;
    let Query(query) = query?;
    let username: &str = required("username", query.username.as_deref())?;
    let decision: &str = required("decision", query.decision.as_deref())?;
    info!(%bid_id, username, decision, "Handling submit_decision request");

    let mut persistence = app_state.persistence.lock().await;
    let bid: BidResponse =
        procura_api::submit_decision(&mut persistence, &bid_id, username, decision)?;

    Ok(Json(bid))
}

/// Handler for GET `/api/bids/{id}/versions`.
pub async fn handle_bid_history(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<UsernameQuery>, QueryRejection>,
) -> Result<Json<Vec<BidResponse>>, HttpError> {
    let Path(bid_id) = path?;
    let Query(query) = query?;
    let username: &str = required("username", query.username.as_deref())?;

    let mut persistence = app_state.persistence.lock().await;
    let versions: Vec<BidResponse> =
        procura_api::bid_history(&mut persistence, &bid_id, username)?;

    Ok(Json(versions))
}
