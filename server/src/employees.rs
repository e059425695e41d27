//! `/employees` REST surface.

use std::{fmt, str::FromStr};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use platform_api::{ApiError, ApiResult};
use products_hr::{
    Department, EmployeeError, EmployeeId, EmployeeQueryResult, EmployeeRequest,
    EmployeeResponse, EmployeeStatusRequest, Page, PageRequest, ValidationErrors,
};
use serde::{Deserialize, Deserializer, de};

use crate::http::AppState;

const COLLECTION: &str = "/employees";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(COLLECTION, get(list_employees).post(create_employee))
        .route("/employees/filters", get(filter_employees))
        .route(
            "/employees/{id}",
            get(get_employee)
                .patch(update_employee_status)
                .put(update_employee)
                .delete(delete_employee),
        )
}

#[derive(Debug, Default, Deserialize)]
struct PageParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    size: Option<i64>,
}

fn page_request(state: &AppState, page: Option<i64>, size: Option<i64>) -> PageRequest {
    PageRequest::resolve(page, size, &state.config.pagination)
}

#[derive(Debug, Default, Deserialize)]
struct FilterParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    department: Option<Department>,
    #[serde(default, deserialize_with = "optional_flag")]
    enabled: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    size: Option<i64>,
}

/// Query values such as `?department=` count as absent.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

/// Boolean query flag: `true/false`, `yes/no`, `on/off` or `1/0`, any case.
fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(value) = raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(Some(true)),
        "false" | "no" | "off" | "0" => Ok(Some(false)),
        _ => Err(de::Error::custom(format!("invalid boolean `{value}`"))),
    }
}

fn service_error(err: EmployeeError) -> ApiError {
    match &err {
        EmployeeError::NotFound(_) => ApiError::NotFound(err.to_string()),
        EmployeeError::Conflict => ApiError::Conflict(err.to_string()),
        EmployeeError::Store(_) => ApiError::internal(err),
    }
}

fn validation_error(errors: ValidationErrors) -> ApiError {
    ApiError::InvalidInput(errors.messages())
}

async fn list_employees(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<PageParams>, ApiError>,
) -> ApiResult<Json<Page<EmployeeResponse>>> {
    let page = page_request(&state, params.page, params.size);
    let employees = state.service.list_all(page).await.map_err(service_error)?;
    Ok(Json(employees))
}

async fn filter_employees(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<FilterParams>, ApiError>,
) -> ApiResult<Json<EmployeeQueryResult>> {
    let page = page_request(&state, params.page, params.size);
    let result = state
        .service
        .list_by_filters(params.department, params.enabled, page)
        .await
        .map_err(service_error)?;
    Ok(Json(result))
}

async fn get_employee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<EmployeeId>, ApiError>,
) -> ApiResult<Json<EmployeeResponse>> {
    let employee = state.service.get_by_id(id).await.map_err(service_error)?;
    Ok(Json(employee))
}

async fn create_employee(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<EmployeeRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let input = request.validate().map_err(validation_error)?;
    let created = state.service.create(input).await.map_err(service_error)?;
    let location = format!("{COLLECTION}/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

async fn update_employee_status(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<EmployeeId>, ApiError>,
    WithRejection(Json(request), _): WithRejection<Json<EmployeeStatusRequest>, ApiError>,
) -> ApiResult<StatusCode> {
    state
        .service
        .update_status(id, request.enabled)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn update_employee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<EmployeeId>, ApiError>,
    WithRejection(Json(request), _): WithRejection<Json<EmployeeRequest>, ApiError>,
) -> ApiResult<StatusCode> {
    let input = request.validate().map_err(validation_error)?;
    state
        .service
        .update(id, input)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_employee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<EmployeeId>, ApiError>,
) -> ApiResult<StatusCode> {
    state.service.delete(id).await.map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}
