use axum::{
	Json, Router,
	extract::{Query, State, rejection::QueryRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;

use kutan_service::{
	Error as ServiceError, FacultiesResponse, ListSubjectsRequest, ListSubjectsResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/subjects", get(list_subjects))
		.route("/v1/faculties", get(list_faculties))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_subjects(
	State(state): State<AppState>,
	query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ListSubjectsResponse>, ApiError> {
	let pairs = match query {
		Ok(Query(pairs)) => pairs,
		Err(err) => {
			tracing::debug!(error = %err, "Ignoring undecodable listing query.");

			Vec::new()
		},
	};
	let response = state.service.list_subjects(ListSubjectsRequest::from_pairs(pairs)).await?;

	Ok(Json(response))
}

async fn list_faculties(
	State(state): State<AppState>,
) -> Result<Json<FacultiesResponse>, ApiError> {
	let response = state.service.list_faculties().await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", message),
			ServiceError::DataIntegrity { message } =>
				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "data_integrity", message),
			ServiceError::Storage { message } => {
				tracing::error!(%message, "Catalogue store failure.");

				ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable", message)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
