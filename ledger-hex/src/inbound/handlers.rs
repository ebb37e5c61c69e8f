//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use ledger_types::{AppError, CreateTransactionRequest, DeleteResponse, TransactionRepository};

use crate::LedgerService;

/// Application state shared across handlers.
pub struct AppState<R: TransactionRepository> {
    pub service: LedgerService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                // Storage failures stay opaque to callers.
                "Internal server error".to_string(),
            ),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Record a new transaction.
#[tracing::instrument(skip(state, req))]
pub async fn create_transaction<R: TransactionRepository>(
    State(state): State<Arc<AppState<R>>>,
    Json(req): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = state.service.create_transaction(req).await?;
    Ok((StatusCode::CREATED, Json(tx)))
}

/// List all transactions for a user, newest date first.
#[tracing::instrument(skip(state), fields(user_id = %user_id))]
pub async fn list_transactions<R: TransactionRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = state.service.list_transactions(&user_id).await?;
    Ok(Json(transactions))
}

/// Delete a transaction by id.
///
/// The id stays a raw string here; the service owns the "must parse as an
/// integer" precondition so it is testable without HTTP.
#[tracing::instrument(skip(state), fields(transaction_id = %id))]
pub async fn delete_transaction<R: TransactionRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let _deleted = state.service.delete_transaction(&id).await?;
    Ok(Json(DeleteResponse {
        message: "Transaction deleted successfully".into(),
    }))
}

/// Summarize a user's ledger as (balance, income, expenses).
#[tracing::instrument(skip(state), fields(user_id = %user_id))]
pub async fn summarize<R: TransactionRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.service.summarize(&user_id).await?;
    Ok(Json(summary))
}
