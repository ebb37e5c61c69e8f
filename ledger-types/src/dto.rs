//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Transaction DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a new transaction.
///
/// Every field is optional at the wire level so the service can tell an
/// absent field apart from a present one; presence is a validated
/// precondition, not a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    /// Opaque owner identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Human-readable label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Signed amount; zero is allowed, absence is not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Free-form category label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A validated insert payload handed to the repository.
///
/// Constructed only by the service after all preconditions pass; the
/// repository applies no business rules of its own.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: String,
    pub title: String,
    pub amount: Decimal,
    pub category: String,
}

/// Confirmation payload after a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
