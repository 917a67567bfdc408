//! Wire DTOs for the FiveStar API.
//!
//! # Design
//! Field names are camelCase on the wire. Optional fields are omitted when
//! absent rather than sent as `null`. `metadata` is a pre-serialized JSON
//! string, not a nested object: the server stores it verbatim. Use
//! `encode_metadata` to produce one from any serializable value.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A server-defined response category such as "bug" or "feature".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseType {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub icon: String,
}

/// Body of `GET /api/responses/types`. A missing or null `types` means none.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseTypesEnvelope {
    #[serde(default)]
    pub types: Option<Vec<ResponseType>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCustomerIdResult {
    pub customer_id: String,
    pub expires_at: String,
    pub device_id: String,
}

/// Optional profile data attached when registering a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterCustomerOptions {
    pub email: Option<String>,
    pub name: Option<String>,
    pub metadata: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub id: String,
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterCustomerResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyCustomerResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VerifyCustomerResult {
    /// The fixed negative result returned whenever verification cannot complete.
    pub fn failed() -> Self {
        Self {
            valid: false,
            message: Some("Verification failed".to_string()),
        }
    }
}

/// A feedback item to submit on behalf of a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponseOptions {
    pub customer_id: String,
    pub title: String,
    pub description: String,
    pub type_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub metadata: Option<String>,
}

impl SubmitResponseOptions {
    pub fn new(
        customer_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        type_id: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            title: title.into(),
            description: description.into(),
            type_id: type_id.into(),
            email: None,
            name: None,
            metadata: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseResult {
    pub success: bool,
    pub response_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCustomerIdRequest {
    pub client_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCustomerRequest {
    pub client_id: String,
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCustomerRequest {
    pub client_id: String,
    pub customer_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    pub client_id: String,
    pub customer_id: String,
    pub title: String,
    pub description: String,
    pub response_type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

/// Serialize `value` into the string form expected by `metadata` fields.
pub fn encode_metadata<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(ApiError::encode)
}
