use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEMO_CLIENT_ID: &str = "demo-client";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseType {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip)]
    pub metadata: Option<String>,
}

/// A submitted response as stored by the server, including the
/// fingerprint headers it arrived with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredResponse {
    pub id: String,
    pub customer_id: String,
    pub title: String,
    pub description: String,
    pub response_type_id: String,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub metadata: Option<String>,
    pub platform: Option<String>,
    pub app_version: Option<String>,
}

#[derive(Debug, Default)]
pub struct Tenant {
    pub types: Vec<ResponseType>,
    /// Issued customer ids, mapped to their registration once registered.
    pub customers: HashMap<String, Option<Customer>>,
    pub responses: Vec<StoredResponse>,
}

pub type Db = Arc<RwLock<HashMap<String, Tenant>>>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypesQuery {
    pub client_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCustomer {
    pub client_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCustomer {
    pub client_id: String,
    pub customer_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub metadata: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCustomer {
    pub client_id: String,
    pub customer_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub client_id: String,
    pub customer_id: String,
    pub title: String,
    pub description: String,
    pub response_type_id: String,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub metadata: Option<String>,
}

/// Failure rendered as `{"error": "..."}`, the shape the SDK extracts messages from.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: &'static str,
}

impl ApiFailure {
    fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    fn unknown_client() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Unknown client")
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

pub fn default_types() -> Vec<ResponseType> {
    [
        ("type_bug", "Bug", "bug", "#ef4444", "bug"),
        ("type_feature", "Feature Request", "feature", "#3b82f6", "lightbulb"),
        ("type_feedback", "Feedback", "feedback", "#22c55e", "message"),
    ]
    .into_iter()
    .map(|(id, name, slug, color, icon)| ResponseType {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        color: color.to_string(),
        icon: icon.to_string(),
    })
    .collect()
}

/// Fresh store with one tenant per id, each seeded with `default_types`.
pub fn seeded_db(client_ids: &[&str]) -> Db {
    let tenants = client_ids
        .iter()
        .map(|id| {
            let tenant = Tenant {
                types: default_types(),
                ..Tenant::default()
            };
            (id.to_string(), tenant)
        })
        .collect();
    Arc::new(RwLock::new(tenants))
}

pub fn app() -> Router {
    app_with_db(seeded_db(&[DEMO_CLIENT_ID]))
}

pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route("/api/responses/types", get(list_types))
        .route("/api/responses", post(submit_response))
        .route("/api/customers", post(register_customer))
        .route("/api/customers/generate", post(generate_customer))
        .route("/api/customers/verify", post(verify_customer))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_db(listener, seeded_db(&[DEMO_CLIENT_ID])).await
}

pub async fn run_with_db(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_db(db)).await
}

async fn list_types(
    State(db): State<Db>,
    Query(query): Query<TypesQuery>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let tenants = db.read().await;
    let tenant = tenants.get(&query.client_id).ok_or_else(ApiFailure::unknown_client)?;
    Ok(Json(serde_json::json!({ "types": tenant.types })))
}

async fn generate_customer(
    State(db): State<Db>,
    Json(input): Json<GenerateCustomer>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let mut tenants = db.write().await;
    let tenant = tenants.get_mut(&input.client_id).ok_or_else(ApiFailure::unknown_client)?;
    let customer_id = format!("cust_{}", Uuid::new_v4().simple());
    tenant.customers.insert(customer_id.clone(), None);
    tracing::info!(client_id = %input.client_id, %customer_id, "issued customer id");
    let expires_at = (chrono::Utc::now() + chrono::Duration::days(30)).to_rfc3339();
    Ok(Json(serde_json::json!({
        "customerId": customer_id,
        "expiresAt": expires_at,
        "deviceId": Uuid::new_v4().to_string(),
    })))
}

async fn register_customer(
    State(db): State<Db>,
    Json(input): Json<RegisterCustomer>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let mut tenants = db.write().await;
    let tenant = tenants.get_mut(&input.client_id).ok_or_else(ApiFailure::unknown_client)?;
    let slot = tenant
        .customers
        .get_mut(&input.customer_id)
        .ok_or_else(|| ApiFailure::new(StatusCode::BAD_REQUEST, "Invalid customer ID"))?;
    if slot.is_some() {
        return Err(ApiFailure::new(StatusCode::CONFLICT, "Customer already registered"));
    }
    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        customer_id: input.customer_id,
        email: input.email,
        name: input.name,
        metadata: input.metadata,
    };
    *slot = Some(customer.clone());
    Ok(Json(serde_json::json!({
        "success": true,
        "customer": customer,
        "message": "Customer registered",
    })))
}

async fn verify_customer(
    State(db): State<Db>,
    Json(input): Json<VerifyCustomer>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let tenants = db.read().await;
    let tenant = tenants.get(&input.client_id).ok_or_else(ApiFailure::unknown_client)?;
    let body = if tenant.customers.contains_key(&input.customer_id) {
        serde_json::json!({ "valid": true })
    } else {
        serde_json::json!({ "valid": false, "message": "Unknown customer" })
    };
    Ok(Json(body))
}

async fn submit_response(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<SubmitResponse>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    if input.title.trim().is_empty() {
        return Err(ApiFailure::new(StatusCode::BAD_REQUEST, "Title is required"));
    }
    let mut tenants = db.write().await;
    let tenant = tenants.get_mut(&input.client_id).ok_or_else(ApiFailure::unknown_client)?;
    if !tenant.customers.contains_key(&input.customer_id) {
        return Err(ApiFailure::new(StatusCode::UNAUTHORIZED, "Invalid customer ID"));
    }
    if !tenant.types.iter().any(|t| t.id == input.response_type_id) {
        return Err(ApiFailure::new(StatusCode::UNPROCESSABLE_ENTITY, "Unknown response type"));
    }

    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let stored = StoredResponse {
        id: format!("resp_{}", Uuid::new_v4().simple()),
        customer_id: input.customer_id,
        title: input.title,
        description: input.description,
        response_type_id: input.response_type_id,
        customer_email: input.customer_email,
        customer_name: input.customer_name,
        metadata: input.metadata,
        platform: header("x-fivestar-platform"),
        app_version: header("x-fivestar-app-version"),
    };
    let response_id = stored.id.clone();
    tenant.responses.push(stored);
    tracing::info!(client_id = %input.client_id, %response_id, "response submitted");

    Ok(Json(serde_json::json!({
        "success": true,
        "responseId": response_id,
        "message": "Thanks for your feedback",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_serializes_without_absent_fields() {
        let customer = Customer {
            id: "c1".to_string(),
            customer_id: "cust_1".to_string(),
            email: None,
            name: Some("Ada".to_string()),
            metadata: Some("{}".to_string()),
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "c1", "customerId": "cust_1", "name": "Ada"})
        );
    }

    #[test]
    fn submit_response_rejects_missing_type() {
        let result: Result<SubmitResponse, _> = serde_json::from_str(
            r#"{"clientId":"a","customerId":"b","title":"t","description":"d"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn register_customer_optionals_default_to_none() {
        let input: RegisterCustomer =
            serde_json::from_str(r#"{"clientId":"a","customerId":"b"}"#).unwrap();
        assert!(input.email.is_none());
        assert!(input.name.is_none());
        assert!(input.metadata.is_none());
    }

    #[tokio::test]
    async fn seeded_db_has_default_types_per_tenant() {
        let db = seeded_db(&["one", "two"]);
        let tenants = db.read().await;
        assert_eq!(tenants.len(), 2);
        assert_eq!(tenants["one"].types, default_types());
        assert!(tenants["two"].customers.is_empty());
    }
}
