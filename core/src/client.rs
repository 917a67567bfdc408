//! Stateless HTTP request builder and response parser for the FiveStar API.
//!
//! # Design
//! `FiveStarClient` holds only an immutable `ClientConfig`. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. The async `FiveStar`
//! wrapper drives both halves through a `Transport`; hosts with their own
//! HTTP stack can call them directly.
//!
//! Error normalization lives in two decoders shared by every operation:
//! `decode_get` only ever reports `HTTP {status}`, while `decode_post` first
//! tries to lift an `error` or `message` field out of the failure body.

use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    GenerateCustomerIdRequest, GenerateCustomerIdResult, RegisterCustomerOptions,
    RegisterCustomerRequest, RegisterCustomerResult, ResponseType, ResponseTypesEnvelope,
    SubmitResponseOptions, SubmitResponseRequest, SubmitResponseResult, VerifyCustomerRequest,
    VerifyCustomerResult,
};

pub const PATH_RESPONSE_TYPES: &str = "/api/responses/types";
pub const PATH_GENERATE_CUSTOMER: &str = "/api/customers/generate";
pub const PATH_CUSTOMERS: &str = "/api/customers";
pub const PATH_VERIFY_CUSTOMER: &str = "/api/customers/verify";
pub const PATH_RESPONSES: &str = "/api/responses";

/// RFC 3986 unreserved characters pass through; everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Synchronous, stateless client for the FiveStar API.
#[derive(Debug, Clone)]
pub struct FiveStarClient {
    config: ClientConfig,
}

impl FiveStarClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Link to the tenant's public feedback page. No network call.
    ///
    /// A blank locale is ignored, so the result never contains `//` after the host.
    /// Both the locale and the client id are encoded as single path segments.
    pub fn public_url(&self, locale: Option<&str>) -> String {
        let client_id = utf8_percent_encode(self.config.client_id(), COMPONENT);
        match locale.map(|l| l.trim().trim_matches('/')).filter(|l| !l.is_empty()) {
            Some(locale) => {
                let locale = utf8_percent_encode(locale, COMPONENT);
                format!("{}/{locale}/c/{client_id}", self.config.api_url())
            }
            None => format!("{}/c/{client_id}", self.config.api_url()),
        }
    }

    pub fn build_get_response_types(&self) -> HttpRequest {
        self.get_request(PATH_RESPONSE_TYPES, &[("clientId", self.config.client_id())])
    }

    pub fn build_generate_customer_id(&self) -> Result<HttpRequest, ApiError> {
        self.post_request(
            PATH_GENERATE_CUSTOMER,
            &GenerateCustomerIdRequest {
                client_id: self.config.client_id().to_string(),
            },
        )
    }

    pub fn build_register_customer(
        &self,
        customer_id: &str,
        options: &RegisterCustomerOptions,
    ) -> Result<HttpRequest, ApiError> {
        self.post_request(
            PATH_CUSTOMERS,
            &RegisterCustomerRequest {
                client_id: self.config.client_id().to_string(),
                customer_id: customer_id.to_string(),
                email: options.email.clone(),
                name: options.name.clone(),
                metadata: options.metadata.clone(),
            },
        )
    }

    pub fn build_verify_customer(&self, customer_id: &str) -> Result<HttpRequest, ApiError> {
        self.post_request(
            PATH_VERIFY_CUSTOMER,
            &VerifyCustomerRequest {
                client_id: self.config.client_id().to_string(),
                customer_id: customer_id.to_string(),
            },
        )
    }

    pub fn build_submit_response(
        &self,
        options: &SubmitResponseOptions,
    ) -> Result<HttpRequest, ApiError> {
        self.post_request(
            PATH_RESPONSES,
            &SubmitResponseRequest {
                client_id: self.config.client_id().to_string(),
                customer_id: options.customer_id.clone(),
                title: options.title.clone(),
                description: options.description.clone(),
                response_type_id: options.type_id.clone(),
                customer_email: options.email.clone(),
                customer_name: options.name.clone(),
                metadata: options.metadata.clone(),
            },
        )
    }

    pub fn parse_get_response_types(
        &self,
        response: &HttpResponse,
    ) -> Result<Vec<ResponseType>, ApiError> {
        let envelope: ResponseTypesEnvelope = decode_get(response)?;
        Ok(envelope.types.unwrap_or_default())
    }

    pub fn parse_generate_customer_id(
        &self,
        response: &HttpResponse,
    ) -> Result<GenerateCustomerIdResult, ApiError> {
        decode_post(response)
    }

    pub fn parse_register_customer(
        &self,
        response: &HttpResponse,
    ) -> Result<RegisterCustomerResult, ApiError> {
        decode_post(response)
    }

    pub fn parse_verify_customer(
        &self,
        response: &HttpResponse,
    ) -> Result<VerifyCustomerResult, ApiError> {
        decode_post(response)
    }

    pub fn parse_submit_response(
        &self,
        response: &HttpResponse,
    ) -> Result<SubmitResponseResult, ApiError> {
        decode_post(response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url())
    }

    fn get_request(&self, path: &str, query: &[(&str, &str)]) -> HttpRequest {
        let mut url = self.url(path);
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.extend(utf8_percent_encode(key, COMPONENT));
            url.push('=');
            url.extend(utf8_percent_encode(value, COMPONENT));
        }
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: self.config.headers(),
            body: None,
        }
    }

    fn post_request<B: Serialize>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(ApiError::encode)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url(path),
            headers: self.config.headers(),
            body: Some(body),
        })
    }
}

/// Decode a GET response. Any status other than 200 is reported as `HTTP {status}`.
pub fn decode_get<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    if response.status != 200 {
        return Err(ApiError::http(response.status));
    }
    decode_body(response)
}

/// Decode a POST response, lifting the server's `error`/`message` field on failure.
pub fn decode_post<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    if response.status != 200 {
        return Err(server_error(response));
    }
    decode_body(response)
}

fn decode_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(ApiError::decode)
}

/// Only flat string-to-string bodies are inspected; anything else gets the generic message.
fn server_error(response: &HttpResponse) -> ApiError {
    let message = serde_json::from_str::<HashMap<String, String>>(&response.body)
        .ok()
        .and_then(|mut fields| fields.remove("error").or_else(|| fields.remove("message")));
    match message {
        Some(message) => ApiError::with_status(message, response.status),
        None => ApiError::http(response.status),
    }
}
