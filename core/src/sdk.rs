//! Async FiveStar client.
//!
//! `FiveStar` pairs a `FiveStarClient` with a `Transport` and runs each
//! operation as a single build → execute → parse round trip. There are no
//! retries and no per-call mutable state, so one instance can serve any
//! number of concurrent calls.

use tracing::{debug, instrument, warn};

use crate::client::FiveStarClient;
use crate::config::ClientConfig;
use crate::error::{ConfigError, Error};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{
    GenerateCustomerIdResult, RegisterCustomerOptions, RegisterCustomerResult, ResponseType,
    SubmitResponseOptions, SubmitResponseResult, VerifyCustomerResult,
};

#[derive(Debug, Clone)]
pub struct FiveStar<T = ReqwestTransport> {
    client: FiveStarClient,
    transport: T,
}

impl FiveStar<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Shorthand for `ClientConfig::from_env` followed by `FiveStar::new`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> FiveStar<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: FiveStarClient::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.client.config()
    }

    /// The request builder/parser behind this client.
    pub fn client(&self) -> &FiveStarClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn public_url(&self, locale: Option<&str>) -> String {
        self.client.public_url(locale)
    }

    #[instrument(skip(self), fields(client_id = self.config().client_id()))]
    pub async fn get_response_types(&self) -> Result<Vec<ResponseType>, Error> {
        let response = self.send(self.client.build_get_response_types()).await?;
        Ok(self.client.parse_get_response_types(&response)?)
    }

    #[instrument(skip(self), fields(client_id = self.config().client_id()))]
    pub async fn generate_customer_id(&self) -> Result<GenerateCustomerIdResult, Error> {
        let response = self.send(self.client.build_generate_customer_id()?).await?;
        Ok(self.client.parse_generate_customer_id(&response)?)
    }

    #[instrument(skip(self, options), fields(client_id = self.config().client_id()))]
    pub async fn register_customer(
        &self,
        customer_id: &str,
        options: &RegisterCustomerOptions,
    ) -> Result<RegisterCustomerResult, Error> {
        let request = self.client.build_register_customer(customer_id, options)?;
        let response = self.send(request).await?;
        Ok(self.client.parse_register_customer(&response)?)
    }

    /// Check a customer id with the server. Never fails: any error is
    /// reported as `VerifyCustomerResult::failed()`.
    #[instrument(skip(self), fields(client_id = self.config().client_id()))]
    pub async fn verify_customer(&self, customer_id: &str) -> VerifyCustomerResult {
        match self.try_verify_customer(customer_id).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "customer verification failed");
                VerifyCustomerResult::failed()
            }
        }
    }

    async fn try_verify_customer(&self, customer_id: &str) -> Result<VerifyCustomerResult, Error> {
        let response = self.send(self.client.build_verify_customer(customer_id)?).await?;
        Ok(self.client.parse_verify_customer(&response)?)
    }

    #[instrument(skip(self, options), fields(client_id = self.config().client_id(), type_id = %options.type_id))]
    pub async fn submit_response(
        &self,
        options: &SubmitResponseOptions,
    ) -> Result<SubmitResponseResult, Error> {
        let response = self.send(self.client.build_submit_response(options)?).await?;
        Ok(self.client.parse_submit_response(&response)?)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        debug!(method = %request.method, url = %request.url, "sending request");
        Ok(self.transport.execute(request).await?)
    }
}
