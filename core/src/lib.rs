//! Client SDK for the FiveStar customer feedback API.
//!
//! # Overview
//! Registers anonymous customers, submits feedback responses, lists response
//! types and verifies customer ids against a FiveStar server.
//!
//! # Design
//! - `FiveStarClient` is the synchronous core: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`. It never does I/O.
//! - `FiveStar` is the async surface. It drives the core through a
//!   `Transport`, `ReqwestTransport` by default.
//! - Every HTTP, decode and encode failure becomes an `ApiError`; transport
//!   failures stay separate as `TransportError`. `verify_customer` is the one
//!   operation that never fails.
//!
//! ```no_run
//! use fivestar_core::{ClientConfig, FiveStar, SubmitResponseOptions};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::builder("my-client-id").platform("linux").build()?;
//! let fivestar = FiveStar::new(config)?;
//!
//! let customer = fivestar.generate_customer_id().await?;
//! let types = fivestar.get_response_types().await?;
//! let options = SubmitResponseOptions::new(
//!     customer.customer_id,
//!     "Crash on launch",
//!     "The app closes right after the splash screen.",
//!     types[0].id.clone(),
//! );
//! let submitted = fivestar.submit_response(&options).await?;
//! println!("submitted {}", submitted.response_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod sdk;
pub mod transport;
pub mod types;

pub use client::FiveStarClient;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_API_URL};
pub use error::{ApiError, ConfigError, Error, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use sdk::FiveStar;
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    encode_metadata, CustomerInfo, GenerateCustomerIdResult, RegisterCustomerOptions,
    RegisterCustomerResult, ResponseType, SubmitResponseOptions, SubmitResponseResult,
    VerifyCustomerResult,
};
