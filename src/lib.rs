pub mod config;
pub mod constants;
pub mod error;
pub mod observability;

// Domain data shapes shared across layers
pub mod domain;

// Submission stages and the rate gate
pub mod pipeline;

// Layered boundaries for application and infrastructure
pub mod app;
pub mod infra;

pub use app::{ApiEndpoint, SubmitUseCase};
pub use config::Config;
pub use domain::{Description, Document, DocumentFormat, DocumentType, Products};
pub use error::{GatewayError, Result};
pub use pipeline::{ApiResponse, RateGate, TimeUnit};
