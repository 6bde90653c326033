//! CareCost Core - domain types, backend client, session state, workflow controller.
//!
//! This crate holds everything a front-end needs to run the lookup:
//! - Domain types (diagnosis codes, cost ranges, analysis results)
//! - The `CareCostApi` trait and its blocking HTTP implementation
//! - Client configuration (TOML file, environment, defaults)
//! - The workflow controller and the `WorkflowView` seam it renders through
//! - Report view-models and currency formatting

pub mod api;
pub mod config;
pub mod domain;
pub mod format;
pub mod report;
pub mod session;
pub mod testing;
pub mod workflow;

pub use api::{AnalysisRequest, ApiError, CareCostApi, HttpBackend};
pub use config::{ClientConfig, ConfigError};
pub use session::Session;
pub use workflow::{Section, WorkflowController, WorkflowError, WorkflowView, ZipStatus, ZipTicket};
