//! Backend API: the operation trait, its HTTP implementation, and wire bodies.

pub mod http;
pub mod provider;
pub mod wire;

pub use http::HttpBackend;
pub use provider::{
    AnalysisRequest, ApiError, CareCostApi, NETWORK_ERROR_MESSAGE, TIMEOUT_ERROR_MESSAGE,
};
