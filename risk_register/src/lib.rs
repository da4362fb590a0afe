//! Risk Register - Core Library
//!
//! An in-memory register of risk records exposed over a small REST API.

pub mod cli;
pub mod error;
pub mod id;
pub mod middleware;
pub mod risk;
pub mod server;
pub mod settings;
pub mod store;
pub mod telemetry;

pub use error::ApiError;
pub use risk::{NewRisk, Risk, RiskState, ValidationError};
pub use store::RiskStore;
