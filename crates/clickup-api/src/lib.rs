//! HTTP access to the ClickUp v2 REST API.
//!
//! - `config`: token, team ID and base URL from the environment
//! - `params`: query strings with repeated-key array parameters
//! - `client`: one blocking request per call, JSON in and out

pub mod client;
pub mod config;
pub mod error;
pub mod params;

pub use client::{ClickUpClient, Method, REQUEST_TIMEOUT};
pub use config::Config;
pub use error::{ApiError, ConfigError, Result};
pub use params::QueryParams;
