//! Prediction data service: fetch surge predictions from the external
//! webhook, fall back to a fixed mock payload when it is unavailable, and
//! talk to the same endpoint family for alerts, feedback and dispatch.

pub mod client;
pub mod fetcher;
pub mod gateway;
pub mod mock;
pub mod refresh;
pub mod validation;

pub use client::*;
pub use fetcher::*;
pub use gateway::*;
pub use mock::*;
pub use refresh::*;
pub use validation::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Prediction webhook is not reachable at {0}")]
    Connection(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Response failed schema validation: {0}")]
    Schema(String),
}
