//! Asynchronous reads against the hydro station API.
//!
//! - `endpoint`: the fixed set of API routes and their paths
//! - `fetcher`: the `DataFetcher` trait the dashboard is written against
//! - `http`: the reqwest implementation used in the browser and the CLI
//! - `error`: failure classification (network vs. malformed body)

pub mod config;
pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod http;

pub use config::ApiConfig;
pub use endpoint::Endpoint;
pub use error::{FailureKind, FetchError, Result};
pub use fetcher::DataFetcher;
pub use http::HttpFetcher;
