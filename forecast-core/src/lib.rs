//! Core library for the `forecast` demo.
//!
//! This crate defines:
//! - The shared forecast data contract
//! - A mock generator with an injectable random source
//! - A resilient provider that fetches remotely and falls back to mock data
//! - Configuration handling
//!
//! It is used by `forecast-cli`, but any other front-end can embed it the same way.

pub mod config;
pub mod error;
pub mod mock;
pub mod model;
pub mod provider;
pub mod random;
pub mod transport;

pub use config::Config;
pub use error::FetchError;
pub use mock::{generate_mock, generate_mock_from};
pub use model::ForecastRecord;
pub use provider::{ForecastOutcome, ForecastProvider, ForecastService, ForecastSource, ProviderMode};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use transport::{ForecastTransport, HttpTransport, TransportResponse};
