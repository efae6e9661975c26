//! service-core: shared HTTP infrastructure for the OctoVinyl services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod utils;
