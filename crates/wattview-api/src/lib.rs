// wattview-api: Async Rust client for the wattview energy backend

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{DateRangeUtc, EnergyReport, EnergyRequest, Server, ServerId, VmListing, VmRecord};
pub use transport::TransportConfig;
