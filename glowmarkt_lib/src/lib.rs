//! Glowmarkt smart-meter API client library.
//!
//! Authenticates a household account, discovers its gas and electricity
//! utilities, and reads current meter values and tariffs.

pub mod client;
pub mod constants;
pub mod error;
pub mod helpers;
pub mod house;
pub mod models;
pub mod utility;

pub use client::ApiClient;
pub use constants::{Source, UtilityType};
pub use error::{ApiError, Error};
pub use house::{House, HouseConfig};
pub use models::{Reading, Tariff};
pub use utility::Utility;

/// Library version for User-Agent and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
