//! A small Rust client for the OpenWeatherMap One Call API.
//!
//! The crate does one thing: fetch the daily forecast for a coordinate and
//! flatten each day into a fixed, typed record ([`ForecastDay`]), with
//! epoch timestamps rendered as RFC 3339 strings (UTC by default).
//!
//! ## Quick start
//! - Configure authentication via the `OPENWEATHERMAP_API_KEY` environment
//!   variable or an `.api.txt` file in the working directory.
//! - Call [`get_daily_forecast`], or build a [`Client`] for control over
//!   the day count, timeout, timestamp rendering and endpoint.
//!
//! ```no_run
//! fn main() -> openweathermap::Result<()> {
//!     let days = openweathermap::get_daily_forecast(59.33, 18.07)?;
//!     for day in &days {
//!         println!(
//!             "{}: day temp {:?} K, clouds {:?}%",
//!             day.dt.as_deref().unwrap_or("?"),
//!             day.temp_day,
//!             day.clouds,
//!         );
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Unless the account has a paid tier, the provider returns at most the
//! current day plus seven future days.
//!
//! For full usage and configuration details, see the crate README.

#![forbid(unsafe_code)]

mod client;
mod config;
mod error;
mod forecast;

pub use client::{Client, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use forecast::{ForecastDay, TimestampMode};

/// Fetches the daily forecast for the given coordinate using the ambient
/// configuration.
///
/// Convenience wrapper over [`Client::from_env`] and
/// [`Client::daily_forecast`]; the API key is re-resolved on every call.
pub fn get_daily_forecast(lat: f64, lon: f64) -> Result<Vec<ForecastDay>> {
    Client::from_env()?.daily_forecast(lat, lon)
}
